use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::controller::characters::Card;
use crate::controller::input::Target;
use crate::controller::view::{PosterButton, SlideView};
use crate::deck::SlideContent;
use crate::parser::{Block, Inline, Layout};
use crate::render::image_cache::ImageCache;
use crate::render::{Hits, draw_button, lock, text};
use crate::theme::Theme;

#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    view: &SlideView<'_>,
    footer: Option<&str>,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    match view.slide.content() {
        SlideContent::Locked(screen) => lock::draw(ui, screen, theme, rect, scale, hits),
        SlideContent::Blocks(blocks) => match view.slide.layout {
            Layout::Title => draw_title(ui, blocks, theme, rect, scale),
            Layout::Section => draw_section(ui, blocks, theme, rect, scale),
            Layout::Characters => {
                draw_characters(ui, blocks, view, theme, image_cache, rect, scale, hits)
            }
            Layout::Content => draw_content(ui, blocks, theme, image_cache, rect, scale),
        },
    }

    if let Some(button) = view.poster_button {
        draw_poster_button(ui, button, theme, rect, scale, hits);
    }
    draw_chrome(ui, view, footer, theme, rect, scale, hits);
}

fn draw_title(ui: &egui::Ui, blocks: &[Block], theme: &Theme, rect: egui::Rect, scale: f32) {
    let width = rect.width() * 0.8;
    let cx = rect.center().x;
    let mut y = rect.center().y - theme.h1_size * scale;

    for block in blocks {
        let (inlines, size, color): (&[Inline], f32, _) = match block {
            Block::Heading { level, inlines } => (
                inlines.as_slice(),
                theme.heading_size(*level),
                theme.heading_color,
            ),
            Block::Paragraph { inlines } => (inlines.as_slice(), theme.body_size, theme.muted),
            _ => continue,
        };
        let job = text::inlines_to_job(inlines, size * scale, color, width);
        let galley = ui.painter().layout_job(job);
        let pos = Pos2::new(cx - galley.rect.width() / 2.0, y);
        y += galley.rect.height() + 24.0 * scale;
        ui.painter().galley(pos, galley, color);
    }
}

fn draw_section(ui: &egui::Ui, blocks: &[Block], theme: &Theme, rect: egui::Rect, scale: f32) {
    let Some(Block::Heading { level, inlines }) = blocks.first() else {
        return;
    };
    let width = rect.width() * 0.8;
    let size = theme.heading_size(*level) * scale;
    let job = text::inlines_to_job(inlines, size, theme.heading_color, width);
    let galley = ui.painter().layout_job(job);
    let pos = rect.center() - galley.rect.size() / 2.0;

    let bar_y = pos.y + galley.rect.height() + 24.0 * scale;
    ui.painter().line_segment(
        [
            Pos2::new(rect.center().x - 60.0 * scale, bar_y),
            Pos2::new(rect.center().x + 60.0 * scale, bar_y),
        ],
        Stroke::new(4.0 * scale, theme.accent),
    );
    ui.painter().galley(pos, galley, theme.heading_color);
}

fn draw_content(
    ui: &egui::Ui,
    blocks: &[Block],
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    text::draw_blocks(
        ui,
        blocks,
        theme,
        content_rect.left_top(),
        content_rect.width(),
        image_cache,
        scale,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_characters(
    ui: &egui::Ui,
    blocks: &[Block],
    view: &SlideView<'_>,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let used = text::draw_blocks(
        ui,
        blocks,
        theme,
        content_rect.left_top(),
        content_rect.width(),
        image_cache,
        scale,
    );

    if view.cards.is_empty() {
        return;
    }

    let gap = 32.0 * scale;
    let count = view.cards.len() as f32;
    let card_w = ((content_rect.width() - gap * (count - 1.0)) / count).min(320.0 * scale);
    let card_h = card_w * 1.4;
    let row_w = card_w * count + gap * (count - 1.0);
    let top = content_rect.top() + used + 20.0 * scale;
    let mut x = content_rect.center().x - row_w / 2.0;

    for (i, card) in view.cards.iter().enumerate() {
        let card_rect = egui::Rect::from_min_size(Pos2::new(x, top), egui::vec2(card_w, card_h));
        draw_card(
            ui,
            card,
            view.focused_card == Some(i),
            theme,
            image_cache,
            card_rect,
            scale,
        );
        hits.add(card_rect, Target::CharacterCard(i));
        x += card_w + gap;
    }
}

fn draw_card(
    ui: &egui::Ui,
    card: &Card<'_>,
    focused: bool,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
) {
    let rounding = 12.0 * scale;
    ui.painter().rect_filled(rect, rounding, theme.surface);
    let (width, color) = if focused {
        (3.0 * scale, theme.accent)
    } else {
        (1.0, theme.muted)
    };
    ui.painter()
        .rect_stroke(rect, rounding, Stroke::new(width, color), egui::StrokeKind::Inside);

    let inner = rect.shrink(16.0 * scale);
    let image_area =
        egui::Rect::from_min_size(inner.min, egui::vec2(inner.width(), inner.height() * 0.72));
    match card.image {
        Some(path) => {
            text::draw_image_in_area(ui, path, &card.name, theme, image_area, image_cache, scale);
        }
        None => {
            ui.painter()
                .rect_filled(image_area, 8.0 * scale, theme.code_background);
        }
    }

    let mut y = image_area.bottom() + 12.0 * scale;
    y += text::draw_centered(
        ui,
        &card.name,
        rect.center().x,
        y,
        FontId::proportional(26.0 * scale),
        theme.heading_color,
        inner.width(),
    );
    text::draw_centered(
        ui,
        &card.role.to_uppercase(),
        rect.center().x,
        y + 4.0 * scale,
        FontId::proportional(16.0 * scale),
        theme.muted,
        inner.width(),
    );
}

fn draw_poster_button(
    ui: &egui::Ui,
    button: PosterButton,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    let size = egui::vec2(200.0 * scale, 56.0 * scale);
    let button_rect = egui::Rect::from_min_size(
        Pos2::new(
            rect.right() - size.x - 40.0 * scale,
            rect.bottom() - size.y - 70.0 * scale,
        ),
        size,
    );
    draw_button(ui, button_rect, "View poster", theme, scale, true, button.enabled);
    if button.focused {
        ui.painter().rect_stroke(
            button_rect.expand(4.0 * scale),
            10.0 * scale,
            Stroke::new(2.0 * scale, theme.heading_color),
            egui::StrokeKind::Outside,
        );
    }
    if button.enabled {
        hits.add(button_rect, Target::PosterButton);
    }
}

/// Progress bar, counter, footer and previous/next arrows.
fn draw_chrome(
    ui: &egui::Ui,
    view: &SlideView<'_>,
    footer: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    let bar_height = 6.0 * scale;
    let track = egui::Rect::from_min_size(
        Pos2::new(rect.left(), rect.bottom() - bar_height),
        egui::vec2(rect.width(), bar_height),
    );
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.muted, 0.2));
    let filled = egui::Rect::from_min_size(
        track.min,
        egui::vec2(track.width() * view.progress / 100.0, bar_height),
    );
    ui.painter().rect_filled(filled, 0.0, theme.accent);

    if let Some(footer) = footer {
        let footer_color = Theme::with_opacity(theme.foreground, 0.4);
        let galley = ui.painter().layout_no_wrap(
            footer.to_string(),
            FontId::proportional(14.0 * scale),
            footer_color,
        );
        let pos = Pos2::new(
            rect.center().x - galley.rect.width() / 2.0,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(pos, galley, footer_color);
    }

    let counter_text = format!("{} / {}", view.current, view.total);
    let counter_color = Theme::with_opacity(theme.foreground, 0.3);
    let counter_galley = ui.painter().layout_no_wrap(
        counter_text,
        FontId::monospace(14.0 * scale),
        counter_color,
    );
    let counter_pos = Pos2::new(
        rect.right() - counter_galley.rect.width() - 16.0 * scale,
        rect.bottom() - 30.0 * scale,
    );
    ui.painter()
        .galley(counter_pos, counter_galley, counter_color);

    let arrow_size = egui::vec2(48.0 * scale, 48.0 * scale);
    let arrow_y = rect.bottom() - 44.0 * scale;
    let prev =
        egui::Rect::from_center_size(Pos2::new(rect.left() + 40.0 * scale, arrow_y), arrow_size);
    let next =
        egui::Rect::from_center_size(Pos2::new(rect.left() + 96.0 * scale, arrow_y), arrow_size);
    for (area, label, enabled, target) in [
        (prev, "\u{2039}", view.can_go_previous, Target::PrevButton),
        (next, "\u{203A}", view.can_go_next, Target::NextButton),
    ] {
        let color = Theme::with_opacity(theme.foreground, if enabled { 0.5 } else { 0.15 });
        text::draw_centered(
            ui,
            label,
            area.center().x,
            area.top(),
            FontId::proportional(36.0 * scale),
            color,
            area.width(),
        );
        if enabled {
            hits.add(area, target);
        }
    }
}
