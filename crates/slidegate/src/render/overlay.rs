use eframe::egui::{self, Color32, FontId, Pos2};

use crate::controller::access::AuthPhase;
use crate::controller::input::Target;
use crate::controller::notice::Banner;
use crate::controller::poster::OpenPoster;
use crate::controller::view::{AuthView, PopupView};
use crate::render::image_cache::ImageCache;
use crate::render::{Hits, draw_button, text};
use crate::theme::Theme;

const SHORTCUTS: [(&str, &str); 14] = [
    ("\u{2192} / Space", "Next slide"),
    ("\u{2190}", "Previous slide"),
    ("Home / End", "First / last slide"),
    ("1 \u{2013} 9", "Jump to slide"),
    ("Swipe", "Next / previous slide"),
    ("Tab / Enter", "Focus / activate cards and buttons"),
    ("V", "View poster"),
    ("F", "Toggle fullscreen"),
    ("P", "Choose public or admin mode"),
    ("A", "Toggle accessibility mode"),
    ("H", "Toggle this help"),
    ("Esc", "Close overlay"),
    ("Ctrl+R", "Reload deck"),
    ("Q", "Quit"),
];

fn panel(ui: &egui::Ui, rect: egui::Rect, theme: &Theme, scale: f32, opacity: f32) {
    ui.painter().rect_filled(
        rect,
        16.0 * scale,
        Theme::with_opacity(theme.surface, opacity),
    );
}

fn close_button(ui: &egui::Ui, panel: egui::Rect, scale: f32, color: Color32) -> egui::Rect {
    let rect = egui::Rect::from_min_size(
        Pos2::new(panel.right() - 56.0 * scale, panel.top() + 12.0 * scale),
        egui::vec2(44.0 * scale, 44.0 * scale),
    );
    text::draw_centered(
        ui,
        "\u{00d7}",
        rect.center().x,
        rect.top(),
        FontId::proportional(34.0 * scale),
        Theme::with_opacity(color, 0.8),
        rect.width(),
    );
    rect
}

pub fn draw_auth(
    ui: &egui::Ui,
    auth: &AuthView<'_>,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    ui.painter().rect_filled(rect, 0.0, theme.background);

    let card =
        egui::Rect::from_center_size(rect.center(), egui::vec2(640.0 * scale, 460.0 * scale));
    panel(ui, card, theme, scale, 1.0);

    let cx = card.center().x;
    let width = card.width() - 80.0 * scale;
    let mut y = card.top() + 48.0 * scale;
    y += text::draw_centered(
        ui,
        "Presentation Access",
        cx,
        y,
        FontId::proportional(theme.h3_size * scale),
        theme.heading_color,
        width,
    );
    y += 12.0 * scale;

    match auth.phase {
        AuthPhase::ModeSelection | AuthPhase::Closed => {
            y += text::draw_centered(
                ui,
                "How are you viewing this presentation?",
                cx,
                y,
                FontId::proportional(22.0 * scale),
                theme.muted,
                width,
            );
            y += 48.0 * scale;

            let size = egui::vec2(width, 64.0 * scale);
            let public = egui::Rect::from_min_size(Pos2::new(cx - width / 2.0, y), size);
            draw_button(ui, public, "Public viewer", theme, scale, false, true);
            hits.add(public, Target::PublicMode);

            let admin = public.translate(egui::vec2(0.0, size.y + 20.0 * scale));
            draw_button(ui, admin, "Admin (enter code)", theme, scale, true, true);
            hits.add(admin, Target::AdminMode);
        }
        AuthPhase::CodeEntry => {
            y += text::draw_centered(
                ui,
                "Enter the admin code",
                cx,
                y,
                FontId::proportional(22.0 * scale),
                theme.muted,
                width,
            );
            y += 32.0 * scale;

            let field = egui::Rect::from_min_size(
                Pos2::new(cx - width / 2.0, y),
                egui::vec2(width, 60.0 * scale),
            );
            ui.painter()
                .rect_filled(field, 8.0 * scale, theme.code_background);
            ui.painter().rect_stroke(
                field,
                8.0 * scale,
                egui::Stroke::new(2.0 * scale, theme.accent),
                egui::StrokeKind::Inside,
            );
            let masked: String = "\u{2022}".repeat(auth.code_len);
            let caret = format!("{masked}|");
            let galley = ui.painter().layout_no_wrap(
                caret,
                FontId::monospace(26.0 * scale),
                theme.code_foreground,
            );
            let pos = Pos2::new(
                field.left() + 16.0 * scale,
                field.center().y - galley.rect.height() / 2.0,
            );
            ui.painter().galley(pos, galley, theme.code_foreground);
            y = field.bottom() + 16.0 * scale;

            if let Some(error) = auth.error {
                y += text::draw_centered(
                    ui,
                    error,
                    cx,
                    y,
                    FontId::proportional(20.0 * scale),
                    theme.error,
                    width,
                );
            } else if auth.locked_out {
                y += text::draw_centered(
                    ui,
                    "Too many failed attempts. Please wait.",
                    cx,
                    y,
                    FontId::proportional(20.0 * scale),
                    theme.error,
                    width,
                );
            }

            let half = (width - 20.0 * scale) / 2.0;
            let top = y.max(field.bottom() + 56.0 * scale);
            let cancel = egui::Rect::from_min_size(
                Pos2::new(cx - width / 2.0, top),
                egui::vec2(half, 56.0 * scale),
            );
            let submit = cancel.translate(egui::vec2(half + 20.0 * scale, 0.0));
            draw_button(ui, cancel, "Cancel", theme, scale, false, true);
            draw_button(ui, submit, "Unlock", theme, scale, true, true);
            hits.add(cancel, Target::CancelCode);
            hits.add(submit, Target::SubmitCode);
        }
    }
}

pub fn draw_help(
    ui: &egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    opacity: f32,
    hits: &mut Hits,
) {
    ui.painter()
        .rect_filled(rect, 0.0, Theme::with_opacity(Color32::BLACK, 0.6 * opacity));
    hits.add(rect, Target::HelpBackdrop);

    let padding = 32.0 * scale;
    let line_height = 38.0 * scale;
    let height = SHORTCUTS.len() as f32 * line_height + padding * 2.0 + 56.0 * scale;
    let help_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(620.0 * scale, height));
    panel(ui, help_rect, theme, scale, 0.97 * opacity);
    hits.add(help_rect, Target::HelpPanel);

    let title_color = Theme::with_opacity(theme.heading_color, opacity);
    let galley = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        FontId::proportional(26.0 * scale),
        title_color,
    );
    ui.painter().galley(
        Pos2::new(help_rect.left() + padding, help_rect.top() + padding),
        galley,
        title_color,
    );
    let close = close_button(ui, help_rect, scale, Theme::with_opacity(theme.foreground, opacity));
    hits.add(close, Target::HelpClose);

    let key_color = Theme::with_opacity(theme.accent, opacity);
    let text_color = Theme::with_opacity(theme.foreground, opacity);
    let mut y = help_rect.top() + padding + 56.0 * scale;
    for (key, desc) in SHORTCUTS {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            FontId::monospace(18.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(Pos2::new(help_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            FontId::proportional(18.0 * scale),
            text_color,
        );
        ui.painter().galley(
            Pos2::new(help_rect.left() + padding + 200.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

pub fn draw_popup(
    ui: &egui::Ui,
    popup: &PopupView<'_>,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    ui.painter()
        .rect_filled(rect, 0.0, Theme::with_opacity(Color32::BLACK, 0.7));
    hits.add(rect, Target::PopupOverlay);

    let padding = 32.0 * scale;
    let tile = egui::vec2(220.0 * scale, 280.0 * scale);
    let gap = 24.0 * scale;
    let count = popup.options.len().max(1) as f32;
    let row_w = tile.x * count + gap * (count - 1.0);
    let width = (row_w + padding * 2.0).min(rect.width() - 40.0 * scale);
    let height = tile.y + padding * 2.0 + 64.0 * scale;
    let popup_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(width, height));
    panel(ui, popup_rect, theme, scale, 1.0);
    hits.add(popup_rect, Target::PopupPanel);

    let galley = ui.painter().layout_no_wrap(
        popup.title.clone(),
        FontId::proportional(28.0 * scale),
        theme.heading_color,
    );
    ui.painter().galley(
        Pos2::new(popup_rect.left() + padding, popup_rect.top() + padding),
        galley,
        theme.heading_color,
    );
    let close = close_button(ui, popup_rect, scale, theme.foreground);
    hits.add(close, Target::PopupClose);

    let mut x = popup_rect.center().x - row_w / 2.0;
    let top = popup_rect.top() + padding + 64.0 * scale;
    for (i, option) in popup.options.iter().enumerate() {
        let tile_rect = egui::Rect::from_min_size(Pos2::new(x, top), tile);
        ui.painter()
            .rect_filled(tile_rect, 10.0 * scale, theme.background);
        if i == popup.focused {
            ui.painter().rect_stroke(
                tile_rect,
                10.0 * scale,
                egui::Stroke::new(3.0 * scale, theme.accent),
                egui::StrokeKind::Inside,
            );
        }
        let inner = tile_rect.shrink(12.0 * scale);
        let image_area = egui::Rect::from_min_size(
            inner.min,
            egui::vec2(inner.width(), inner.height() - 44.0 * scale),
        );
        text::draw_image_in_area(
            ui,
            &option.image,
            &option.name,
            theme,
            image_area,
            image_cache,
            scale,
        );
        text::draw_centered(
            ui,
            &option.name,
            tile_rect.center().x,
            inner.bottom() - 34.0 * scale,
            FontId::proportional(22.0 * scale),
            theme.heading_color,
            inner.width(),
        );
        hits.add(tile_rect, Target::CharacterOption(i));
        x += tile.x + gap;
    }
}

pub fn draw_poster(
    ui: &egui::Ui,
    poster: &OpenPoster,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    ui.painter().rect_filled(rect, 0.0, Color32::BLACK);
    let margin = if poster.fallback { 0.0 } else { 24.0 * scale };
    let area = rect.shrink(margin);

    match image_cache.get_or_load(ui.ctx(), &poster.path) {
        Some(texture) => {
            let size = texture.size_vec2();
            let fit = (area.width() / size.x).min(area.height() / size.y);
            let draw_rect = egui::Rect::from_center_size(area.center(), size * fit);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .image(texture.id(), draw_rect, uv, Color32::WHITE);
        }
        None => {
            text::draw_centered(
                ui,
                &format!("Poster not available: {}", poster.path),
                area.center().x,
                area.center().y,
                FontId::proportional(24.0 * scale),
                theme.error,
                area.width(),
            );
        }
    }

    text::draw_centered(
        ui,
        "Click or press Esc to close",
        rect.center().x,
        rect.bottom() - 40.0 * scale,
        FontId::proportional(16.0 * scale),
        Theme::with_opacity(Color32::WHITE, 0.5),
        rect.width(),
    );
    hits.add(rect, Target::PosterViewer);
}

pub fn draw_banners(
    ui: &egui::Ui,
    banners: &[Banner],
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    let height = 40.0 * scale;
    let mut y = rect.top();
    for banner in banners {
        let banner_rect = egui::Rect::from_min_size(
            Pos2::new(rect.left(), y),
            egui::vec2(rect.width(), height),
        );
        ui.painter()
            .rect_filled(banner_rect, 0.0, Theme::with_opacity(theme.error, 0.9));
        let galley = ui.painter().layout_no_wrap(
            format!("\u{26a0} {}", banner.message),
            FontId::proportional(16.0 * scale),
            Color32::WHITE,
        );
        let pos = Pos2::new(
            banner_rect.left() + 16.0 * scale,
            banner_rect.center().y - galley.rect.height() / 2.0,
        );
        ui.painter().galley(pos, galley, Color32::WHITE);
        text::draw_centered(
            ui,
            "\u{00d7}",
            banner_rect.right() - 24.0 * scale,
            banner_rect.top() + 4.0 * scale,
            FontId::proportional(24.0 * scale),
            Color32::WHITE,
            40.0 * scale,
        );
        hits.add(banner_rect, Target::Banner(banner.id));
        y += height;
    }
}

pub fn draw_notification(
    ui: &egui::Ui,
    message: &str,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let color = Theme::with_opacity(theme.foreground, 0.9);
    let bg = Theme::with_opacity(theme.code_background, 0.9);
    let galley = ui.painter().layout_no_wrap(
        message.to_string(),
        FontId::proportional(20.0 * scale),
        color,
    );
    let padding = 16.0 * scale;
    let toast_rect = egui::Rect::from_min_size(
        Pos2::new(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 100.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, bg);
    ui.painter().galley(
        Pos2::new(toast_rect.left() + padding, toast_rect.top() + padding),
        galley,
        color,
    );
}
