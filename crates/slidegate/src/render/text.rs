use crate::parser::{Block, Inline};
use crate::render::image_cache::ImageCache;
use crate::theme::Theme;
use eframe::egui::{self, Color32, FontFamily, FontId, Pos2, Stroke};

/// Create a LayoutJob from inline elements.
pub fn inlines_to_job(
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    append_inlines(&mut job, inlines, font_size, color, false, false);
    job
}

fn append_inlines(
    job: &mut egui::text::LayoutJob,
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    bold: bool,
    italic: bool,
) {
    for inline in inlines {
        match inline {
            Inline::Text(s) => {
                let size = if bold { font_size + 1.0 } else { font_size };
                let format = egui::text::TextFormat {
                    font_id: FontId::new(size, FontFamily::Proportional),
                    color,
                    italics: italic,
                    ..Default::default()
                };
                job.append(s, 0.0, format);
            }
            Inline::Bold(children) => {
                append_inlines(job, children, font_size, color, true, italic);
            }
            Inline::Italic(children) => {
                append_inlines(job, children, font_size, color, bold, true);
            }
            Inline::Code(s) => {
                let format = egui::text::TextFormat {
                    font_id: FontId::new(font_size * 0.85, FontFamily::Monospace),
                    color,
                    background: Color32::from_rgba_unmultiplied(128, 128, 128, 30),
                    ..Default::default()
                };
                job.append(s, 0.0, format);
            }
        }
    }
}

/// Layout and paint inlines, returning the height used.
pub fn draw_inlines(
    ui: &egui::Ui,
    inlines: &[Inline],
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let job = inlines_to_job(inlines, font_size, color, max_width);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint plain text horizontally centered on `center_x`. Returns height used.
pub fn draw_centered(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    top: f32,
    font: FontId,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(text.to_string(), font, color, max_width);
    let pos = Pos2::new(center_x - galley.rect.width() / 2.0, top);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Draw a heading block. Returns height used.
pub fn draw_heading(
    ui: &egui::Ui,
    inlines: &[Inline],
    level: u8,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let size = theme.heading_size(level) * scale;
    draw_inlines(ui, inlines, pos, size, theme.heading_color, max_width)
}

pub fn draw_paragraph(
    ui: &egui::Ui,
    inlines: &[Inline],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    draw_inlines(
        ui,
        inlines,
        pos,
        theme.body_size * scale,
        theme.foreground,
        max_width,
    )
}

/// Draw a bullet list. Returns height used.
pub fn draw_list(
    ui: &egui::Ui,
    items: &[Vec<Inline>],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let marker_width = 45.0 * scale;
    let item_spacing = 8.0 * scale;
    let font_size = theme.body_size * scale;
    let mut y_offset = 0.0;

    for item in items {
        let marker_galley = ui.painter().layout_no_wrap(
            "\u{2022}".to_string(),
            FontId::proportional(font_size),
            theme.accent,
        );
        ui.painter()
            .galley(Pos2::new(pos.x, pos.y + y_offset), marker_galley, theme.accent);

        let text_pos = Pos2::new(pos.x + marker_width, pos.y + y_offset);
        let height = draw_inlines(
            ui,
            item,
            text_pos,
            font_size,
            theme.foreground,
            max_width - marker_width,
        );
        y_offset += height + item_spacing;
    }

    y_offset
}

/// Draw a blockquote. Returns height used.
pub fn draw_blockquote(
    ui: &egui::Ui,
    inlines: &[Inline],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let bar_width = 4.0 * scale;
    let bar_padding = 16.0 * scale;
    let font_size = theme.body_size * 1.1 * scale;

    let text_pos = Pos2::new(pos.x + bar_width + bar_padding, pos.y);
    let text_width = max_width - bar_width - bar_padding;

    let height = draw_inlines(ui, inlines, text_pos, font_size, theme.foreground, text_width);

    let bar_rect = egui::Rect::from_min_size(pos, egui::vec2(bar_width, height));
    ui.painter().rect_filled(bar_rect, 2.0, theme.accent);

    height
}

/// Draw all blocks in a slide sequentially. Returns total height used.
pub fn draw_blocks(
    ui: &egui::Ui,
    blocks: &[Block],
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    image_cache: &ImageCache,
    scale: f32,
) -> f32 {
    let block_spacing = 20.0 * scale;
    let mut y_offset = 0.0;

    for block in blocks {
        let block_pos = Pos2::new(pos.x, pos.y + y_offset);
        let height = draw_block(ui, block, theme, block_pos, max_width, image_cache, scale);
        y_offset += height + block_spacing;
    }

    y_offset
}

pub fn draw_block(
    ui: &egui::Ui,
    block: &Block,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    image_cache: &ImageCache,
    scale: f32,
) -> f32 {
    match block {
        Block::Heading { level, inlines } => {
            draw_heading(ui, inlines, *level, theme, pos, max_width, scale)
        }
        Block::Paragraph { inlines } => draw_paragraph(ui, inlines, theme, pos, max_width, scale),
        Block::List { items } => draw_list(ui, items, theme, pos, max_width, scale),
        Block::BlockQuote { inlines } => {
            draw_blockquote(ui, inlines, theme, pos, max_width, scale)
        }
        Block::Image { alt, path } => {
            let available =
                egui::Rect::from_min_size(pos, egui::vec2(max_width, 400.0 * scale));
            draw_image_in_area(ui, path, alt, theme, available, image_cache, scale).height()
        }
    }
}

/// Draw an image contained in `available`, falling back to a placeholder.
/// Returns the drawn rect.
pub fn draw_image_in_area(
    ui: &egui::Ui,
    path: &str,
    alt: &str,
    theme: &Theme,
    available: egui::Rect,
    image_cache: &ImageCache,
    scale: f32,
) -> egui::Rect {
    if let Some(texture) = image_cache.get_or_load(ui.ctx(), path) {
        let draw_rect = contain(texture.size_vec2(), available);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter()
            .image(texture.id(), draw_rect, uv, Color32::WHITE);
        draw_rect
    } else {
        draw_image_placeholder(ui, alt, theme, available, scale)
    }
}

/// Fit `size` within `available`, preserving aspect ratio, never upscaling.
pub fn contain(size: egui::Vec2, available: egui::Rect) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Rect::from_min_size(available.min, egui::Vec2::ZERO);
    }
    let scale = (available.width() / size.x)
        .min(available.height() / size.y)
        .min(1.0);
    let draw = size * scale;
    egui::Rect::from_center_size(
        egui::pos2(available.center().x, available.top() + draw.y / 2.0),
        draw,
    )
}

pub fn draw_image_placeholder(
    ui: &egui::Ui,
    alt: &str,
    theme: &Theme,
    available: egui::Rect,
    scale: f32,
) -> egui::Rect {
    let height = (200.0 * scale).min(available.height());
    let rect = egui::Rect::from_min_size(available.min, egui::vec2(available.width(), height));
    let color = Theme::with_opacity(theme.foreground, 0.6);

    ui.painter().rect_filled(rect, 8.0 * scale, theme.code_background);
    ui.painter().rect_stroke(
        rect,
        8.0 * scale,
        Stroke::new(1.0, color),
        egui::StrokeKind::Outside,
    );

    let label = if alt.is_empty() {
        "[Image]".to_string()
    } else {
        format!("[Image: {alt}]")
    };
    let galley = ui.painter().layout(
        label,
        FontId::proportional(theme.body_size * 0.8 * scale),
        color,
        rect.width(),
    );
    let text_pos = Pos2::new(
        rect.center().x - galley.rect.width() / 2.0,
        rect.center().y - galley.rect.height() / 2.0,
    );
    ui.painter().galley(text_pos, galley, color);

    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_flattens_nested_styles() {
        let inlines = vec![
            Inline::Text("plain ".to_string()),
            Inline::Bold(vec![Inline::Italic(vec![Inline::Text("both".to_string())])]),
            Inline::Code("x".to_string()),
        ];
        let job = inlines_to_job(&inlines, 20.0, Color32::WHITE, 500.0);
        assert_eq!(job.text, "plain bothx");
        assert_eq!(job.sections.len(), 3);
        assert!(job.sections[1].format.italics);
        assert_eq!(job.sections[1].format.font_id.size, 21.0);
        assert_eq!(job.sections[2].format.font_id.family, FontFamily::Monospace);
    }

    #[test]
    fn test_contain_never_upscales() {
        let area = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 500.0));
        let small = contain(egui::vec2(100.0, 50.0), area);
        assert_eq!(small.size(), egui::vec2(100.0, 50.0));
        assert_eq!(small.center().x, 500.0);

        let tall = contain(egui::vec2(400.0, 1000.0), area);
        assert_eq!(tall.size(), egui::vec2(200.0, 500.0));
        assert_eq!(tall.top(), 0.0);
    }
}
