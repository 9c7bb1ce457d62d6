use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::controller::input::Target;
use crate::deck::LockScreen;
use crate::render::{Hits, text};
use crate::theme::Theme;

/// Paint the placeholder for a hidden sensitive slide. The padlock is clickable.
pub fn draw(
    ui: &egui::Ui,
    lock: &LockScreen,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    hits: &mut Hits,
) {
    let width = rect.width() * 0.7;
    let cx = rect.center().x;
    let mut y = rect.top() + rect.height() * 0.14;

    y += text::draw_centered(
        ui,
        &lock.title,
        cx,
        y,
        FontId::proportional(theme.h2_size * scale),
        theme.heading_color,
        width,
    );
    y += 40.0 * scale;

    y += text::draw_centered(
        ui,
        LockScreen::HEADLINE,
        cx,
        y,
        FontId::proportional(theme.h3_size * scale),
        theme.error,
        width,
    );
    y += 16.0 * scale;
    y += text::draw_centered(
        ui,
        LockScreen::NOTICE,
        cx,
        y,
        FontId::proportional(theme.body_size * 0.8 * scale),
        theme.foreground,
        width,
    );
    y += 8.0 * scale;
    y += text::draw_centered(
        ui,
        LockScreen::AUDIENCE,
        cx,
        y,
        FontId::proportional(theme.body_size * 0.8 * scale),
        theme.muted,
        width,
    );
    y += 40.0 * scale;

    let icon_rect = egui::Rect::from_center_size(
        Pos2::new(cx, y + 70.0 * scale),
        egui::vec2(140.0 * scale, 140.0 * scale),
    );
    let hovered = ui
        .ctx()
        .pointer_hover_pos()
        .is_some_and(|p| icon_rect.contains(p));
    draw_padlock(ui, icon_rect, theme, scale, hovered);
    hits.add(icon_rect, Target::LockIcon);
    y = icon_rect.bottom() + 24.0 * scale;

    text::draw_centered(
        ui,
        LockScreen::INSTRUCTION,
        cx,
        y,
        FontId::proportional(20.0 * scale),
        theme.muted,
        width,
    );
}

fn draw_padlock(ui: &egui::Ui, area: egui::Rect, theme: &Theme, scale: f32, hovered: bool) {
    let color = if hovered { theme.accent } else { theme.foreground };
    let painter = ui.painter();

    if hovered {
        painter.circle_filled(
            area.center(),
            area.width() / 2.0,
            Theme::with_opacity(theme.accent, 0.12),
        );
    }

    let body = egui::Rect::from_center_size(
        Pos2::new(area.center().x, area.center().y + 16.0 * scale),
        egui::vec2(64.0 * scale, 48.0 * scale),
    );
    painter.rect_filled(body, 6.0 * scale, color);

    // shackle: two posts joined by a half circle
    let stroke = Stroke::new(7.0 * scale, color);
    let radius = 20.0 * scale;
    let top = body.top() - 14.0 * scale;
    let left = body.center().x - radius;
    let right = body.center().x + radius;
    painter.line_segment([Pos2::new(left, body.top()), Pos2::new(left, top)], stroke);
    painter.line_segment([Pos2::new(right, body.top()), Pos2::new(right, top)], stroke);
    let arc: Vec<Pos2> = (0..=16)
        .map(|i| {
            let a = std::f32::consts::PI * (1.0 + i as f32 / 16.0);
            Pos2::new(body.center().x + radius * a.cos(), top + radius * a.sin())
        })
        .collect();
    painter.add(egui::Shape::line(arc, stroke));

    let keyhole = Pos2::new(body.center().x, body.center().y - 4.0 * scale);
    painter.circle_filled(keyhole, 6.0 * scale, theme.background);
    painter.line_segment(
        [keyhole, Pos2::new(keyhole.x, keyhole.y + 14.0 * scale)],
        Stroke::new(4.0 * scale, theme.background),
    );
}
