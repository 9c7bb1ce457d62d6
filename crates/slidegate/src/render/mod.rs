pub mod image_cache;
pub mod lock;
pub mod overlay;
pub mod slide;
pub mod text;

use eframe::egui::{self, FontId, Pos2, Stroke};

use crate::controller::input::Target;
use crate::controller::view::{Screen, View};
use crate::theme::Theme;

use image_cache::ImageCache;

/// Clickable regions recorded while painting, in paint order.
#[derive(Debug, Default)]
pub struct Hits {
    regions: Vec<(egui::Rect, Target)>,
}

impl Hits {
    pub fn add(&mut self, rect: egui::Rect, target: Target) {
        self.regions.push((rect, target));
    }

    /// The topmost (last painted) target under `pos`.
    pub fn target_at(&self, pos: Pos2) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(pos))
            .map(|&(_, target)| target)
    }
}

/// Scale factor relative to a 1920x1080 reference canvas.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Paint the whole frame and return what can be clicked.
pub fn draw(
    ui: &egui::Ui,
    view: &View<'_>,
    theme: &Theme,
    image_cache: &ImageCache,
    rect: egui::Rect,
) -> Hits {
    let scale = compute_scale(rect);
    let mut hits = Hits::default();

    match &view.screen {
        Screen::Auth(auth) => overlay::draw_auth(ui, auth, theme, rect, scale, &mut hits),
        Screen::Slide(slide) => slide::draw(
            ui,
            slide,
            view.footer,
            theme,
            image_cache,
            rect,
            scale,
            &mut hits,
        ),
        Screen::Blank => {}
    }

    overlay::draw_banners(ui, view.banners, theme, rect, scale, &mut hits);

    if let Some(opacity) = view.help {
        overlay::draw_help(ui, theme, rect, scale, opacity, &mut hits);
    }
    if let Some(popup) = &view.popup {
        overlay::draw_popup(ui, popup, theme, image_cache, rect, scale, &mut hits);
    }
    if let Some(poster) = view.poster {
        overlay::draw_poster(ui, poster, theme, image_cache, rect, scale, &mut hits);
    }
    if let Some(message) = view.notification {
        overlay::draw_notification(ui, message, theme, rect, scale);
    }

    hits
}

/// A rounded button with a centered label.
pub fn draw_button(
    ui: &egui::Ui,
    rect: egui::Rect,
    label: &str,
    theme: &Theme,
    scale: f32,
    primary: bool,
    enabled: bool,
) {
    let opacity = if enabled { 1.0 } else { 0.4 };
    let (fill, color) = if primary {
        (theme.accent, theme.background)
    } else {
        (theme.surface, theme.foreground)
    };
    ui.painter()
        .rect_filled(rect, 8.0 * scale, Theme::with_opacity(fill, opacity));
    if !primary {
        ui.painter().rect_stroke(
            rect,
            8.0 * scale,
            Stroke::new(1.0, Theme::with_opacity(theme.muted, opacity)),
            egui::StrokeKind::Inside,
        );
    }
    let color = Theme::with_opacity(color, opacity);
    let galley =
        ui.painter()
            .layout_no_wrap(label.to_string(), FontId::proportional(22.0 * scale), color);
    let pos = rect.center() - galley.rect.size() / 2.0;
    ui.painter().galley(pos, galley, color);
}
