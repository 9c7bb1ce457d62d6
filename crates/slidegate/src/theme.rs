use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub surface: Color32,
    pub error: Color32,
    pub code_background: Color32,
    pub code_foreground: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            surface: Color32::from_rgb(0x2A, 0x2A, 0x2E),
            error: Color32::from_rgb(0xF0, 0x6A, 0x5F),
            code_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            code_foreground: Color32::from_rgb(0xD4, 0xD4, 0xD4),
            h1_size: 72.0,
            h2_size: 56.0,
            h3_size: 42.0,
            body_size: 34.0,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            muted: Color32::from_rgb(0x70, 0x70, 0x78),
            surface: Color32::from_rgb(0xF0, 0xF1, 0xF4),
            error: Color32::from_rgb(0xB3, 0x26, 0x1E),
            code_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            code_foreground: Color32::from_rgb(0x33, 0x33, 0x33),
            h1_size: 72.0,
            h2_size: 56.0,
            h3_size: 42.0,
            body_size: 34.0,
        }
    }

    /// Accessibility mode: pure black and white with larger type.
    pub fn high_contrast() -> Self {
        Self {
            background: Color32::BLACK,
            foreground: Color32::WHITE,
            heading_color: Color32::WHITE,
            accent: Color32::YELLOW,
            muted: Color32::from_rgb(0xE0, 0xE0, 0xE0),
            surface: Color32::from_rgb(0x10, 0x10, 0x10),
            error: Color32::from_rgb(0xFF, 0x80, 0x80),
            code_background: Color32::BLACK,
            code_foreground: Color32::YELLOW,
            h1_size: 84.0,
            h2_size: 64.0,
            h3_size: 48.0,
            body_size: 40.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(
            color.r(),
            color.g(),
            color.b(),
            (opacity.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            3 => self.h3_size,
            _ => self.body_size,
        }
    }
}
