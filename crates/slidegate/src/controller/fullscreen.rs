use std::time::{Duration, Instant};

use super::Effect;

/// How long a fullscreen request may go unanswered before falling back.
pub const GRANT_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowState {
    Windowed,
    Requested { since: Instant },
    Fullscreen,
    /// Fullscreen was refused; the window is maximized without decorations.
    Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct Fullscreen {
    state: WindowState,
}

impl Default for Fullscreen {
    fn default() -> Self {
        Self {
            state: WindowState::Windowed,
        }
    }
}

impl Fullscreen {
    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != WindowState::Windowed
    }

    pub fn is_fallback(&self) -> bool {
        self.state == WindowState::Fallback
    }

    pub fn request(&mut self, now: Instant) -> Vec<Effect> {
        if self.is_active() {
            return Vec::new();
        }
        self.state = WindowState::Requested { since: now };
        vec![Effect::SetFullscreen(true)]
    }

    pub fn exit(&mut self) -> Vec<Effect> {
        let effects = match self.state {
            WindowState::Windowed => Vec::new(),
            WindowState::Requested { .. } | WindowState::Fullscreen => {
                vec![Effect::SetFullscreen(false)]
            }
            WindowState::Fallback => {
                vec![Effect::SetMaximized(false), Effect::SetDecorations(true)]
            }
        };
        self.state = WindowState::Windowed;
        effects
    }

    pub fn toggle(&mut self, now: Instant) -> Vec<Effect> {
        if self.is_active() {
            self.exit()
        } else {
            self.request(now)
        }
    }

    /// Reconcile with what the window reports. `actual` is `None` when the
    /// platform does not say.
    pub fn observe(&mut self, actual: Option<bool>, now: Instant) -> Vec<Effect> {
        match (self.state, actual) {
            (WindowState::Requested { .. }, Some(true)) => {
                self.state = WindowState::Fullscreen;
                Vec::new()
            }
            (WindowState::Requested { since }, _)
                if now.saturating_duration_since(since) >= GRANT_TIMEOUT =>
            {
                tracing::warn!("fullscreen not granted, using maximized window");
                self.state = WindowState::Fallback;
                vec![
                    Effect::SetFullscreen(false),
                    Effect::SetMaximized(true),
                    Effect::SetDecorations(false),
                ]
            }
            (WindowState::Fullscreen, Some(false)) => {
                self.state = WindowState::Windowed;
                Vec::new()
            }
            (WindowState::Windowed, Some(true)) => {
                self.state = WindowState::Fullscreen;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}
