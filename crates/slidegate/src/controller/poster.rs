use std::time::{Duration, Instant};

/// How long the poster button stays disabled (and Space is swallowed) after
/// the viewer closes.
pub const REOPEN_GUARD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct OpenPoster {
    pub path: String,
    /// Set when fullscreen was not granted and the viewer fills the window instead.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PosterViewer {
    open: Option<OpenPoster>,
    closed_at: Option<Instant>,
}

impl PosterViewer {
    pub fn current(&self) -> Option<&OpenPoster> {
        self.open.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    fn just_closed(&self, now: Instant) -> bool {
        self.closed_at
            .is_some_and(|at| now.saturating_duration_since(at) < REOPEN_GUARD)
    }

    pub fn button_enabled(&self, now: Instant) -> bool {
        !self.is_open() && !self.just_closed(now)
    }

    /// Space right after closing must not reach navigation.
    pub fn swallows_space(&self, now: Instant) -> bool {
        self.just_closed(now)
    }

    pub fn open(&mut self, path: &str, now: Instant) -> bool {
        if !self.button_enabled(now) {
            tracing::debug!("poster was just closed, ignoring");
            return false;
        }
        self.open = Some(OpenPoster {
            path: path.to_string(),
            fallback: false,
        });
        true
    }

    pub fn close(&mut self, now: Instant) -> bool {
        if self.open.take().is_some() {
            self.closed_at = Some(now);
            true
        } else {
            false
        }
    }

    pub fn use_fallback(&mut self) {
        if let Some(open) = self.open.as_mut() {
            open.fallback = true;
        }
    }

    pub fn guard_pending(&self, now: Instant) -> bool {
        self.just_closed(now)
    }
}
