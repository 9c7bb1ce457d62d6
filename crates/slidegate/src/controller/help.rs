use std::time::{Duration, Instant};

pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Hidden,
    Showing { since: Instant },
    Hiding { since: Instant },
}

/// Keyboard shortcut overlay with a fade in/out.
#[derive(Debug, Clone, Copy)]
pub struct HelpOverlay {
    phase: Phase,
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self {
            phase: Phase::Hidden,
        }
    }
}

impl HelpOverlay {
    /// Visible from the moment it is shown until its fade-out completes.
    pub fn is_visible(&self) -> bool {
        !matches!(self.phase, Phase::Hidden)
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.phase {
            Phase::Showing { .. } => self.hide(now),
            Phase::Hidden | Phase::Hiding { .. } => self.show(now),
        }
    }

    pub fn show(&mut self, now: Instant) {
        if !matches!(self.phase, Phase::Showing { .. }) {
            self.phase = Phase::Showing { since: now };
        }
    }

    pub fn hide(&mut self, now: Instant) {
        if matches!(self.phase, Phase::Showing { .. }) {
            self.phase = Phase::Hiding { since: now };
        }
    }

    /// Remove without fading.
    pub fn close_now(&mut self) {
        self.phase = Phase::Hidden;
    }

    /// Finish a fade-out whose time has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Hiding { since } = self.phase {
            if now.saturating_duration_since(since) >= FADE_DURATION {
                self.phase = Phase::Hidden;
            }
        }
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        let fraction = |since: Instant| {
            (now.saturating_duration_since(since).as_secs_f32() / FADE_DURATION.as_secs_f32())
                .clamp(0.0, 1.0)
        };
        match self.phase {
            Phase::Hidden => 0.0,
            Phase::Showing { since } => fraction(since),
            Phase::Hiding { since } => 1.0 - fraction(since),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        match self.phase {
            Phase::Hidden => false,
            Phase::Showing { since } | Phase::Hiding { since } => {
                now.saturating_duration_since(since) < FADE_DURATION
            }
        }
    }
}
