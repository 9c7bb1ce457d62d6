use std::time::{Duration, Instant};

pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(5);
pub const BANNER_DURATION: Duration = Duration::from_secs(10);

/// Shown when the user switches to fullscreen.
pub const NAVIGATION_HINT: &str = "Use arrow keys or swipe to navigate slides. \
    Press F for fullscreen, H for help, P for access mode.";

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub id: usize,
    pub message: String,
    shown_at: Instant,
}

/// Transient notification plus dismissable compatibility banners.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    notification: Option<(String, Instant)>,
    banners: Vec<Banner>,
    next_id: usize,
}

impl Notices {
    pub fn notify(&mut self, message: impl Into<String>, now: Instant) {
        self.notification = Some((message.into(), now));
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_ref().map(|(m, _)| m.as_str())
    }

    pub fn add_banner(&mut self, message: impl Into<String>, now: Instant) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.banners.push(Banner {
            id,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.banners.retain(|b| b.id != id);
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn tick(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= NOTIFICATION_DURATION)
        {
            self.notification = None;
        }
        self.banners
            .retain(|b| now.saturating_duration_since(b.shown_at) < BANNER_DURATION);
    }
}
