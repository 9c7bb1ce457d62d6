/// Current position within the deck, 1-based and always within `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// `start` is clamped into range. A deck always has at least one slide.
    pub fn new(total: usize, start: usize) -> Self {
        let total = total.max(1);
        Self {
            current: start.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn next(&mut self) -> bool {
        self.can_go_next() && self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.can_go_previous() && self.go_to(self.current - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total)
    }

    /// Jump to `number`. Returns whether the active slide changed.
    pub fn go_to(&mut self, number: usize) -> bool {
        if number < 1 || number > self.total {
            tracing::warn!(number, total = self.total, "invalid slide number");
            return false;
        }
        if number == self.current {
            return false;
        }
        tracing::debug!(from = self.current, to = number, "slide change");
        self.current = number;
        true
    }

    /// Progress bar width in percent: `(current - 1) / (total - 1) * 100`.
    /// A single-slide deck reports 0.
    pub fn progress(&self) -> f32 {
        if self.total <= 1 {
            return 0.0;
        }
        (self.current - 1) as f32 / (self.total - 1) as f32 * 100.0
    }
}
