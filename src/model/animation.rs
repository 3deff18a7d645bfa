//! Time-driven smooth scrolling shared by the pager and the vertical feeds

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Ease-out cubic between the endpoints
    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() || self.is_finished(now) {
            return self.to;
        }
        let t = now.saturating_duration_since(self.start).as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        self.from + (self.to - self.from) * eased
    }
}
