//! Tweening for the animated fill.
//!
//! The fill eases from its current value to each new progress value over
//! the configured animation duration.

use std::time::{Duration, Instant};

/// Quadratic ease-in-out: slow start and slow end.
///
/// `t` is clamped to `0.0..=1.0`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// A value moving towards a target over a fixed duration.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    started_at: Option<Instant>,
    complete: bool,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn settled(value: f64, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            duration,
            started_at: None,
            complete: true,
        }
    }

    /// Whether the last sampled value was the target.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Value after `elapsed` time since the last retarget.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    /// Sample the current value. Marks the tween complete once the
    /// duration has passed, so the final value is always drawn.
    pub fn value(&mut self) -> f64 {
        if self.complete {
            return self.to;
        }
        let Some(started_at) = self.started_at else {
            return self.from;
        };

        let elapsed = started_at.elapsed();
        if elapsed >= self.duration {
            self.complete = true;
        }
        self.value_at(elapsed)
    }

    /// Move towards a new target, starting from the current value.
    pub fn retarget(&mut self, to: f64) {
        self.from = self.value();
        self.to = to;
        self.started_at = Some(Instant::now());
        self.complete = false;
    }
}
