//! Cancellable value animation sampled by the host's frame clock.
//!
//! An [`Animation`] is inert data: it never schedules anything itself.
//! The owning gauge samples it once per host frame with the elapsed
//! time since the animation started, and replaces it wholesale when a
//! newer target arrives. Replacement is the only cancellation path.

use std::time::Duration;

/// Time-remapping curve applied to normalized progress in [0, 1].
pub type EasingFn = fn(f64) -> f64;

/// Cubic ease-in-out: slow start, fast middle, slow settle.
pub fn ease_in_out_cubic(progress: f64) -> f64 {
    let t = progress / 0.5;
    if t < 1.0 {
        0.5 * t.powi(3)
    } else {
        0.5 * ((t - 2.0).powi(3) + 2.0)
    }
}

/// Identity curve, useful when a host wants raw linear motion.
pub fn linear(progress: f64) -> f64 {
    progress
}

/// One value transition: start, end, duration and easing curve.
#[derive(Debug, Clone, Copy)]
pub struct Animation {
    start: f64,
    end: f64,
    duration: Duration,
    easing: EasingFn,
}

/// A single sampled frame of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub done: bool,
}

impl Animation {
    /// `duration` must be non-zero; the gauge validates this at
    /// configuration time.
    pub fn new(start: f64, end: f64, duration: Duration, easing: EasingFn) -> Self {
        Self {
            start,
            end,
            duration,
            easing,
        }
    }

    pub fn target(&self) -> f64 {
        self.end
    }

    /// Sample the animation `elapsed` after its start. Progress caps at
    /// 1, so sampling past the duration keeps returning the settled
    /// target value with `done` set.
    pub fn sample(&self, elapsed: Duration) -> Frame {
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let eased = (self.easing)(progress);
        Frame {
            value: self.start + (self.end - self.start) * eased,
            done: progress >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_exact_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=100 {
            let eased = ease_in_out_cubic(i as f64 / 100.0);
            assert!(eased >= last, "not monotonic at step {}", i);
            last = eased;
        }
    }

    #[test]
    fn easing_starts_and_ends_slow() {
        // Slow-in/slow-out: the first and last tenth of the timeline
        // cover far less than a tenth of the value range each.
        assert!(ease_in_out_cubic(0.1) < 0.05);
        assert!(ease_in_out_cubic(0.9) > 0.95);
    }

    #[test]
    fn sample_settles_exactly_at_target() {
        let anim = Animation::new(10.0, 70.0, Duration::from_secs(1), ease_in_out_cubic);
        let end = anim.sample(Duration::from_secs(1));
        assert_eq!(end.value, 70.0);
        assert!(end.done);
        // Past the end stays settled.
        let past = anim.sample(Duration::from_secs(5));
        assert_eq!(past.value, 70.0);
        assert!(past.done);
    }

    #[test]
    fn sample_midway_is_between_endpoints() {
        let anim = Animation::new(0.0, 100.0, Duration::from_secs(1), ease_in_out_cubic);
        let mid = anim.sample(Duration::from_millis(500));
        assert_eq!(mid.value, 50.0);
        assert!(!mid.done);
        let early = anim.sample(Duration::from_millis(100));
        assert!(early.value > 0.0 && early.value < 10.0);
    }

    #[test]
    fn linear_easing_moves_proportionally() {
        let anim = Animation::new(0.0, 80.0, Duration::from_secs(2), linear);
        assert_eq!(anim.sample(Duration::from_millis(500)).value, 20.0);
    }
}
