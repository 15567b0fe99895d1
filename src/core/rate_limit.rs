//! Fixed-window request throttle.
//!
//! Each session carries its own [`RateWindow`]. The counter resets once the
//! window duration has elapsed since the window started; bursts straddling a
//! window boundary are accepted.

use std::time::{Duration, Instant};

/// Counter state for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    pub started_at: Instant,
    pub count: u32,
}

impl RateWindow {
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit one request against `slot`, consuming a unit when admitted.
    pub fn check_and_consume(&self, slot: &mut Option<RateWindow>) -> bool {
        self.check_and_consume_at(slot, Instant::now())
    }

    pub fn check_and_consume_at(&self, slot: &mut Option<RateWindow>, now: Instant) -> bool {
        let window = slot.get_or_insert_with(|| RateWindow::new(now));

        if now.saturating_duration_since(window.started_at) > self.window {
            *window = RateWindow::new(now);
        }

        if window.count >= self.max_requests {
            return false;
        }

        window.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_up_to_ceiling_then_rejects() {
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        let start = Instant::now();
        let mut slot = None;

        for i in 0..10 {
            assert!(
                limiter.check_and_consume_at(&mut slot, start + Duration::from_secs(i)),
                "request {i} should be admitted"
            );
        }
        assert!(!limiter.check_and_consume_at(&mut slot, start + Duration::from_secs(10)));
        assert_eq!(slot.unwrap().count, 10);
    }

    #[test]
    fn test_rejection_does_not_increment() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        let mut slot = None;

        assert!(limiter.check_and_consume_at(&mut slot, start));
        assert!(!limiter.check_and_consume_at(&mut slot, start));
        assert!(!limiter.check_and_consume_at(&mut slot, start));
        assert_eq!(slot.unwrap().count, 1);
    }

    #[test]
    fn test_window_resets_after_elapsing() {
        let limiter = RateLimiter::new(10, Duration::from_secs(60));
        let start = Instant::now();
        let mut slot = None;

        for _ in 0..10 {
            assert!(limiter.check_and_consume_at(&mut slot, start));
        }
        assert!(!limiter.check_and_consume_at(&mut slot, start + Duration::from_secs(30)));

        let later = start + Duration::from_secs(61);
        assert!(limiter.check_and_consume_at(&mut slot, later));
        let window = slot.unwrap();
        assert_eq!(window.count, 1);
        assert_eq!(window.started_at, later);
    }

    #[test]
    fn test_exact_window_boundary_does_not_reset() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        let mut slot = None;

        assert!(limiter.check_and_consume_at(&mut slot, start));
        assert!(!limiter.check_and_consume_at(&mut slot, start + Duration::from_secs(60)));
    }

    #[test]
    fn test_boundary_burst_is_accepted() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();
        let mut slot = None;

        // First call opens the window; the second lands just before it closes.
        assert!(limiter.check_and_consume_at(&mut slot, start));
        assert!(limiter.check_and_consume_at(&mut slot, start + Duration::from_secs(59)));
        // Window elapsed: two more go straight through.
        let after = start + Duration::from_millis(60_001);
        assert!(limiter.check_and_consume_at(&mut slot, after));
        assert!(limiter.check_and_consume_at(&mut slot, after));
        assert!(!limiter.check_and_consume_at(&mut slot, after));
    }
}
