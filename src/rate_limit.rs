use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Length of one counting window.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Maximum requests allowed per key within one window.
pub const RATE_LIMIT_MAX: u32 = 5;

/// Per-key counter for the current window.
#[derive(Debug)]
struct RateLimitEntry {
    window_start: Instant,
    count: u32,
}

/// Fixed-window rate limiter keyed by client address.
///
/// One instance is constructed at startup and shared through `AppState`; the
/// map is guarded by a mutex because the tokio runtime schedules handlers
/// across threads. The critical section is a single map lookup plus counter
/// bump, so contention is negligible at this service's traffic levels.
#[derive(Debug)]
pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_config(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX)
    }

    pub fn with_config(window: Duration, max_requests: u32) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            window,
            max_requests,
        }
    }

    /// Records one request for `key` and reports whether it exceeded the
    /// limit. The first request past the threshold (the 6th in a default
    /// window) is the first one rejected.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_mut(key) {
            Some(entry) if now.saturating_duration_since(entry.window_start) < self.window => {
                entry.count += 1;
                entry.count > self.max_requests
            }
            _ => {
                // First request from this key, or its window has elapsed
                entries.insert(
                    key.to_string(),
                    RateLimitEntry {
                        window_start: now,
                        count: 1,
                    },
                );
                false
            }
        }
    }

    /// Drops entries whose window has fully elapsed. Run periodically from a
    /// background task so the map does not grow without bound as client
    /// addresses churn.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.window_start) < self.window);
        before - entries.len()
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_the_threshold() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for _ in 0..RATE_LIMIT_MAX {
            assert!(!limiter.check_at("1.2.3.4", now));
        }
        assert!(limiter.check_at("1.2.3.4", now));
    }

    #[test]
    fn sixth_request_in_window_is_first_rejected() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        let results: Vec<bool> = (0..7).map(|_| limiter.check_at("10.0.0.1", now)).collect();
        assert_eq!(results, vec![false, false, false, false, false, true, true]);
    }

    #[test]
    fn window_elapse_resets_the_counter() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for _ in 0..6 {
            limiter.check_at("10.0.0.1", now);
        }
        assert!(limiter.check_at("10.0.0.1", now + RATE_LIMIT_WINDOW - Duration::from_secs(1)));

        // Crossing the boundary starts a fresh window regardless of history
        assert!(!limiter.check_at("10.0.0.1", now + RATE_LIMIT_WINDOW));
    }

    #[test]
    fn keys_are_counted_independently() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for _ in 0..6 {
            limiter.check_at("10.0.0.1", now);
        }
        assert!(!limiter.check_at("10.0.0.2", now));
    }

    #[test]
    fn sweep_removes_only_elapsed_windows() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        limiter.check_at("stale", now);
        limiter.check_at("fresh", now + RATE_LIMIT_WINDOW / 2);

        let removed = limiter.sweep_at(now + RATE_LIMIT_WINDOW);
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);

        // The surviving key keeps its in-window count
        for _ in 0..5 {
            limiter.check_at("fresh", now + RATE_LIMIT_WINDOW / 2);
        }
        assert!(limiter.check_at("fresh", now + RATE_LIMIT_WINDOW / 2));
    }
}
