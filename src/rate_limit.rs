use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

/// RateLimitStore
///
/// Throttles repeated actions per key. `check_and_record` both decides and,
/// when allowed, counts the attempt. Implementations must be safe to call
/// from many worker threads at once.
pub trait RateLimitStore: Send + Sync {
    fn check_and_record(&self, key: &str) -> bool;
}

pub type RateLimitState = Arc<dyn RateLimitStore>;

/// InMemoryRateLimiter
///
/// Sliding-window limiter held in process memory: at most `max_events` per
/// key within any `window`. Timestamps older than the window are pruned on
/// every check. Keys are case-folded, so `A@x.com` and `a@x.com` share a
/// budget.
pub struct InMemoryRateLimiter {
    max_events: usize,
    window: Duration,
    events: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl InMemoryRateLimiter {
    pub fn new(max_events: usize, window: Duration) -> Self {
        Self {
            max_events,
            window,
            events: Mutex::new(HashMap::new()),
        }
    }

    /// `check_and_record` against an explicit clock reading.
    pub fn check_and_record_at(&self, key: &str, now: Instant) -> bool {
        let key = key.trim().to_lowercase();
        // A poisoned map still holds valid timestamps.
        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());

        // Drop keys whose windows have fully expired so the map stays bounded.
        events.retain(|_, stamps| {
            prune(stamps, now, self.window);
            !stamps.is_empty()
        });

        let stamps = events.entry(key).or_default();
        if stamps.len() >= self.max_events {
            return false;
        }
        stamps.push_back(now);
        true
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RateLimitStore for InMemoryRateLimiter {
    fn check_and_record(&self, key: &str) -> bool {
        self.check_and_record_at(key, Instant::now())
    }
}

fn prune(stamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&oldest) = stamps.front() {
        if now.saturating_duration_since(oldest) >= window {
            stamps.pop_front();
        } else {
            break;
        }
    }
}
