use site_gateway::{
    InMemoryRateLimiter,
    rate_limit::{RateLimitState, RateLimitStore},
};
use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

const WINDOW: Duration = Duration::from_secs(3600);

#[test]
fn test_allows_up_to_limit_then_blocks() {
    let limiter = InMemoryRateLimiter::new(3, WINDOW);
    let now = Instant::now();

    assert!(limiter.check_and_record_at("jane@example.com", now));
    assert!(limiter.check_and_record_at("jane@example.com", now));
    assert!(limiter.check_and_record_at("jane@example.com", now));
    assert!(!limiter.check_and_record_at("jane@example.com", now));
}

#[test]
fn test_keys_are_case_folded() {
    let limiter = InMemoryRateLimiter::new(1, WINDOW);
    let now = Instant::now();

    assert!(limiter.check_and_record_at("Jane@Example.com", now));
    assert!(!limiter.check_and_record_at(" jane@example.com ", now));
    assert!(limiter.check_and_record_at("other@example.com", now));
}

#[test]
fn test_window_slides() {
    let limiter = InMemoryRateLimiter::new(2, WINDOW);
    let start = Instant::now();

    assert!(limiter.check_and_record_at("k", start));
    assert!(limiter.check_and_record_at("k", start + Duration::from_secs(1800)));
    assert!(!limiter.check_and_record_at("k", start + Duration::from_secs(3599)));
    // The first attempt has left the window.
    assert!(limiter.check_and_record_at("k", start + Duration::from_secs(3600)));
    assert!(!limiter.check_and_record_at("k", start + Duration::from_secs(3601)));
}

#[test]
fn test_blocked_attempts_do_not_extend_the_window() {
    let limiter = InMemoryRateLimiter::new(1, WINDOW);
    let start = Instant::now();

    assert!(limiter.check_and_record_at("k", start));
    assert!(!limiter.check_and_record_at("k", start + Duration::from_secs(3000)));
    assert!(limiter.check_and_record_at("k", start + Duration::from_secs(3600)));
}

#[test]
fn test_expired_keys_are_pruned() {
    let limiter = InMemoryRateLimiter::new(3, WINDOW);
    let start = Instant::now();

    for i in 0..10 {
        limiter.check_and_record_at(&format!("user{}@example.com", i), start);
    }
    assert_eq!(limiter.tracked_keys(), 10);

    limiter.check_and_record_at("late@example.com", start + WINDOW);
    assert_eq!(limiter.tracked_keys(), 1);
}

#[test]
fn test_concurrent_checks_never_exceed_limit() {
    let limiter: RateLimitState = Arc::new(InMemoryRateLimiter::new(5, WINDOW));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let limiter = limiter.clone();
            thread::spawn(move || limiter.check_and_record("shared@example.com"))
        })
        .collect();

    let allowed = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|allowed| *allowed)
        .count();
    assert_eq!(allowed, 5);
}
