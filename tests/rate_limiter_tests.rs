//! # Request Guard Tests
//!
//! Admission control across users, permit lifetimes and window expiry.

use match_forecast::bot_config::RateLimitConfig;
use match_forecast::rate_limiter::{Rejection, RequestGuard};
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    fn create_guard(max_requests: usize, window_secs: u64) -> RequestGuard {
        RequestGuard::new(&RateLimitConfig {
            max_requests,
            window_secs,
            ..RateLimitConfig::default()
        })
    }

    #[test]
    fn test_users_are_tracked_independently() {
        let guard = create_guard(1, 60);

        let first = guard.try_acquire(1).unwrap();
        let second = guard.try_acquire(2).unwrap();
        assert!(guard.is_in_flight(1));
        assert!(guard.is_in_flight(2));

        drop(first);
        assert!(!guard.is_in_flight(1));
        assert!(guard.is_in_flight(2));
        drop(second);
    }

    #[test]
    fn test_busy_takes_precedence_over_rate_limit() {
        let guard = create_guard(1, 60);

        let _permit = guard.try_acquire(7).unwrap();
        assert_eq!(guard.try_acquire(7).unwrap_err(), Rejection::Busy);
    }

    #[test]
    fn test_rate_limited_reports_retry_after() {
        let guard = create_guard(2, 60);

        drop(guard.try_acquire(3).unwrap());
        drop(guard.try_acquire(3).unwrap());

        match guard.try_acquire(3) {
            Err(Rejection::RateLimited { retry_after }) => {
                assert!(retry_after <= Duration::from_secs(60));
                assert!(retry_after > Duration::from_secs(50));
            }
            other => panic!("Expected rate limit rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rejected_message_does_not_use_window_slot() {
        let guard = create_guard(2, 60);

        let permit = guard.try_acquire(4).unwrap();
        assert_eq!(guard.try_acquire(4).unwrap_err(), Rejection::Busy);
        drop(permit);

        // The busy rejection above was not counted
        assert!(guard.try_acquire(4).is_ok());
    }

    #[test]
    fn test_permit_released_across_threads() {
        let guard = create_guard(5, 60);
        let permit = guard.try_acquire(9).unwrap();

        let handle = std::thread::spawn(move || drop(permit));
        handle.join().unwrap();

        assert!(!guard.is_in_flight(9));
        assert!(guard.try_acquire(9).is_ok());
    }

    #[test]
    fn test_zero_window_never_limits() {
        let guard = create_guard(1, 0);

        drop(guard.try_acquire(5).unwrap());
        drop(guard.try_acquire(5).unwrap());
        assert_eq!(guard.sweep(), 1);
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::Busy.to_string(),
            "a previous request is still being processed"
        );
        assert_eq!(
            Rejection::RateLimited {
                retry_after: Duration::from_secs(12)
            }
            .to_string(),
            "rate limit exceeded, retry in 12s"
        );
    }
}
