//! # Circuit Breaker Module
//!
//! Stops calls to an upstream service after repeated failures and lets them
//! through again once the reset period has elapsed.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::bot_config::RecoveryConfig;

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure: Option<Instant>,
}

/// Circuit breaker for one upstream service
///
/// # State Machine
///
/// - **Closed**: calls pass through
/// - **Open**: `circuit_breaker_threshold` consecutive failures seen, calls
///   fail fast until `circuit_breaker_reset_secs` have passed since the last
///   failure
///
/// After the reset period the breaker closes and the failure count starts
/// over.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// # Examples
    ///
    /// ```rust
    /// use match_forecast::bot_config::RecoveryConfig;
    /// use match_forecast::circuit_breaker::CircuitBreaker;
    ///
    /// let breaker = CircuitBreaker::new(&RecoveryConfig::default());
    /// assert!(!breaker.is_open());
    /// ```
    pub fn new(config: &RecoveryConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold: config.circuit_breaker_threshold.max(1),
            reset_after: Duration::from_secs(config.circuit_breaker_reset_secs),
        }
    }

    /// Whether calls should be refused right now
    pub fn is_open(&self) -> bool {
        let mut state = self.state.lock();
        if state.failure_count < self.threshold {
            return false;
        }
        match state.last_failure {
            Some(last) if last.elapsed() < self.reset_after => true,
            _ => {
                *state = BreakerState::default();
                false
            }
        }
    }

    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure = Some(Instant::now());
    }

    pub fn record_success(&self) {
        *self.state.lock() = BreakerState::default();
    }

    pub fn failure_count(&self) -> u32 {
        self.state.lock().failure_count
    }
}
