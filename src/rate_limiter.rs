//! Per-user admission control for incoming messages.
//!
//! [`RequestGuard`] combines two checks: a user may have only one message
//! in fulfillment at a time, and at most `max_requests` accepted messages
//! within a sliding window.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::bot_config::RateLimitConfig;

/// Why a message was not admitted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("a previous request is still being processed")]
    Busy,

    #[error("rate limit exceeded, retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },
}

#[derive(Debug, Default)]
struct GuardState {
    in_flight: HashSet<i64>,
    windows: HashMap<i64, VecDeque<Instant>>,
}

/// Shared admission state, cloned into every handler
#[derive(Debug, Clone)]
pub struct RequestGuard {
    state: Arc<Mutex<GuardState>>,
    max_requests: usize,
    window: Duration,
}

/// Marks a user's message as in fulfillment until dropped
#[derive(Debug)]
pub struct InFlightPermit {
    user_id: i64,
    state: Arc<Mutex<GuardState>>,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.state.lock().in_flight.remove(&self.user_id);
        debug!(user_id = self.user_id, "Released in-flight slot");
    }
}

impl RequestGuard {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(GuardState::default())),
            max_requests: config.max_requests.max(1),
            window: Duration::from_secs(config.window_secs),
        }
    }

    /// Admit a message from `user_id`
    pub fn try_acquire(&self, user_id: i64) -> Result<InFlightPermit, Rejection> {
        let mut state = self.state.lock();
        if state.in_flight.contains(&user_id) {
            return Err(Rejection::Busy);
        }

        let now = Instant::now();
        let window = self.window;
        let timestamps = state.windows.entry(user_id).or_default();
        while timestamps
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            let retry_after = timestamps
                .front()
                .map(|oldest| window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(window);
            return Err(Rejection::RateLimited { retry_after });
        }

        timestamps.push_back(now);
        state.in_flight.insert(user_id);

        Ok(InFlightPermit {
            user_id,
            state: Arc::clone(&self.state),
        })
    }

    /// Drop window entries older than the window; returns users forgotten
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let window = self.window;
        let mut state = self.state.lock();
        let before = state.windows.len();

        state.windows.retain(|_, timestamps| {
            timestamps.retain(|at| now.duration_since(*at) < window);
            !timestamps.is_empty()
        });

        before - state.windows.len()
    }

    pub fn is_in_flight(&self, user_id: i64) -> bool {
        self.state.lock().in_flight.contains(&user_id)
    }
}
