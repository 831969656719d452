//! Retry with exponential backoff for upstream calls.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::bot_config::RecoveryConfig;
use crate::circuit_breaker::CircuitBreaker;
use crate::service_errors::ServiceError;

/// Delay before retry number `attempt` (1-based), in milliseconds
///
/// The base delay doubles per attempt up to `max_retry_delay_ms`, plus up to
/// 10% random jitter.
pub fn calculate_retry_delay(attempt: u32, config: &RecoveryConfig) -> u64 {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = config
        .base_retry_delay_ms
        .saturating_mul(1u64 << exponent)
        .min(config.max_retry_delay_ms);
    let jitter = rand::thread_rng().gen_range(0..=delay / 10);
    delay + jitter
}

/// Run `operation` with a timeout per attempt, retrying transient failures
///
/// Fails fast with [`ServiceError::CircuitOpen`] while `breaker` is open.
/// The breaker records one failure per exhausted call, not per attempt.
pub async fn with_retry<T, F, Fut>(
    service: &'static str,
    config: &RecoveryConfig,
    breaker: &CircuitBreaker,
    mut operation: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    if breaker.is_open() {
        warn!(service, "Circuit breaker open, skipping call");
        return Err(ServiceError::CircuitOpen { service });
    }

    let timeout = Duration::from_secs(config.operation_timeout_secs);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = match tokio::time::timeout(timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout {
                secs: config.operation_timeout_secs,
            }),
        };

        match result {
            Ok(value) => {
                if attempt > 1 {
                    debug!(service, attempt, "Call succeeded after retry");
                }
                breaker.record_success();
                return Ok(value);
            }
            Err(error) if error.is_transient() && attempt <= config.max_retries => {
                let delay = calculate_retry_delay(attempt, config);
                warn!(service, attempt, delay_ms = delay, error = %error, "Transient failure, retrying");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            Err(error) => {
                breaker.record_failure();
                return Err(error);
            }
        }
    }
}
