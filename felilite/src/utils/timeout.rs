//! Response-wait helpers.
//!
//! The crate owns no timers; the wait is handed to the transport, which
//! applies it to every exchange.

use std::time::Duration;

/// Default time the transport waits for a card response.
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default response timeout as Duration.
pub fn default_response_timeout() -> Duration {
    ms(DEFAULT_RESPONSE_TIMEOUT_MS)
}
