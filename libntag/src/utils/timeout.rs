//! Transceive timeout helpers.

use std::time::Duration;

/// Default transceive timeout in milliseconds used when the configuration
/// does not carry one.
pub const DEFAULT_TRANSCEIVE_TIMEOUT_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default transceive timeout as Duration.
pub fn default_transceive_timeout() -> Duration {
    ms(DEFAULT_TRANSCEIVE_TIMEOUT_MS)
}
