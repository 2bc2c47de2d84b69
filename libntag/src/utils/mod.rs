//! Small helpers shared across the crate: hex dumps for log lines and
//! transceive timeout defaults.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
