// libntag/src/transport/traits.rs

//! Abstraction over the raw link a tag is reached through.

use std::time::Duration;

use crate::Result;
use crate::types::Uid;

/// Default ISO 14443-3A transceive buffer reported by mobile radio stacks.
pub const DEFAULT_MAX_TRANSCEIVE_LEN: usize = 253;

/// Transport trait abstracts the radio link away from the tag command set.
///
/// A transport carries native tag frames (e.g. `3A 00 3E`) to one tag and
/// returns the raw reply with any reader framing already stripped.
pub trait Transport {
    /// Open the radio session with the tag in the field
    fn connect(&mut self) -> Result<()>;

    /// Send one native frame and receive the tag's reply, waiting at most
    /// `timeout`
    fn transceive(&mut self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>>;

    /// UID reported by anticollision
    fn uid(&self) -> Result<Uid>;

    /// Whether `connect` succeeded and `close` has not been called since
    fn is_connected(&self) -> bool;

    /// Release the radio session
    fn close(&mut self) -> Result<()>;

    /// Largest reply the link can carry in one transceive. Defaults to the
    /// common mobile NFC-A buffer size.
    fn max_transceive_length(&self) -> usize {
        DEFAULT_MAX_TRANSCEIVE_LEN
    }
}
