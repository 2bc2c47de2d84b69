// libntag/src/tag/traits.rs

//! The capability seam between the reader and a concrete tag.

use std::time::Duration;

use crate::Result;
use crate::types::{Pack, Password, Uid};

/// Operations a connected tag must expose to the read engine.
///
/// Every supported family is reached only through this trait; the reader
/// never knows which concrete tag it is talking to beyond `tag_name`.
pub trait TagCapability {
    /// Open the radio session. No retry is attempted on failure.
    fn connect(&mut self) -> Result<()>;

    /// Present `password` and return the tag's acknowledge.
    ///
    /// Transports may report a refused password as a generic I/O failure
    /// rather than a security failure.
    fn authenticate(&mut self, password: &Password) -> Result<Pack>;

    /// Size of the readable user memory in bytes.
    fn free_memory_bytes(&mut self) -> Result<usize>;

    /// Read pages `start..=end`; returns exactly `(end - start + 1) * 4`
    /// bytes on success.
    fn bounded_read(&mut self, start: usize, end: usize) -> Result<Vec<u8>>;

    /// UID of the connected tag.
    fn uid(&self) -> Result<Uid>;

    /// Human-readable family name, e.g. `NTAG216`.
    fn tag_name(&self) -> String;

    /// Release the session.
    fn close(&mut self) -> Result<()>;

    /// Largest window, in pages, one `bounded_read` accepts.
    fn max_pages_per_transfer(&self) -> usize;

    /// Timeout applied to every exchange with the tag from now on.
    fn set_transceive_timeout(&mut self, timeout: Duration);
}

/// Single-use, single-owner handle for one tap.
pub type TagHandle = Box<dyn TagCapability + Send>;
