// libntag/src/transport/mod.rs

//! Raw links to a tag: the `Transport` trait, a mock, the PN532 envelope
//! and the PC/SC reader.

pub mod envelope;
pub mod mock;
#[cfg(feature = "pcsc")]
pub mod pcsc_reader;
pub mod traits;

pub use mock::MockTransport;
#[cfg(feature = "pcsc")]
pub use pcsc_reader::PcscTransport;
pub use traits::Transport;
