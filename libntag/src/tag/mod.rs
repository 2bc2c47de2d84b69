// libntag/src/tag/mod.rs

//! Capability layer: what a connected tag must offer the reader, the
//! NTAG21x command set implementing it, and a mock for tests.

pub mod commands;
pub mod mock;
pub mod ntag;
pub mod traits;

pub use mock::{CallLog, MockTag, TagCall};
pub use ntag::Ntag21x;
pub use traits::{TagCapability, TagHandle};
