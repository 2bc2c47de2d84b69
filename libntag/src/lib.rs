// libntag/src/lib.rs

//! libntag
//!
//! Whole-memory reads of NXP NTAG21x tags with optional password
//! authentication, bounded multi-page transfers, and classified outcomes
//! delivered to a hosting application.

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod outcome;
pub mod plan;
pub mod plugin;
pub mod prelude;
pub mod reader;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
