// libntag/src/prelude.rs

//! Convenience re-exports for applications embedding the reader.

pub use crate::classify::{ClassifiedError, ErrorCategory};
pub use crate::config::{ReaderConfig, SharedConfig};
pub use crate::outcome::{OutcomeMessage, OutcomeSink, ReadOutcome, TagIdentity};
pub use crate::plan::{MemoryPlan, plan, plan_for_bytes};
pub use crate::plugin::{DetectedTag, PluginResult, RadioStack, TagPlugin};
pub use crate::reader::{ReadState, TagReader};
pub use crate::tag::{Ntag21x, TagCapability, TagHandle};
pub use crate::transport::Transport;
pub use crate::{Error, ErrorDomain, PageWindow, Pack, Password, Result, TagFamily, Uid};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_transceive_timeout, ms};
