// libntag/src/config.rs

//! Session configuration: the tag password and the transfer bound.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_PAGES_PER_TRANSFER;
use crate::types::Password;
use crate::utils::DEFAULT_TRANSCEIVE_TIMEOUT_MS;
use crate::{Error, Result};

/// Reader configuration, deserializable from the plugin `init` options
/// (`{"password": "..."}`; missing fields take their defaults).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReaderConfig {
    /// Empty disables authentication
    pub password: Password,
    /// Largest window one bounded read may cover
    pub max_pages_per_transfer: usize,
    /// Per-exchange timeout handed to the tag before connecting
    pub transceive_timeout_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            password: Password::empty(),
            max_pages_per_transfer: DEFAULT_MAX_PAGES_PER_TRANSFER,
            transceive_timeout_ms: DEFAULT_TRANSCEIVE_TIMEOUT_MS,
        }
    }
}

impl ReaderConfig {
    /// Replace the password
    pub fn with_password(mut self, password: impl Into<Password>) -> Self {
        self.password = password.into();
        self
    }

    /// Replace the transfer bound
    pub fn with_max_pages_per_transfer(mut self, max: usize) -> Self {
        self.max_pages_per_transfer = max;
        self
    }

    /// Reject a zero transfer bound.
    pub fn validate(&self) -> Result<()> {
        if self.max_pages_per_transfer == 0 {
            return Err(Error::InvalidConfig(
                "maxPagesPerTransfer must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate plugin options.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let config: ReaderConfig = serde_json::from_value(value.clone())
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Cloneable handle to the session configuration.
///
/// Writers replace the whole configuration; readers take a snapshot, so a
/// read in progress keeps the configuration it started with.
#[derive(Debug, Clone, Default)]
pub struct SharedConfig(Arc<RwLock<ReaderConfig>>);

impl SharedConfig {
    /// Share `config`; it is not validated here.
    pub fn new(config: ReaderConfig) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> ReaderConfig {
        self.0.read().clone()
    }

    /// Validate and install `config`. The last writer wins.
    pub fn replace(&self, config: ReaderConfig) -> Result<()> {
        config.validate()?;
        *self.0.write() = config;
        Ok(())
    }
}
