// libntag/src/reader.rs

//! Read orchestrator: runs one tap from connect to a classified outcome.

use derive_more::Display;

use crate::classify::{self, ClassifiedError};
use crate::config::ReaderConfig;
use crate::error::ErrorDomain;
use crate::outcome::{OutcomeSink, ReadOutcome, TagIdentity};
use crate::plan;
use crate::tag::{TagCapability, TagHandle};
use crate::types::Password;
use crate::utils::{dump_bytes, ms};
use crate::{Error, Result};

/// States of one read attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReadState {
    /// Nothing sent yet
    Idle,
    /// Opening the link
    Connecting,
    /// Presenting the password
    Authenticating,
    /// Querying free memory and splitting it into windows
    Planning,
    /// Running bounded reads
    Reading,
    /// Fetching the tag identity
    Assembling,
    /// Terminal; the tag has been released
    Done,
}

/// Per-attempt state. Built fresh for every tap and never shared.
struct Attempt {
    state: ReadState,
    auth_in_flight: bool,
    password: Password,
    max_pages_per_transfer: usize,
    transceive_timeout_ms: u64,
}

impl Attempt {
    fn new(config: &ReaderConfig) -> Self {
        Self {
            state: ReadState::Idle,
            auth_in_flight: false,
            password: config.password.clone(),
            max_pages_per_transfer: config.max_pages_per_transfer,
            transceive_timeout_ms: config.transceive_timeout_ms,
        }
    }

    fn transition(&mut self, next: ReadState) {
        log::debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    fn run(&mut self, tag: &mut dyn TagCapability) -> Result<(TagIdentity, Vec<u8>)> {
        self.transition(ReadState::Connecting);
        tag.set_transceive_timeout(ms(self.transceive_timeout_ms));
        tag.connect()?;

        if !self.password.is_empty() {
            self.transition(ReadState::Authenticating);
            self.authenticate(tag)?;
        }

        self.transition(ReadState::Planning);
        let free = tag.free_memory_bytes()?;
        // Windows must fit both the session bound and what the tag's link
        // accepts.
        let bound = self.max_pages_per_transfer.min(tag.max_pages_per_transfer());
        let plan = plan::plan_for_bytes(free, bound)?;
        log::debug!(
            "{} bytes free, {} pages in {} windows of at most {}",
            free,
            plan.num_pages(),
            plan.len(),
            bound
        );

        self.transition(ReadState::Reading);
        let mut payload = Vec::with_capacity(plan.total_bytes());
        for window in &plan {
            let chunk = tag.bounded_read(window.start, window.end)?;
            if chunk.len() != window.byte_len() {
                return Err(Error::InvalidLength {
                    expected: window.byte_len(),
                    actual: chunk.len(),
                });
            }
            payload.extend_from_slice(&chunk);
        }

        self.transition(ReadState::Assembling);
        let identity = TagIdentity {
            uid: tag.uid()?,
            name: tag.tag_name(),
        };
        Ok((identity, payload))
    }

    fn authenticate(&mut self, tag: &mut dyn TagCapability) -> Result<()> {
        self.auth_in_flight = true;
        match tag.authenticate(&self.password) {
            Ok(pack) => {
                self.auth_in_flight = false;
                log::info!(
                    "password accepted, pack {}",
                    crate::utils::bytes_to_hex(pack.as_bytes())
                );
                Ok(())
            }
            Err(err) => {
                // I/O failures keep the flag set so the classifier can
                // report them as a refused password.
                if err.domain() == ErrorDomain::Security {
                    self.auth_in_flight = false;
                }
                Err(err)
            }
        }
    }
}

/// Drives the read state machine for one tag at a time.
#[derive(Debug, Clone)]
pub struct TagReader {
    config: ReaderConfig,
}

impl TagReader {
    /// Reader running every attempt with `config`.
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Configuration each attempt starts from
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read the whole user memory of `tag`.
    ///
    /// The tag is closed before this returns whatever happened; a failing
    /// close is logged and does not change the outcome.
    pub fn read(&self, mut tag: TagHandle) -> ReadOutcome {
        let mut attempt = Attempt::new(&self.config);
        let result = attempt.run(&mut *tag);
        let failed_in = attempt.state;
        attempt.transition(ReadState::Done);

        if let Err(e) = tag.close() {
            log::warn!("closing tag failed: {}", e);
        }

        match result {
            Ok((identity, payload)) => {
                log::info!(
                    "read {} uid={} {} bytes: {}",
                    identity.name,
                    identity.uid.to_hex(),
                    payload.len(),
                    dump_bytes(&payload, 16)
                );
                ReadOutcome::Success { identity, payload }
            }
            Err(err) => {
                let classified: ClassifiedError = classify::classify(&err, attempt.auth_in_flight);
                log::info!("read failed in {}: {} ({})", failed_in, classified, err);
                ReadOutcome::Failure(classified)
            }
        }
    }

    /// [`TagReader::read`], then hand the outcome to `sink`.
    pub fn read_and_emit(&self, tag: TagHandle, sink: &dyn OutcomeSink) -> ReadOutcome {
        let outcome = self.read(tag);
        sink.emit(&outcome);
        outcome
    }
}
