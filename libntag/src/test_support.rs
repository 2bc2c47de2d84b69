//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the mock radio stack, an outcome sink that
//! records what it was given, and transports pre-seeded for an NTAG21x
//! read so tests across the crate and tests/ directory share one setup.
#![allow(dead_code)]

use parking_lot::Mutex;

use crate::constants::PAGE_SIZE;
use crate::outcome::{OutcomeSink, ReadOutcome};
use crate::plan::plan;
use crate::plugin::RadioStack;
use crate::transport::mock::MockTransport;
use crate::types::{TagFamily, Uid};
use crate::{Error, Result};

/// Deterministic page image of `len` bytes.
#[doc(hidden)]
pub fn pattern_memory(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Outcome sink that keeps every outcome it receives.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct CollectingSink {
    outcomes: Mutex<Vec<ReadOutcome>>,
}

impl CollectingSink {
    /// Everything emitted so far, oldest first
    pub fn outcomes(&self) -> Vec<ReadOutcome> {
        self.outcomes.lock().clone()
    }
}

impl OutcomeSink for CollectingSink {
    fn emit(&self, outcome: &ReadOutcome) {
        self.outcomes.lock().push(outcome.clone());
    }
}

/// Lifecycle call recorded by [`MockRadio`]
#[doc(hidden)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioCall {
    /// `register`
    Register,
    /// `start_dispatch`
    StartDispatch,
    /// `stop_dispatch`
    StopDispatch,
}

/// Radio stack that records lifecycle calls. `fail_start` makes
/// `start_dispatch` fail.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct MockRadio {
    calls: Mutex<Vec<RadioCall>>,
    /// Fail every `start_dispatch`
    pub fail_start: bool,
}

impl MockRadio {
    /// Radio whose `start_dispatch` always fails
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Recorded calls, oldest first
    pub fn calls(&self) -> Vec<RadioCall> {
        self.calls.lock().clone()
    }
}

impl RadioStack for MockRadio {
    fn register(&self) -> Result<()> {
        self.calls.lock().push(RadioCall::Register);
        Ok(())
    }

    fn start_dispatch(&self) -> Result<()> {
        self.calls.lock().push(RadioCall::StartDispatch);
        if self.fail_start {
            return Err(Error::Io("nfc adapter disabled".into()));
        }
        Ok(())
    }

    fn stop_dispatch(&self) -> Result<()> {
        self.calls.lock().push(RadioCall::StopDispatch);
        Ok(())
    }
}

/// GET_VERSION reply for a supported family.
#[doc(hidden)]
pub fn version_reply(family: TagFamily) -> Option<Vec<u8>> {
    let (subtype, size) = match family {
        TagFamily::Ntag210 => (0x01, 0x0B),
        TagFamily::Ntag212 => (0x01, 0x0E),
        TagFamily::Ntag213 => (0x02, 0x0F),
        TagFamily::Ntag215 => (0x02, 0x11),
        TagFamily::Ntag216 => (0x02, 0x13),
        TagFamily::Ntag213F => (0x04, 0x0F),
        TagFamily::Ntag216F => (0x04, 0x13),
        _ => return None,
    };
    Some(vec![0x00, 0x04, 0x04, subtype, 0x01, 0x00, size, 0x03])
}

/// MockTransport seeded with every reply a full NTAG21x read needs:
/// GET_VERSION, an optional PACK, then one FAST_READ reply per window of
/// `memory` split at `max_pages`.
#[doc(hidden)]
pub fn seeded_ntag_transport(
    uid: Uid,
    family: TagFamily,
    memory: &[u8],
    with_auth: bool,
    max_pages: usize,
) -> Result<MockTransport> {
    let version = version_reply(family)
        .ok_or_else(|| Error::UnsupportedTag(family.to_string()))?;
    let mut mock = MockTransport::new(uid);
    mock.push_response(version);
    if with_auth {
        mock.push_response(vec![0x80, 0x80]);
    }
    for w in plan(memory.len() / PAGE_SIZE, max_pages)?.iter() {
        mock.push_response(memory[w.start * PAGE_SIZE..(w.end + 1) * PAGE_SIZE].to_vec());
    }
    Ok(mock)
}
