// libntag/src/outcome.rs

//! Terminal outcome of one tap and the sinks that deliver it.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use crate::classify::{ClassifiedError, ErrorCategory};
use crate::constants::{EVENT_TAG_DETECTED, EVENT_TAG_ERROR};
use crate::types::Uid;

/// Identity of a tag that was read successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagIdentity {
    /// Tag UID as reported by the transport
    pub uid: Uid,
    /// Family name, e.g. `NTAG216`
    pub name: String,
}

/// Exactly one of these is produced per tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Whole user memory was read
    Success {
        /// Which tag was read
        identity: TagIdentity,
        /// User memory, page 0 first
        payload: Vec<u8>,
    },
    /// The read ended with a classified failure
    Failure(ClassifiedError),
}

impl ReadOutcome {
    /// True for [`ReadOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, ReadOutcome::Success { .. })
    }

    /// Boundary message for this outcome.
    pub fn to_message(&self) -> OutcomeMessage {
        match self {
            ReadOutcome::Success { identity, payload } => {
                OutcomeMessage::Success(SuccessMessage {
                    tag_uid: identity.uid.as_bytes().to_vec(),
                    tag_name: identity.name.clone(),
                    payload: payload.clone(),
                })
            }
            ReadOutcome::Failure(err) => OutcomeMessage::Failure(FailureMessage::from(err)),
        }
    }

    /// Web view event this outcome is delivered as.
    pub fn event_name(&self) -> &'static str {
        if self.is_success() {
            EVENT_TAG_DETECTED
        } else {
            EVENT_TAG_ERROR
        }
    }
}

impl From<ClassifiedError> for ReadOutcome {
    fn from(err: ClassifiedError) -> Self {
        ReadOutcome::Failure(err)
    }
}

/// `{ "tagUID": [..], "tagName": "..", "payload": [..] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessMessage {
    /// UID bytes
    #[serde(rename = "tagUID")]
    pub tag_uid: Vec<u8>,
    /// Family name
    #[serde(rename = "tagName")]
    pub tag_name: String,
    /// User memory bytes
    pub payload: Vec<u8>,
}

/// `{ "nfcType": "..", "nfcCode": n, "nfcMessage": ".." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureMessage {
    /// Failure category
    pub nfc_type: ErrorCategory,
    /// Stable failure code
    pub nfc_code: i32,
    /// Human-readable description
    pub nfc_message: String,
}

impl From<&ClassifiedError> for FailureMessage {
    fn from(err: &ClassifiedError) -> Self {
        Self {
            nfc_type: err.category,
            nfc_code: err.code,
            nfc_message: err.message.clone(),
        }
    }
}

/// Structured message handed to the application boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutcomeMessage {
    /// Sent with `onTagDetected`
    Success(SuccessMessage),
    /// Sent with `onTagError`
    Failure(FailureMessage),
}

impl OutcomeMessage {
    /// Serialize as the JSON object the web view receives
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Fire-and-forget delivery of outcomes to the application.
pub trait OutcomeSink: Send + Sync {
    /// Deliver one outcome. Must not block for long.
    fn emit(&self, outcome: &ReadOutcome);
}

/// Forwards boundary messages over an mpsc channel. A dropped receiver is
/// logged and otherwise ignored.
pub struct ChannelSink {
    tx: parking_lot::Mutex<Sender<OutcomeMessage>>,
}

impl ChannelSink {
    /// Sink sending on `tx`
    pub fn new(tx: Sender<OutcomeMessage>) -> Self {
        Self {
            tx: parking_lot::Mutex::new(tx),
        }
    }
}

impl OutcomeSink for ChannelSink {
    fn emit(&self, outcome: &ReadOutcome) {
        if self.tx.lock().send(outcome.to_message()).is_err() {
            log::warn!("outcome receiver dropped; {} discarded", outcome.event_name());
        }
    }
}

/// Renders each outcome as a `cordova.fireDocumentEvent(..)` script and
/// hands it to `post`, which runs it on the web view.
pub struct ScriptEventSink<F> {
    post: F,
}

impl<F> ScriptEventSink<F>
where
    F: Fn(String) + Send + Sync,
{
    /// Sink posting scripts through `post`
    pub fn new(post: F) -> Self {
        Self { post }
    }
}

/// `javascript:cordova.fireDocumentEvent('<event>', <json>);`
pub fn document_event_script(event: &str, json: &str) -> String {
    format!(
        "javascript:cordova.fireDocumentEvent('{}', {});",
        event, json
    )
}

impl<F> OutcomeSink for ScriptEventSink<F>
where
    F: Fn(String) + Send + Sync,
{
    fn emit(&self, outcome: &ReadOutcome) {
        match outcome.to_message().to_json() {
            Ok(json) => {
                let script = document_event_script(outcome.event_name(), &json);
                log::debug!("posting {} to web view", outcome.event_name());
                (self.post)(script);
            }
            Err(e) => log::error!("failed to serialize outcome: {}", e),
        }
    }
}
