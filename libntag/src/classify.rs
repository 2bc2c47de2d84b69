// libntag/src/classify.rs

//! Error classifier: every failure leaving the reader is reduced to one of
//! four application-facing categories with a stable code and message.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::constants::{
    PASSWORD_AUTH_FAILED_CODE, PASSWORD_AUTH_FAILED_MESSAGE, UNSUPPORTED_TAG_CODE,
};
use crate::error::{Error, ErrorDomain};
use crate::types::TagFamily;

/// Application-facing failure category. Serialized as the `nfcType` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// Authentication refused
    #[display(fmt = "Security")]
    Security,
    /// Link failure while talking to the tag
    #[display(fmt = "IORead")]
    #[serde(rename = "IORead")]
    CardIORead,
    /// Tag answered, but not as the protocol requires
    #[display(fmt = "Card")]
    #[serde(rename = "Card")]
    CardProtocol,
    /// Tag family that is never read
    #[display(fmt = "Unsupported")]
    Unsupported,
}

/// A fully classified failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    /// Reported as `nfcType`
    pub category: ErrorCategory,
    /// Reported as `nfcCode`
    pub code: i32,
    /// Reported as `nfcMessage`
    pub message: String,
}

impl ClassifiedError {
    /// Failure with the given category, code and message
    pub fn new(category: ErrorCategory, code: i32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.category, self.code, self.message)
    }
}

/// Classify `err`. `auth_in_flight` is true while a PWD_AUTH exchange is
/// outstanding; generic I/O failures in that window are password
/// rejections reported by the transport as I/O.
pub fn classify(err: &Error, auth_in_flight: bool) -> ClassifiedError {
    match err.domain() {
        ErrorDomain::Security => {
            ClassifiedError::new(ErrorCategory::Security, err.code(), err.to_string())
        }
        ErrorDomain::Io if auth_in_flight => ClassifiedError::new(
            ErrorCategory::Security,
            PASSWORD_AUTH_FAILED_CODE,
            PASSWORD_AUTH_FAILED_MESSAGE,
        ),
        ErrorDomain::Io => {
            ClassifiedError::new(ErrorCategory::CardIORead, err.code(), err.to_string())
        }
        ErrorDomain::Protocol => {
            ClassifiedError::new(ErrorCategory::CardProtocol, err.code(), err.to_string())
        }
        ErrorDomain::Unsupported => ClassifiedError::new(
            ErrorCategory::Unsupported,
            UNSUPPORTED_TAG_CODE,
            err.to_string(),
        ),
    }
}

/// Outcome for a tag family that is rejected before any connection.
pub fn unsupported(family: TagFamily) -> ClassifiedError {
    classify(&Error::UnsupportedTag(family.to_string()), false)
}
