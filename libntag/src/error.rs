// libntag/src/error.rs

//! Crate-wide error type and the domains the classifier sorts it into.

use thiserror::Error;

/// Which side of the radio link a failure belongs to.
///
/// The classifier only looks at the domain (and, for `Io`, whether an
/// authentication exchange was in flight); it never inspects messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDomain {
    /// Generic transport I/O: lost tag, timeout, broken session.
    Io,
    /// Authentication or authorization refused by the tag or reader.
    Security,
    /// The tag answered but not the way the command set says it should.
    Protocol,
    /// The tag family is not handled at all.
    Unsupported,
}

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transport failure without a more specific cause
    #[error("i/o error: {0}")]
    Io(String),

    /// No reply within the transceive timeout
    #[error("operation timed out")]
    Timeout,

    /// The tag left the field
    #[error("tag was lost")]
    TagLost,

    /// Command issued before `connect` or after `close`
    #[error("tag is not connected")]
    NotConnected,

    /// PWD_AUTH answered with a NAK
    #[error("password rejected by tag (nak={nak:#03x})")]
    AuthenticationRejected {
        /// NAK byte returned by the tag
        nak: u8,
    },

    /// Password is not 4 bytes
    #[error("invalid password length: expected 4, got {len}")]
    InvalidPassword {
        /// Length that was supplied
        len: usize,
    },

    /// Security condition reported by the reader
    #[error("security error: {0}")]
    Security(String),

    /// A command other than PWD_AUTH answered with a NAK
    #[error("tag replied nak {nak:#03x} to command {command:#04x}")]
    Nak {
        /// Command code that was refused
        command: u8,
        /// NAK byte returned by the tag
        nak: u8,
    },

    /// Reply shorter or longer than the command requires
    #[error("invalid response length: expected {expected}, got {actual}")]
    #[allow(missing_docs)]
    InvalidLength { expected: usize, actual: usize },

    /// Reply framing did not match the command
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Window larger than one transfer may carry
    #[error("read window of {pages} pages exceeds transfer limit of {max}")]
    #[allow(missing_docs)]
    WindowTooLarge { pages: usize, max: usize },

    /// Window with `end < start` or past the addressable pages
    #[error("invalid page window {start}..={end}")]
    #[allow(missing_docs)]
    InvalidWindow { start: usize, end: usize },

    /// Other protocol violation
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Tag family or product the read engine does not handle
    #[error("unsupported tag: {0}")]
    UnsupportedTag(String),

    /// Configuration rejected by validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reserved action
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl Error {
    /// Domain this failure belongs to.
    pub fn domain(&self) -> ErrorDomain {
        match self {
            Error::Io(_) | Error::Timeout | Error::TagLost | Error::NotConnected => ErrorDomain::Io,
            Error::AuthenticationRejected { .. }
            | Error::InvalidPassword { .. }
            | Error::Security(_) => ErrorDomain::Security,
            Error::UnsupportedTag(_) => ErrorDomain::Unsupported,
            Error::Nak { .. }
            | Error::InvalidLength { .. }
            | Error::UnexpectedResponse(_)
            | Error::WindowTooLarge { .. }
            | Error::InvalidWindow { .. }
            | Error::Protocol(_)
            | Error::InvalidConfig(_)
            | Error::NotImplemented(_) => ErrorDomain::Protocol,
        }
    }

    /// Stable numeric code reported to the application as `nfcCode`.
    pub fn code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::Timeout => 2,
            Error::TagLost => 3,
            Error::NotConnected => 4,
            Error::AuthenticationRejected { .. } => 10,
            Error::InvalidPassword { .. } => 11,
            Error::Security(_) => 12,
            Error::Nak { .. } => 20,
            Error::InvalidLength { .. } => 21,
            Error::UnexpectedResponse(_) => 22,
            Error::WindowTooLarge { .. } => 23,
            Error::InvalidWindow { .. } => 24,
            Error::Protocol(_) => 25,
            Error::InvalidConfig(_) => 30,
            Error::NotImplemented(_) => 31,
            Error::UnsupportedTag(_) => crate::constants::UNSUPPORTED_TAG_CODE,
        }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
