// libntag/src/types.rs

//! Newtypes and small value types shared across the crate.

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;
use crate::constants::{PACK_LEN, PAGE_SIZE};

/// Tag UID - Newtype Pattern (4, 7 or 10 バイト)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uid(Vec<u8>);

impl Uid {
    /// Copy `bytes` into a UID.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Raw UID bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex without separators, e.g. `04a1b2c3d4e580`
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(&self.0)
    }
}

impl From<Vec<u8>> for Uid {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// PWD_AUTH acknowledge (2 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pack([u8; PACK_LEN]);

impl Pack {
    /// Wrap the two PACK bytes.
    pub fn from_bytes(bytes: [u8; PACK_LEN]) -> Self {
        Self(bytes)
    }

    /// The two PACK bytes
    pub fn as_bytes(&self) -> &[u8; PACK_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pack {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PACK_LEN {
            return Err(Error::InvalidLength {
                expected: PACK_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self([bytes[0], bytes[1]]))
    }
}

/// Tag password. An empty password disables authentication.
///
/// Serialized as a plain string so the plugin `init` options carry it
/// as `{"password": "..."}`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Password(Vec<u8>);

impl Password {
    /// Password from raw bytes. NTAG21x passwords are 4 bytes; other
    /// lengths are refused by the tag layer, not here.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The empty password (authentication disabled)
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Password bytes as sent in PWD_AUTH
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True when authentication is disabled
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(<{} bytes>)", self.0.len())
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Password::from(s.as_str()))
    }
}

/// Inclusive page range read in one bounded transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageWindow {
    /// First page of the window
    pub start: usize,
    /// Last page of the window, inclusive
    pub end: usize,
}

impl PageWindow {
    /// Window covering pages `start..=end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of pages covered. An inverted window (`end < start`) covers
    /// none.
    pub fn pages(&self) -> usize {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    /// Bytes a successful read of this window returns
    pub fn byte_len(&self) -> usize {
        self.pages() * PAGE_SIZE
    }
}

impl From<(usize, usize)> for PageWindow {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

/// Tag families the discovery layer can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TagFamily {
    /// NTAG210, 48 bytes of user memory
    #[display(fmt = "NTAG210")]
    Ntag210,
    /// NTAG212, 128 bytes
    #[display(fmt = "NTAG212")]
    Ntag212,
    /// NTAG213, 144 bytes
    #[display(fmt = "NTAG213")]
    Ntag213,
    /// NTAG215, 504 bytes
    #[display(fmt = "NTAG215")]
    Ntag215,
    /// NTAG216, 888 bytes
    #[display(fmt = "NTAG216")]
    Ntag216,
    /// NTAG213 with field detect
    #[display(fmt = "NTAG213F")]
    Ntag213F,
    /// NTAG216 with field detect
    #[display(fmt = "NTAG216F")]
    Ntag216F,
    /// MIFARE Classic (unsupported)
    #[display(fmt = "MIFARE Classic")]
    MifareClassic,
    /// MIFARE Ultralight (unsupported)
    #[display(fmt = "MIFARE Ultralight")]
    MifareUltralight,
    /// MIFARE DESFire (unsupported)
    #[display(fmt = "MIFARE DESFire")]
    MifareDesfire,
    /// ISO 15693 vicinity tag (unsupported)
    #[display(fmt = "ISO 15693")]
    Iso15693,
    /// Anything discovery could not name (unsupported)
    #[display(fmt = "Unknown")]
    Unknown,
}

impl TagFamily {
    /// Families the read engine handles
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Self::Ntag210
                | Self::Ntag212
                | Self::Ntag213
                | Self::Ntag215
                | Self::Ntag216
                | Self::Ntag213F
                | Self::Ntag216F
        )
    }

    /// User memory in bytes, for supported families
    pub fn user_memory_bytes(&self) -> Option<usize> {
        match self {
            Self::Ntag210 => Some(48),
            Self::Ntag212 => Some(128),
            Self::Ntag213 | Self::Ntag213F => Some(144),
            Self::Ntag215 => Some(504),
            Self::Ntag216 | Self::Ntag216F => Some(888),
            _ => None,
        }
    }

    /// Map the GET_VERSION product subtype and storage size bytes to a
    /// family. Subtype `0x04` marks the field-detect (F) variants.
    pub fn from_version(subtype: u8, storage_size: u8) -> Option<Self> {
        match (subtype, storage_size) {
            (0x04, 0x0F) => Some(Self::Ntag213F),
            (0x04, 0x13) => Some(Self::Ntag216F),
            (_, 0x0B) => Some(Self::Ntag210),
            (_, 0x0E) => Some(Self::Ntag212),
            (_, 0x0F) => Some(Self::Ntag213),
            (_, 0x11) => Some(Self::Ntag215),
            (_, 0x13) => Some(Self::Ntag216),
            _ => None,
        }
    }
}
