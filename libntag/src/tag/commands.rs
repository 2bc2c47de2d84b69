// libntag/src/tag/commands.rs

//! NTAG21x command frames and reply checks.

use crate::constants::{
    CMD_FAST_READ, CMD_GET_VERSION, CMD_PWD_AUTH, PACK_LEN, PAGE_SIZE, PASSWORD_LEN,
    PRODUCT_TYPE_NTAG, VENDOR_NXP, VERSION_LEN,
};
use crate::types::TagFamily;
use crate::{Error, Result};

/// NTAG21x native commands used by the read engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// GET_VERSION (0x60)
    GetVersion,
    /// FAST_READ (0x3A) of pages `start..=end`
    FastRead {
        /// First page
        start: u8,
        /// Last page, inclusive
        end: u8,
    },
    /// PWD_AUTH (0x1B)
    PwdAuth {
        /// 4-byte password sent in the clear
        password: [u8; PASSWORD_LEN],
    },
}

impl Command {
    /// Leading command byte
    pub fn command_code(&self) -> u8 {
        match self {
            Command::GetVersion => CMD_GET_VERSION,
            Command::FastRead { .. } => CMD_FAST_READ,
            Command::PwdAuth { .. } => CMD_PWD_AUTH,
        }
    }

    /// Frame as sent to the tag
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Command::GetVersion => vec![CMD_GET_VERSION],
            Command::FastRead { start, end } => vec![CMD_FAST_READ, *start, *end],
            Command::PwdAuth { password } => {
                let mut v = Vec::with_capacity(1 + PASSWORD_LEN);
                v.push(CMD_PWD_AUTH);
                v.extend_from_slice(password);
                v
            }
        }
    }

    /// Reply length on success
    pub fn expected_len(&self) -> usize {
        match self {
            Command::GetVersion => VERSION_LEN,
            Command::FastRead { start, end } => {
                (*end as usize).saturating_sub(*start as usize).saturating_add(1) * PAGE_SIZE
            }
            Command::PwdAuth { .. } => PACK_LEN,
        }
    }
}

/// A one-byte reply whose low nibble is not the ACK value `0xA`.
pub fn is_nak(resp: &[u8]) -> bool {
    resp.len() == 1 && resp[0] & 0x0F != 0x0A
}

/// Check a reply against the command that produced it: NAKs become
/// `Error::Nak`, wrong lengths `Error::InvalidLength`.
pub fn check_reply(cmd: &Command, resp: &[u8]) -> Result<()> {
    if is_nak(resp) {
        return Err(Error::Nak {
            command: cmd.command_code(),
            nak: resp[0],
        });
    }
    let expected = cmd.expected_len();
    if resp.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: resp.len(),
        });
    }
    Ok(())
}

/// Parsed GET_VERSION reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Vendor id, 0x04 for NXP
    pub vendor: u8,
    /// 0x04 for NTAG
    pub product_type: u8,
    /// Distinguishes NTAG21x (0x02) from NTAG21xF (0x04)
    pub product_subtype: u8,
    /// Major product version
    pub major: u8,
    /// Minor product version
    pub minor: u8,
    /// Encoded user memory size (0x0F: 144 bytes, 0x13: 888 bytes, ...)
    pub storage_size: u8,
    /// Protocol type, 0x03 for ISO 14443-3
    pub protocol: u8,
}

impl Version {
    /// Parse an 8-byte GET_VERSION reply.
    pub fn parse(resp: &[u8]) -> Result<Self> {
        if resp.len() != VERSION_LEN {
            return Err(Error::InvalidLength {
                expected: VERSION_LEN,
                actual: resp.len(),
            });
        }
        Ok(Self {
            vendor: resp[1],
            product_type: resp[2],
            product_subtype: resp[3],
            major: resp[4],
            minor: resp[5],
            storage_size: resp[6],
            protocol: resp[7],
        })
    }

    /// NTAG21x family this version identifies. Non-NXP or non-NTAG
    /// products are unsupported.
    pub fn family(&self) -> Result<TagFamily> {
        if self.vendor != VENDOR_NXP || self.product_type != PRODUCT_TYPE_NTAG {
            return Err(Error::UnsupportedTag(format!(
                "vendor {:#04x} product type {:#04x}",
                self.vendor, self.product_type
            )));
        }
        TagFamily::from_version(self.product_subtype, self.storage_size).ok_or_else(|| {
            Error::UnsupportedTag(format!("NTAG storage size {:#04x}", self.storage_size))
        })
    }
}
