// libntag/src/transport/envelope.rs

//! Reader-side framing for PC/SC readers built around a PN532: native tag
//! frames travel inside an InCommunicateThru command, which in turn rides a
//! direct-transmit pseudo-APDU.

use crate::constants::{
    APDU_DIRECT_TRANSMIT, PN532_CMD_IN_COMMUNICATE_THRU, PN532_CMD_PREFIX_DEVICE,
    PN532_CMD_PREFIX_HOST, PN532_RESP_IN_COMMUNICATE_THRU, PN532_STATUS_TIMEOUT, SW_SUCCESS,
};
use crate::{Error, Result};

/// Wrap a native tag frame: `FF 00 00 00 Lc D4 42 <frame>`.
pub fn wrap_native(frame: &[u8]) -> Result<Vec<u8>> {
    let inner_len = frame.len() + 2;
    if inner_len > u8::MAX as usize {
        return Err(Error::InvalidLength {
            expected: u8::MAX as usize - 2,
            actual: frame.len(),
        });
    }
    let mut apdu = Vec::with_capacity(5 + inner_len);
    apdu.extend_from_slice(&APDU_DIRECT_TRANSMIT);
    apdu.push(inner_len as u8);
    apdu.push(PN532_CMD_PREFIX_HOST);
    apdu.push(PN532_CMD_IN_COMMUNICATE_THRU);
    apdu.extend_from_slice(frame);
    Ok(apdu)
}

/// Check and strip the trailing `90 00` status word.
pub fn strip_status_word(resp: &[u8]) -> Result<&[u8]> {
    if resp.len() < 2 {
        return Err(Error::InvalidLength {
            expected: 2,
            actual: resp.len(),
        });
    }
    let (body, sw) = resp.split_at(resp.len() - 2);
    if sw != SW_SUCCESS {
        return Err(Error::Io(format!(
            "reader status {:02x}{:02x}",
            sw[0], sw[1]
        )));
    }
    Ok(body)
}

/// Unwrap `D5 43 <status> <tag reply> 90 00` into the tag reply.
///
/// A non-zero PN532 status means the tag did not answer cleanly; the reader
/// cannot tell a refused password from a dropped frame, so both surface as
/// I/O failures.
pub fn unwrap_native(resp: &[u8]) -> Result<Vec<u8>> {
    let body = strip_status_word(resp)?;
    if body.len() < 3 {
        return Err(Error::InvalidLength {
            expected: 3,
            actual: body.len(),
        });
    }
    if body[0] != PN532_CMD_PREFIX_DEVICE || body[1] != PN532_RESP_IN_COMMUNICATE_THRU {
        return Err(Error::UnexpectedResponse(format!(
            "expected d5 43, got {:02x} {:02x}",
            body[0], body[1]
        )));
    }
    match body[2] & 0x3F {
        0x00 => Ok(body[3..].to_vec()),
        PN532_STATUS_TIMEOUT => Err(Error::Timeout),
        status => Err(Error::Io(format!("pn532 status {:#04x}", status))),
    }
}
