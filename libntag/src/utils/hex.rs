//! Hexadecimal helpers used when logging UIDs, frames and payloads.

use std::fmt::Write;

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0x04, 0xad]` -> `"04ad"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! into a String cannot fail
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0x3a, 0x00]` -> `"3a 00"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Spaced hex dump capped at `limit` bytes, with the total length appended
/// when the buffer was cut. Tag payloads run to hundreds of bytes and only
/// the head is useful in a log line.
pub fn dump_bytes(bytes: &[u8], limit: usize) -> String {
    if bytes.len() <= limit {
        return bytes_to_hex_spaced(bytes);
    }
    format!(
        "{} .. ({} bytes)",
        bytes_to_hex_spaced(&bytes[..limit]),
        bytes.len()
    )
}
