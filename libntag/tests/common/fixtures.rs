// fixtures.rs: commonly used tag replies and page images

use libntag::types::Uid;

pub fn sample_uid() -> Uid {
    Uid::from_bytes(&hex::decode("04a1b2c3d4e580").unwrap())
}

/// GET_VERSION reply of an NTAG216.
pub fn ntag216_version() -> Vec<u8> {
    hex::decode("0004040201001303").unwrap()
}

/// GET_VERSION reply of an NTAG213.
pub fn ntag213_version() -> Vec<u8> {
    hex::decode("0004040201000f03").unwrap()
}

/// GET_VERSION reply of a MIFARE Ultralight EV1 (product type 0x03).
pub fn ultralight_version() -> Vec<u8> {
    hex::decode("0004030101000b03").unwrap()
}

pub fn pack_reply() -> Vec<u8> {
    vec![0x80, 0x80]
}

/// Page image whose bytes encode their own offset.
pub fn page_image(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
