// libntag/src/constants.rs
//! Common protocol constants used across the crate

/// Bytes per Type-2 tag page
pub const PAGE_SIZE: usize = 4;

/// Last page a whole-memory NTAG216 read reaches
pub const NTAG216_MEMORY_PAGES: usize = 221;

/// Largest FAST_READ window that fits a 253-byte transceive buffer
pub const DEFAULT_MAX_PAGES_PER_TRANSFER: usize = 0x3F;

/// `nfcCode` reported for tag families that are never read
pub const UNSUPPORTED_TAG_CODE: i32 = -1;

/// `nfcCode` reported when an I/O failure during PWD_AUTH is reclassified
pub const PASSWORD_AUTH_FAILED_CODE: i32 = -2;

/// `nfcMessage` for the reclassified authentication failure
pub const PASSWORD_AUTH_FAILED_MESSAGE: &str = "Password authentication failed";

/// GET_VERSION command code
pub const CMD_GET_VERSION: u8 = 0x60;
/// FAST_READ command code
pub const CMD_FAST_READ: u8 = 0x3A;
/// PWD_AUTH command code
pub const CMD_PWD_AUTH: u8 = 0x1B;

/// Length of a PWD_AUTH password
pub const PASSWORD_LEN: usize = 4;
/// Length of the PACK returned by PWD_AUTH
pub const PACK_LEN: usize = 2;

/// GET_VERSION response length
pub const VERSION_LEN: usize = 8;

/// NXP vendor id in GET_VERSION byte 1
pub const VENDOR_NXP: u8 = 0x04;

/// Product type byte for NTAG in GET_VERSION byte 2
pub const PRODUCT_TYPE_NTAG: u8 = 0x04;

/// Web view event for a successful read
pub const EVENT_TAG_DETECTED: &str = "onTagDetected";
/// Web view event for a classified failure
pub const EVENT_TAG_ERROR: &str = "onTagError";

/// Plugin action installing the session configuration
pub const ACTION_INIT: &str = "init";
/// Reserved plugin action
pub const ACTION_WRITE_TAG: &str = "writeTag";

/// PN532 host->device prefix
pub const PN532_CMD_PREFIX_HOST: u8 = 0xD4;
/// PN532 device->host prefix
pub const PN532_CMD_PREFIX_DEVICE: u8 = 0xD5;

/// PN532 InCommunicateThru command code
pub const PN532_CMD_IN_COMMUNICATE_THRU: u8 = 0x42;
/// PN532 InCommunicateThru response code
pub const PN532_RESP_IN_COMMUNICATE_THRU: u8 = 0x43;

/// PN532 status reported when the target did not answer in time
pub const PN532_STATUS_TIMEOUT: u8 = 0x01;

/// PC/SC direct-transmit pseudo-APDU header (ACR122-class readers)
pub const APDU_DIRECT_TRANSMIT: [u8; 4] = [0xFF, 0x00, 0x00, 0x00];
/// PC/SC GET DATA (UID) pseudo-APDU
pub const APDU_GET_UID: [u8; 5] = [0xFF, 0xCA, 0x00, 0x00, 0x00];

/// ISO 7816 success status word
pub const SW_SUCCESS: [u8; 2] = [0x90, 0x00];
