#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use libntag::tag::commands::{Command, Version, check_reply};
use libntag::tag::{Ntag21x, TagCapability};
use libntag::transport::MockTransport;
use libntag::{Error, Password, TagFamily};

fn connected(version: Vec<u8>, max_pages: usize) -> Ntag21x<MockTransport> {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(version);
    let mut tag = Ntag21x::new(transport, max_pages);
    tag.connect().unwrap();
    tag
}

#[test]
fn connect_identifies_family_and_memory() {
    let mut tag = connected(ntag216_version(), 0x3F);
    assert_eq!(tag.family(), Some(TagFamily::Ntag216));
    assert_eq!(tag.free_memory_bytes().unwrap(), 888);
    assert_eq!(tag.tag_name(), "NTAG216");
    assert_eq!(tag.transport().sent, vec![vec![0x60]]);
}

#[test]
fn free_memory_before_connect_fails() {
    let mut tag = Ntag21x::new(MockTransport::new(sample_uid()), 0x3F);
    assert_eq!(tag.free_memory_bytes(), Err(Error::NotConnected));
    assert_eq!(tag.tag_name(), "NTAG21x");
}

#[test]
fn pwd_auth_frame_and_pack() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag216_version());
    transport.push_response(pack_reply());
    let mut tag = Ntag21x::new(transport, 0x3F);
    tag.connect().unwrap();

    let pack = tag.authenticate(&Password::from("abcd")).unwrap();
    assert_eq!(pack.as_bytes(), &[0x80, 0x80]);
    assert_eq!(
        tag.transport().sent.last().unwrap(),
        &vec![0x1B, b'a', b'b', b'c', b'd']
    );
}

#[test]
fn fast_read_frame() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag213_version());
    transport.push_response(page_image(16));
    let mut tag = Ntag21x::new(transport, 0x3F);
    tag.connect().unwrap();

    let data = tag.bounded_read(4, 7).unwrap();
    assert_eq!(data.len(), 16);
    assert_eq!(tag.transport().sent.last().unwrap(), &vec![0x3A, 4, 7]);
}

#[test]
fn fast_read_nak_is_protocol_error() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag213_version());
    transport.push_response(vec![0x00]);
    let mut tag = Ntag21x::new(transport, 0x3F);
    tag.connect().unwrap();

    assert_eq!(
        tag.bounded_read(0, 3),
        Err(Error::Nak {
            command: 0x3A,
            nak: 0x00
        })
    );
}

#[test]
fn inverted_window_rejected_without_sending() {
    let mut tag = connected(ntag213_version(), 0x3F);
    assert_eq!(
        tag.bounded_read(5, 4),
        Err(Error::InvalidWindow { start: 5, end: 4 })
    );
    assert_eq!(tag.transport().sent.len(), 1);
}

#[test]
fn close_reaches_transport() {
    let mut tag = connected(ntag213_version(), 0x3F);
    tag.close().unwrap();
    assert_eq!(tag.transport().closes, 1);
}

#[test]
fn version_parsing() {
    let v = Version::parse(&ntag216_version()).unwrap();
    assert_eq!(v.storage_size, 0x13);
    assert_eq!(v.family().unwrap(), TagFamily::Ntag216);
    assert!(matches!(
        Version::parse(&ultralight_version()).unwrap().family(),
        Err(Error::UnsupportedTag(_))
    ));
}

#[test]
fn reply_length_checked() {
    let cmd = Command::FastRead { start: 0, end: 1 };
    assert!(check_reply(&cmd, &[0u8; 8]).is_ok());
    assert_eq!(
        check_reply(&cmd, &[0u8; 4]),
        Err(Error::InvalidLength {
            expected: 8,
            actual: 4
        })
    );
}
