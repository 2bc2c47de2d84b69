#[path = "../common/mod.rs"]
mod common;

use common::fixtures::*;
use libntag::classify::ErrorCategory;
use libntag::config::ReaderConfig;
use libntag::constants::{PASSWORD_AUTH_FAILED_CODE, UNSUPPORTED_TAG_CODE};
use libntag::outcome::ReadOutcome;
use libntag::reader::TagReader;
use libntag::tag::Ntag21x;
use libntag::test_support::seeded_ntag_transport;
use libntag::transport::MockTransport;
use libntag::{Error, TagFamily};

fn reader(password: &str) -> TagReader {
    TagReader::new(ReaderConfig::default().with_password(password))
}

fn failure(outcome: ReadOutcome) -> (ErrorCategory, i32) {
    match outcome {
        ReadOutcome::Failure(c) => (c.category, c.code),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn ntag216_full_read_with_password() {
    common::init_logger();
    let mem = page_image(888);
    let transport =
        seeded_ntag_transport(sample_uid(), TagFamily::Ntag216, &mem, true, 0x3F).unwrap();
    let tag = Ntag21x::new(transport, 0x3F);

    match reader("abcd").read(Box::new(tag)) {
        ReadOutcome::Success { identity, payload } => {
            assert_eq!(payload.len(), 888);
            assert_eq!(payload, mem);
            assert_eq!(identity.name, "NTAG216");
            assert_eq!(identity.uid, sample_uid());
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[test]
fn ntag213_read_without_password() {
    let mem = page_image(144);
    let transport =
        seeded_ntag_transport(sample_uid(), TagFamily::Ntag213, &mem, false, 0x3F).unwrap();
    let outcome = reader("").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert!(outcome.is_success());
}

#[test]
fn io_failure_during_auth_is_password_failure() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag216_version());
    transport.push_error(Error::Io("transceive failed".into()));

    let outcome = reader("abcd").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert_eq!(
        failure(outcome),
        (ErrorCategory::Security, PASSWORD_AUTH_FAILED_CODE)
    );
}

#[test]
fn nak_during_auth_is_rejection() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag216_version());
    transport.push_response(vec![0x00]);

    let outcome = reader("abcd").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert_eq!(failure(outcome), (ErrorCategory::Security, 10));
}

#[test]
fn short_password_rejected_before_sending() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag216_version());

    let outcome = reader("ab").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert_eq!(failure(outcome), (ErrorCategory::Security, 11));
}

#[test]
fn tag_lost_mid_read_is_io_read() {
    let mem = page_image(888);
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag216_version());
    transport.push_response(mem[..63 * 4].to_vec());
    transport.push_error(Error::TagLost);

    let outcome = reader("").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert_eq!(failure(outcome), (ErrorCategory::CardIORead, 3));
}

#[test]
fn window_larger_than_tag_allows_is_protocol_failure() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ntag213_version());

    // The session allows 63 pages per transfer but the tag only 16.
    let outcome = reader("").read(Box::new(Ntag21x::new(transport, 16)));
    assert_eq!(failure(outcome), (ErrorCategory::CardProtocol, 23));
}

#[test]
fn non_ntag_version_is_unsupported() {
    let mut transport = MockTransport::new(sample_uid());
    transport.push_response(ultralight_version());

    let outcome = reader("").read(Box::new(Ntag21x::new(transport, 0x3F)));
    assert_eq!(
        failure(outcome),
        (ErrorCategory::Unsupported, UNSUPPORTED_TAG_CODE)
    );
}

#[test]
fn session_bound_above_link_limit_still_reads() {
    let config = ReaderConfig::from_json(&serde_json::json!({ "maxPagesPerTransfer": 64 })).unwrap();
    let mem = page_image(888);
    // 253-byte transceive buffer: at most 63 pages per FAST_READ.
    let transport =
        seeded_ntag_transport(sample_uid(), TagFamily::Ntag216, &mem, false, 63).unwrap();
    let tag = Ntag21x::new(transport, config.max_pages_per_transfer);

    match TagReader::new(config).read(Box::new(tag)) {
        ReadOutcome::Success { payload, .. } => assert_eq!(payload, mem),
        other => panic!("expected success, got {:?}", other),
    }
}
