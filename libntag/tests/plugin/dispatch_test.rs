#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::fixtures::*;
use libntag::classify::ErrorCategory;
use libntag::constants::NTAG216_MEMORY_PAGES;
use libntag::outcome::ReadOutcome;
use libntag::plugin::{DetectedTag, PluginResult, TagPlugin};
use libntag::tag::{MockTag, Ntag21x, TagCall};
use libntag::test_support::{CollectingSink, MockRadio, RadioCall, seeded_ntag_transport};
use libntag::TagFamily;
use serde_json::json;

fn plugin() -> (TagPlugin<MockRadio>, Arc<CollectingSink>) {
    common::init_logger();
    let sink = Arc::new(CollectingSink::default());
    (TagPlugin::new(MockRadio::default(), sink.clone()), sink)
}

#[test]
fn init_then_tap_uses_password() {
    let (p, sink) = plugin();
    p.initialize().unwrap();
    assert_eq!(
        p.execute("init", &json!([{ "password": "abcd" }])),
        PluginResult::Ok("OK".into())
    );

    let tag = MockTag::new(sample_uid(), "NTAG216", page_image(888));
    let log = tag.call_log();
    let handle = p
        .on_tag_detected(DetectedTag::new(TagFamily::Ntag216, Box::new(tag)))
        .unwrap();
    let outcome = handle.join().unwrap();

    assert!(outcome.is_success());
    assert_eq!(log.calls()[1], TagCall::Authenticate(b"abcd".to_vec()));
    assert_eq!(log.reads(), vec![(0, 62), (63, 125), (126, 188), (189, 221)]);
    assert_eq!(log.reads().last().map(|w| w.1), Some(NTAG216_MEMORY_PAGES));
    assert_eq!(sink.outcomes().len(), 1);
    assert_eq!(
        p.radio().calls(),
        vec![RadioCall::Register, RadioCall::StartDispatch]
    );
}

#[test]
fn tap_keeps_config_it_started_with() {
    let (p, _) = plugin();
    p.execute("init", &json!([{ "password": "aaaa" }]));

    let tag = MockTag::new(sample_uid(), "NTAG213", page_image(144));
    let log = tag.call_log();
    let handle = p
        .on_tag_detected(DetectedTag::new(TagFamily::Ntag213, Box::new(tag)))
        .unwrap();
    p.execute("init", &json!([{ "password": "" }]));
    handle.join().unwrap();

    assert_eq!(
        log.count(|c| *c == TagCall::Authenticate(b"aaaa".to_vec())),
        1
    );

    // The next tap sees the later configuration.
    let tag = MockTag::new(sample_uid(), "NTAG213", page_image(144));
    let log = tag.call_log();
    p.on_tag_detected(DetectedTag::new(TagFamily::Ntag213, Box::new(tag)))
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(log.count(|c| matches!(c, TagCall::Authenticate(_))), 0);
}

#[test]
fn concurrent_taps_each_emit_once() {
    let (p, sink) = plugin();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mem = page_image(144);
            let transport = seeded_ntag_transport(
                libntag::Uid::from_bytes(&[0x04, i]),
                TagFamily::Ntag213,
                &mem,
                false,
                0x3F,
            )
            .unwrap();
            let tag = Ntag21x::new(transport, 0x3F);
            p.on_tag_detected(DetectedTag::new(TagFamily::Ntag213, Box::new(tag)))
                .unwrap()
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap().is_success());
    }
    assert_eq!(sink.outcomes().len(), 4);
}

#[test]
fn unsupported_family_reported() {
    let (p, sink) = plugin();
    let tag = MockTag::new(sample_uid(), "ISO 15693", vec![]);
    let log = tag.call_log();
    p.on_tag_detected(DetectedTag::new(TagFamily::Iso15693, Box::new(tag)))
        .unwrap()
        .join()
        .unwrap();

    match &sink.outcomes()[..] {
        [ReadOutcome::Failure(c)] => assert_eq!(c.category, ErrorCategory::Unsupported),
        other => panic!("unexpected outcomes {:?}", other),
    }
    assert!(log.calls().is_empty());
}

#[test]
fn failed_dispatch_start_fails_init() {
    common::init_logger();
    let p = TagPlugin::new(MockRadio::failing_start(), Arc::new(CollectingSink::default()));
    match p.execute("init", &json!([{ "password": "abcd" }])) {
        PluginResult::Error(msg) => assert_eq!(msg.nfc_type, ErrorCategory::CardIORead),
        other => panic!("expected error, got {:?}", other),
    }
    assert!(p.config().snapshot().password.is_empty());
}

#[cfg(feature = "async")]
#[tokio::test]
async fn async_tap_on_blocking_pool() {
    let (p, sink) = plugin();
    let tag = MockTag::new(sample_uid(), "NTAG213", page_image(144));
    let outcome = p
        .on_tag_detected_async(DetectedTag::new(TagFamily::Ntag213, Box::new(tag)))
        .await
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(sink.outcomes().len(), 1);
}
