use std::sync::Arc;
use std::sync::mpsc;

use libntag::outcome::{ChannelSink, OutcomeMessage, ScriptEventSink};
use libntag::plugin::{DetectedTag, PluginResult, TagPlugin};
use libntag::tag::MockTag;
use libntag::test_support::{MockRadio, pattern_memory};
use libntag::{TagFamily, Uid};
use parking_lot::Mutex;
use serde_json::{Value, json};

fn script_json(script: &str) -> (String, Value) {
    let rest = script
        .strip_prefix("javascript:cordova.fireDocumentEvent('")
        .unwrap();
    let (event, rest) = rest.split_once("', ").unwrap();
    let json = rest.strip_suffix(");").unwrap();
    (event.to_string(), serde_json::from_str(json).unwrap())
}

#[test]
fn success_event_on_web_view() {
    let posted = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let posted = posted.clone();
        ScriptEventSink::new(move |s| posted.lock().push(s))
    };
    let p = TagPlugin::new(MockRadio::default(), Arc::new(sink));

    let tag = MockTag::new(Uid::from_bytes(&[0x04, 0x11]), "NTAG213", pattern_memory(8));
    p.on_tag_detected(DetectedTag::new(TagFamily::Ntag213, Box::new(tag)))
        .unwrap()
        .join()
        .unwrap();

    let scripts = posted.lock();
    assert_eq!(scripts.len(), 1);
    let (event, body) = script_json(&scripts[0]);
    assert_eq!(event, "onTagDetected");
    assert_eq!(body["tagUID"], json!([4, 17]));
    assert_eq!(body["tagName"], "NTAG213");
    assert_eq!(body["payload"], json!([0, 1, 2, 3, 4, 5, 6, 7]));
}

#[test]
fn unsupported_event_shape() {
    let (tx, rx) = mpsc::channel();
    let p = TagPlugin::new(MockRadio::default(), Arc::new(ChannelSink::new(tx)));
    let tag = MockTag::new(Uid::default(), "MIFARE Classic", vec![]);
    p.on_tag_detected(DetectedTag::new(TagFamily::MifareClassic, Box::new(tag)))
        .unwrap()
        .join()
        .unwrap();

    let msg = rx.recv().unwrap();
    let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
    assert_eq!(v["nfcType"], "Unsupported");
    assert_eq!(v["nfcCode"], -1);
    assert!(matches!(msg, OutcomeMessage::Failure(_)));
}

#[test]
fn write_tag_reply_serializes() {
    let p = TagPlugin::new(MockRadio::default(), Arc::new(ChannelSink::new(mpsc::channel().0)));
    match p.execute("writeTag", &json!([{}])) {
        PluginResult::Error(msg) => {
            let v = serde_json::to_value(&msg).unwrap();
            assert_eq!(v["nfcType"], "Card");
            assert_eq!(v["nfcCode"], 31);
        }
        other => panic!("expected error, got {:?}", other),
    }
}
