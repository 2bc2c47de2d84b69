// Full NTAG216 read against a scripted transport.
//
// Run with `RUST_LOG=debug cargo run --example mock_read` to watch the read
// state machine.

use std::sync::Arc;
use std::sync::mpsc;

use anyhow::Context;
use libntag::outcome::{ChannelSink, OutcomeMessage};
use libntag::prelude::*;
use libntag::test_support::{MockRadio, pattern_memory, seeded_ntag_transport};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (tx, rx) = mpsc::channel();
    let plugin = TagPlugin::new(MockRadio::default(), Arc::new(ChannelSink::new(tx)));
    plugin.initialize()?;

    let reply = plugin.execute("init", &serde_json::json!([{ "password": "abcd" }]));
    println!("init -> {:?}", reply);

    let memory = pattern_memory(888);
    let transport = seeded_ntag_transport(
        Uid::from_bytes(&[0x04, 0xA1, 0xB2, 0xC3, 0xD4, 0xE5, 0x80]),
        TagFamily::Ntag216,
        &memory,
        true,
        plugin.config().snapshot().max_pages_per_transfer,
    )?;
    let tag = Ntag21x::new(transport, 0x3F);

    let worker = plugin.on_tag_detected(DetectedTag::new(TagFamily::Ntag216, Box::new(tag)))?;
    let outcome = worker
        .join()
        .map_err(|_| anyhow::anyhow!("read worker panicked"))?;
    println!("outcome: {}", outcome.event_name());

    match rx.recv().context("no outcome delivered")? {
        OutcomeMessage::Success(msg) => println!(
            "{} uid={} payload {} bytes",
            msg.tag_name,
            bytes_to_hex(&msg.tag_uid),
            msg.payload.len()
        ),
        OutcomeMessage::Failure(msg) => println!("failure: {}", serde_json::to_string(&msg)?),
    }

    plugin.on_destroy()?;
    Ok(())
}
