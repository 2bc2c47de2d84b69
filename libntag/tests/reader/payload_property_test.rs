use libntag::config::ReaderConfig;
use libntag::outcome::ReadOutcome;
use libntag::reader::TagReader;
use libntag::tag::MockTag;
use libntag::test_support::pattern_memory;
use libntag::types::Uid;
use proptest::prelude::*;

proptest! {
    #[test]
    fn payload_is_concatenation_of_windows(pages in 0usize..300, max in 1usize..80) {
        let mem = pattern_memory(pages * 4);
        let tag = MockTag::new(Uid::from_bytes(&[4, 2]), "NTAG216", mem.clone());
        let log = tag.call_log();
        let reader = TagReader::new(ReaderConfig::default().with_max_pages_per_transfer(max));

        match reader.read(Box::new(tag)) {
            ReadOutcome::Success { payload, .. } => prop_assert_eq!(payload, mem),
            other => prop_assert!(false, "expected success, got {:?}", other),
        }
        prop_assert_eq!(log.reads().len(), pages.div_ceil(max));
    }
}
