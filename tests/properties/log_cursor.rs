//! Property tests for incremental log streaming.

use proptest::prelude::*;

use solidactions::domain::services::{LogCursor, LogEntry, LogPayload};

fn chunks() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z \\n]{0,12}", 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: following a growing log emits every byte exactly once.
    #[test]
    fn property_raw_log_is_emitted_exactly_once(parts in chunks(), repeats in 1usize..3) {
        let mut cursor = LogCursor::new();
        let mut seen = String::new();
        let mut full = String::new();

        for part in &parts {
            full.push_str(part);
            for _ in 0..repeats {
                if let Some(LogPayload::Raw(fresh)) = cursor.advance(&LogPayload::Raw(full.clone())) {
                    seen.push_str(&fresh);
                }
            }
        }
        prop_assert_eq!(seen, full.clone());
        prop_assert_eq!(cursor.offset(), full.len());
    }

    /// PROPERTY: structured entries are never re-emitted.
    #[test]
    fn property_entries_are_emitted_exactly_once(growth in proptest::collection::vec(0usize..4, 1..8)) {
        let mut cursor = LogCursor::new();
        let mut all = Vec::new();
        let mut emitted = 0usize;

        for grow in growth {
            for _ in 0..grow {
                all.push(LogEntry {
                    message: Some(format!("line {}", all.len())),
                    ..Default::default()
                });
            }
            match cursor.advance(&LogPayload::Entries(all.clone())) {
                Some(LogPayload::Entries(fresh)) => {
                    prop_assert_eq!(&fresh[..], &all[emitted..]);
                    emitted += fresh.len();
                }
                Some(LogPayload::Raw(_)) => prop_assert!(false, "shape changed"),
                None => prop_assert_eq!(emitted, all.len()),
            }
        }
        prop_assert_eq!(emitted, all.len());
    }

    /// PROPERTY: the cursor never moves backwards on a shorter payload.
    #[test]
    fn property_cursor_is_monotonic(a in "[a-z]{0,20}", b in "[a-z]{0,20}") {
        let mut cursor = LogCursor::new();
        cursor.advance(&LogPayload::Raw(a.clone()));
        let before = cursor.offset();
        cursor.advance(&LogPayload::Raw(b));
        prop_assert!(cursor.offset() >= before);
    }
}
