#![no_main]

use libfuzzer_sys::fuzz_target;
use solidactions::domain::services::{LogCursor, LogPayload};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let mut cursor = LogCursor::new();
        if let Ok(payload) = serde_json::from_str::<LogPayload>(content) {
            let _ = cursor.advance(&payload);
        }
        // Raw text cut at arbitrary byte offsets must stay on char boundaries
        let _ = cursor.advance(&LogPayload::Raw(content.to_string()));
        let _ = LogPayload::Raw(content.to_string()).suffix(content.len() / 2);
    }
});
