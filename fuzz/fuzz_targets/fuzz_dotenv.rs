#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use solidactions::domain::services::dotenv;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let parsed = dotenv::parse(content);
        let keys: HashSet<String> = parsed.keys().cloned().collect();
        let lines: Vec<String> = parsed
            .iter()
            .map(|(k, v)| format!("{}={}", k, dotenv::format_value(v)))
            .collect();
        let _ = dotenv::merge_oauth(Some(content), &keys, &lines, chrono::Utc::now());
    }
});
