#![no_main]

use libfuzzer_sys::fuzz_target;
use solidactions::domain::entities::WorkflowManifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Manifest parsing must never panic
        if let Ok(manifest) = WorkflowManifest::parse(content) {
            let _ = manifest.declared_keys();
        }
    }
});
