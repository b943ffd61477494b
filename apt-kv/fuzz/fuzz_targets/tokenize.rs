#![no_main]

use apt_kv::RawDocument;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for chunk in apt_kv::records(s) {
            let document = RawDocument::parse(chunk);

            // Writing the document back out and reading it again keeps the keys
            let reparsed = RawDocument::parse(&document.to_string());
            assert!(reparsed.keys().eq(document.keys()));
        }
    }
});
