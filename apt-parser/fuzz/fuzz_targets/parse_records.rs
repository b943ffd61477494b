#![no_main]

use apt_parser::{Control, FromRawDocument, Packages, ParseOptions, Release};
use libfuzzer_sys::fuzz_target;
use std::str::FromStr;

fuzz_target!(|data: &[u8]| {
    let _ = Packages::from_bytes(data, &ParseOptions::default().skip_validation(true));

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = Release::from_str(s);
        let _ = Control::from_str(s);
        let _ = Packages::from_str(s);
    }
});
