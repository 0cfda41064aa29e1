#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Project config parsing must reject bad input without panicking
        let _ = wise::config::parse(content, Path::new("django.json"));
    }
});
