//! Fuzz target for escape sequence and control character stripping.

#![no_main]

use libfuzzer_sys::fuzz_target;
use promptbuf::ansi::{strip_ansi, strip_unsafe_characters};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let stripped = strip_ansi(&text);
    assert!(!stripped.contains(['\u{1b}', '\u{9b}']), "introducer survived");

    let safe = strip_unsafe_characters(&text);
    for c in safe.chars() {
        let code = u32::from(c);
        assert!(code != 127 && (code > 31 || code == 10 || code == 13), "{code:#x} survived");
    }
});
