#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use pepxml_hits::pepxml::PepXmlParser;
use pepxml_hits::selector::select_all;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either parse or fail with an error, never panic
    if let Ok(output) = PepXmlParser::new(Cursor::new(data)).parse() {
        // Selection runs over whatever survived parsing
        let rows = select_all(&output.store);
        assert!(rows.len() <= output.store.len());
    }
});
