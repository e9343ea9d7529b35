//! Fuzz target for the delimited-text parser.
//!
//! The parser must never panic on malformed input, whatever the
//! delimiter mix or quoting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tabwise::{Parser, ParserConfig};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let _ = Parser::new().parse_bytes(data, "fuzz");
    let _ = Parser::with_config(ParserConfig::default().with_delimiter(b'\t'))
        .parse_bytes(data, "fuzz");
});
