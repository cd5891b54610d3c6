#![no_main]
use libfuzzer_sys::fuzz_target;

use stackjson::{parse, serialize};

fuzz_target!(|data: &[u8]| {
    // We only care about inputs that are valid UTF-8.
    if let Ok(s) = std::str::from_utf8(data) {
        // Any panic in the tokenizer or parser is a bug. Whatever parses
        // must survive a trip through both serializer modes.
        if let Ok(value) = parse(s) {
            for pretty in [false, true] {
                let text = serialize(&value, pretty);
                let reparsed = parse(&text).expect("serializer output must parse");
                assert_eq!(reparsed, value);
            }
        }
    }
});
