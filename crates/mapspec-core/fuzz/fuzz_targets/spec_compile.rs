//! Fuzzing target for declarative specification compilation
//!
//! Arbitrary JSON is compiled as a mapping specification. Compilation must
//! either fail with an error or yield a mapper that runs without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mapspec_core::Mapper;
use serde_json::{json, Value};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spec) = serde_json::from_str::<Value>(text) else {
        return;
    };

    if let Ok(mapper) = Mapper::from_json(&spec) {
        let test_docs = vec![
            json!(null),
            json!(42),
            json!({}),
            json!([{"a": 1}, null]),
            json!({"a": {"b": [1, {"c": "x"}]}, "name": " Name ", "flag": "yes"}),
        ];

        for doc in &test_docs {
            let _ = mapper.map(doc);
        }
    }
});
