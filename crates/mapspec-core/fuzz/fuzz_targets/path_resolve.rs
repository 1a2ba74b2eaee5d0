//! Fuzzing target for source path handling
//!
//! The first byte picks a split point; the bytes before it form a dotted
//! source path and the rest is parsed as the document to map.

#![no_main]

use libfuzzer_sys::fuzz_target;
use mapspec_core::{Descriptor, Mapper};
use serde_json::{json, Value};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let split_point = (data[0] as usize) % data.len();
    let (path_bytes, doc_bytes) = data[1..].split_at(split_point.min(data.len() - 1));
    let path = String::from_utf8_lossy(path_bytes);

    let Ok(mapper) = Mapper::new(vec![
        Descriptor::field(path.as_ref()),
        Descriptor::alias(path.as_ref(), "aliased"),
    ]) else {
        return;
    };

    let deep = json!({"a": {"b": {"c": [0, [1, {"d": 2}]]}}, "0": "zero"});
    let _ = mapper.map(&deep);

    if let Ok(doc) = serde_json::from_slice::<Value>(doc_bytes) {
        let _ = mapper.map(&doc);
    }
});
