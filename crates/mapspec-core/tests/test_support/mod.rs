//! Shared test support utilities for integration tests

use serde_json::{json, Value};
use mapspec_core::{Descriptor, Mapper, RuleBuilder};

/// An order document with nested customer data and a list of lines
pub fn sample_order() -> Value {
    json!({
        "id": "A-100",
        "customer": {
            "name": "Ada Lovelace",
            "address": {"city": "London", "zip": "N1"}
        },
        "lines": [
            {"sku": "BOLT", "qty": 3, "internal": true},
            {"sku": "NUT", "qty": 0}
        ],
        "amount": 12.5,
        "secret": "do-not-copy"
    })
}

/// A mapper exercising every rule kind against [`sample_order`]
pub fn order_mapper() -> Mapper {
    let line = Mapper::new(vec![Descriptor::field("sku"), Descriptor::alias("qty", "quantity")])
        .expect("line mapper compiles");

    Mapper::new(vec![
        Descriptor::field("id"),
        Descriptor::alias("customer.name", "customerName"),
        Descriptor::alias("customer.address.city", "city"),
        RuleBuilder::new("lines", "lines").mapper(line).build(),
        RuleBuilder::new("amount", "total")
            .custom_transform(|_src, value, options| {
                let currency = options.get_str("currency").unwrap_or("USD");
                Ok(json!(format!("{} {}", value, currency)))
            })
            .build(),
        Descriptor::post_process(|src, dst, _opts| {
            let count = src["lines"].as_array().map_or(0, Vec::len);
            dst.insert("lineCount".to_string(), json!(count));
            Ok(())
        }),
    ])
    .expect("order mapper compiles")
}
