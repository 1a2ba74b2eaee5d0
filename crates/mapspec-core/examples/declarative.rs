// Walkthrough of a declarative mapping specification
// Usage: cargo run --example declarative

use mapspec_core::{Descriptor, MapOptions, Mapper, TransformRegistry};
use serde_json::{json, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Named transforms are what JSON rule objects can refer to
    let mut registry = TransformRegistry::with_built_ins();
    registry.register_transform("cents", |_src, value, _opts| {
        Ok(json!((value.as_f64().unwrap_or_default() * 100.0).round() as i64))
    });

    let spec = r#"[
        "id",
        {"customer.name": "customer"},
        {"srcName": "status", "dstName": "status", "customTransform": "uppercase"},
        {"srcName": "total", "dstName": "totalCents", "customTransform": "cents"},
        {"srcName": "lines", "dstName": "lines", "mapper": ["sku", {"qty": "quantity"}]}
    ]"#;
    let declarative = Mapper::from_json_str(spec, &registry)?;

    // Post-processing is added programmatically on top of the compiled rules
    let mapper = Mapper::new(vec![
        Descriptor::alias("order", "order"),
        Descriptor::post_process(|src, dst, options| {
            if let Some(channel) = options.get_str("channel") {
                dst.insert("channel".to_string(), Value::from(channel));
            }
            dst.insert("lineCount".to_string(), json!(src["order"]["lines"].as_array().map_or(0, Vec::len)));
            Ok(())
        }),
    ])?;

    let orders = json!([
        {
            "id": "A-100",
            "customer": {"name": "Ada"},
            "status": "paid",
            "total": 12.5,
            "lines": [{"sku": "BOLT", "qty": 3, "internal": true}, null]
        },
        null,
        {"id": "A-101", "status": "open"}
    ]);

    let mapped = declarative.map(&orders)?;
    println!("Declarative:\n{}", serde_json::to_string_pretty(&mapped)?);

    let options = MapOptions::new().with("channel", "web");
    let wrapped = mapper.map_with(&json!({"order": orders[0].clone()}), &options)?;
    println!("With post-processing:\n{}", serde_json::to_string_pretty(&wrapped)?);

    Ok(())
}
