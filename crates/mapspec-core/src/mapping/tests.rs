//! Tests for the mapping engine
//!
//! Covers every rule kind, option propagation, nested mappers, array
//! dispatch and error propagation through the public `Mapper` surface.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use super::{Descriptor, MapOptions, Mapper, RuleBuilder, RuleKind, TransformRegistry};
use crate::Error;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn uppercase_value() -> RuleBuilder {
    RuleBuilder::new("complexoldname", "complexnewname").custom_transform(|_src, value, _opts| {
        Ok(Value::String(value.as_str().unwrap_or_default().to_uppercase()))
    })
}

#[test]
fn test_null_source_maps_to_null() {
    let mapper = Mapper::new(["MyField"]).unwrap();
    assert_eq!(mapper.map(&Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_null_source_runs_no_rules() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mapper = Mapper::new(vec![Descriptor::post_process(move |_src, _dst, _opts| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })])
    .unwrap();

    assert_eq!(mapper.map(&Value::Null).unwrap(), Value::Null);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_simple_copies() {
    let mapper = Mapper::new(["simpleA", "simpleC", "falsy"]).unwrap();
    let out = mapper
        .map(&json!({
            "simpleA": "alpha",
            "simpleB": "bravo",
            "simpleC": "charlie",
            "simpleD": "delta",
            "falsy": false
        }))
        .unwrap();

    assert_eq!(out, json!({"simpleA": "alpha", "simpleC": "charlie", "falsy": false}));
    assert!(out.get("simpleB").is_none());
    assert!(out.get("simpleD").is_none());
}

#[test]
fn test_falsy_and_null_values_are_copied() {
    let mapper = Mapper::new(["zero", "empty", "no", "nothing", "missing"]).unwrap();
    let out = mapper
        .map(&json!({"zero": 0, "empty": "", "no": false, "nothing": null}))
        .unwrap();

    assert_eq!(out, json!({"zero": 0, "empty": "", "no": false, "nothing": null}));
    assert!(!out.as_object().unwrap().contains_key("missing"));
}

#[test]
fn test_copy_of_nested_path_uses_terminal_name() {
    let mapper = Mapper::new(["sub.deep"]).unwrap();
    let out = mapper.map(&json!({"sub": {"deep": "beta"}})).unwrap();
    assert_eq!(out, json!({"deep": "beta"}));
}

#[test]
fn test_field_aliases() {
    let mapper = Mapper::new(vec![("oldName", "newName"), ("sub.deep", "shallow")]).unwrap();
    let out = mapper
        .map(&json!({"oldName": "alpha", "sub": {"deep": "beta"}}))
        .unwrap();

    assert_eq!(out["newName"], json!("alpha"));
    assert_eq!(out["shallow"], json!("beta"));
    assert!(out.get("oldName").is_none());
    assert!(out.get("sub").is_none());
}

#[test]
fn test_alias_of_missing_nested_path_is_skipped() {
    let mapper = Mapper::new(vec![("sub.deep", "shallow")]).unwrap();
    assert_eq!(mapper.map(&json!({"sub": null})).unwrap(), json!({}));
    assert_eq!(mapper.map(&json!({})).unwrap(), json!({}));
}

#[test]
fn test_custom_transform() {
    let mapper = Mapper::new(vec![uppercase_value()]).unwrap();
    let out = mapper.map(&json!({"complexoldname": "alpha"})).unwrap();
    assert_eq!(out, json!({"complexnewname": "ALPHA"}));
}

#[test]
fn test_custom_transform_skipped_when_source_absent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mapper = Mapper::new(vec![RuleBuilder::new("a", "b")
        .custom_transform(move |_src, value, _opts| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value.clone())
        })
        .build()])
    .unwrap();

    assert_eq!(mapper.map(&json!({"c": 1})).unwrap(), json!({}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_transform_receives_source_object() {
    let mapper = Mapper::new(vec![RuleBuilder::new("first", "full")
        .custom_transform(|src, value, _opts| {
            let last = src["last"].as_str().unwrap_or_default();
            Ok(json!(format!("{} {}", value.as_str().unwrap_or_default(), last)))
        })
        .build()])
    .unwrap();

    let out = mapper.map(&json!({"first": "Grace", "last": "Hopper"})).unwrap();
    assert_eq!(out, json!({"full": "Grace Hopper"}));
}

#[test]
fn test_post_process_sets_field() {
    let mapper = Mapper::new(vec![
        Descriptor::field("fieldA"),
        Descriptor::post_process(|_src, dst, _opts| {
            dst.insert("Custom".to_string(), json!("fish"));
            Ok(())
        }),
    ])
    .unwrap();

    assert_eq!(
        mapper.map(&json!({"fieldA": "alpha"})).unwrap(),
        json!({"fieldA": "alpha", "Custom": "fish"})
    );
    assert_eq!(mapper.map(&json!({})).unwrap(), json!({"Custom": "fish"}));
}

#[test]
fn test_post_process_can_overwrite_and_remove() {
    let mapper = Mapper::new(vec![
        Descriptor::field("a"),
        Descriptor::field("b"),
        Descriptor::post_process(|_src, dst, _opts| {
            dst.insert("a".to_string(), json!("overwritten"));
            dst.remove("b");
            Ok(())
        }),
    ])
    .unwrap();

    assert_eq!(mapper.map(&json!({"a": 1, "b": 2})).unwrap(), json!({"a": "overwritten"}));
}

#[test]
fn test_post_process_runs_after_field_rules_in_order() {
    let mapper = Mapper::new(vec![
        Descriptor::post_process(|_src, dst, _opts| {
            let seen = dst.get("a").cloned().unwrap_or(Value::Null);
            dst.insert("seen".to_string(), seen);
            dst.insert("order".to_string(), json!("first"));
            Ok(())
        }),
        Descriptor::field("a"),
        Descriptor::post_process(|_src, dst, _opts| {
            dst.insert("order".to_string(), json!("second"));
            Ok(())
        }),
    ])
    .unwrap();

    let out = mapper.map(&json!({"a": 7})).unwrap();
    assert_eq!(out, json!({"a": 7, "seen": 7, "order": "second"}));
}

#[test]
fn test_later_rules_overwrite_earlier_ones() {
    let mapper = Mapper::new(vec![("x", "out"), ("y", "out")]).unwrap();
    assert_eq!(mapper.map(&json!({"x": 1, "y": 2})).unwrap(), json!({"out": 2}));
    assert_eq!(mapper.map(&json!({"x": 1})).unwrap(), json!({"out": 1}));
}

#[test]
fn test_options_reach_every_callback() {
    let mapper = Mapper::new(vec![
        RuleBuilder::new("complexoldname", "complexnewname")
            .custom_transform(|_src, value, options| {
                let bread = options.get_str("breadVal").unwrap_or_default().to_uppercase();
                Ok(json!(format!("{}{}", value.as_str().unwrap_or_default(), bread)))
            })
            .build(),
        Descriptor::post_process(|_src, dst, options| {
            dst.insert("Custom".to_string(), options.get("fishVal").cloned().unwrap_or(Value::Null));
            Ok(())
        }),
    ])
    .unwrap();

    let options = MapOptions::new().with("fishVal", "haddock").with("breadVal", "loaf");
    let out = mapper
        .map_with(&json!({"simpleA": "alpha", "complexoldname": "oldVal"}), &options)
        .unwrap();

    assert_eq!(out["complexnewname"], json!("oldValLOAF"));
    assert_eq!(out["Custom"], json!("haddock"));
}

#[test]
fn test_default_options_are_empty() {
    let mapper = Mapper::new(vec![Descriptor::post_process(|_src, dst, options| {
        dst.insert("count".to_string(), json!(options.len()));
        Ok(())
    })])
    .unwrap();
    assert_eq!(mapper.map(&json!({})).unwrap(), json!({"count": 0}));
}

#[test]
fn test_nested_mapper() {
    let internal = Mapper::new(vec![("simpleB", "newSimpleB")]).unwrap();
    let mapper = Mapper::new(vec![
        Descriptor::field("simpleA"),
        RuleBuilder::new("internalObject", "newInternalObject")
            .mapper(internal)
            .build(),
    ])
    .unwrap();

    let out = mapper
        .map(&json!({"simpleA": "alpha", "internalObject": {"simpleB": "beta"}}))
        .unwrap();

    assert_eq!(out, json!({"simpleA": "alpha", "newInternalObject": {"newSimpleB": "beta"}}));
}

#[test]
fn test_nested_mapper_null_and_array_values() {
    let internal = Mapper::new(["id"]).unwrap();
    let mapper = Mapper::new(vec![RuleBuilder::new("items", "ids").mapper(internal).build()]).unwrap();

    assert_eq!(mapper.map(&json!({"items": null})).unwrap(), json!({"ids": null}));
    assert_eq!(
        mapper.map(&json!({"items": [{"id": 1, "x": 0}, null, {"id": 2}]})).unwrap(),
        json!({"ids": [{"id": 1}, null, {"id": 2}]})
    );
    assert_eq!(mapper.map(&json!({})).unwrap(), json!({}));
}

#[test]
fn test_nested_mapper_receives_options() {
    let internal = Mapper::new(vec![Descriptor::post_process(|_src, dst, options| {
        dst.insert("tag".to_string(), options.get("tag").cloned().unwrap_or(Value::Null));
        Ok(())
    })])
    .unwrap();
    let mapper = Mapper::new(vec![RuleBuilder::new("inner", "inner").mapper(internal).build()]).unwrap();

    let out = mapper
        .map_with(&json!({"inner": {}}), &MapOptions::new().with("tag", "t1"))
        .unwrap();
    assert_eq!(out, json!({"inner": {"tag": "t1"}}));
}

#[test]
fn test_sub_mapper_shared_between_outer_mappers() {
    let shared = Mapper::new(vec![("v", "value")]).unwrap();
    let first = Mapper::new(vec![RuleBuilder::new("a", "a").mapper(shared.clone()).build()]).unwrap();
    let second = Mapper::new(vec![RuleBuilder::new("b", "b").mapper(shared).build()]).unwrap();

    assert_eq!(first.map(&json!({"a": {"v": 1}})).unwrap(), json!({"a": {"value": 1}}));
    assert_eq!(second.map(&json!({"b": {"v": 2}})).unwrap(), json!({"b": {"value": 2}}));
}

#[test]
fn test_array_of_objects() {
    let mapper = Mapper::new(vec![("simpleA", "SimpleB")]).unwrap();
    let src = json!({"simpleA": "alpha"});
    let out = mapper.map(&json!([src.clone(), src])).unwrap();

    let items = out.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["SimpleB"], json!("alpha"));
}

#[test]
fn test_array_with_null_elements_preserves_positions() {
    let mapper = Mapper::new(["a"]).unwrap();
    let out = mapper.map(&json!([{"a": 1}, null, {"b": 2}, {"a": 3}])).unwrap();
    assert_eq!(out, json!([{"a": 1}, null, {}, {"a": 3}]));
}

#[test]
fn test_empty_array_maps_to_empty_array() {
    let mapper = Mapper::new(["a"]).unwrap();
    assert_eq!(mapper.map(&json!([])).unwrap(), json!([]));
}

#[test]
fn test_empty_specification_yields_empty_objects() {
    let mapper = Mapper::empty();
    assert!(mapper.is_empty());
    assert_eq!(mapper.map(&json!({"a": 1})).unwrap(), json!({}));
    assert_eq!(mapper.map(&Value::Null).unwrap(), Value::Null);
}

#[test]
fn test_scalar_source_yields_empty_object() {
    let mapper = Mapper::new(["length"]).unwrap();
    assert_eq!(mapper.map(&json!("a string")).unwrap(), json!({}));
    assert_eq!(mapper.map(&json!(12)).unwrap(), json!({}));
}

#[test]
fn test_source_is_not_mutated() {
    let mapper = Mapper::new(vec![
        Descriptor::field("a"),
        Descriptor::post_process(|_src, dst, _opts| {
            dst.insert("a".to_string(), json!("changed"));
            Ok(())
        }),
    ])
    .unwrap();

    let source = json!({"a": "original"});
    let before = source.clone();
    mapper.map(&source).unwrap();
    assert_eq!(source, before);
}

#[test]
fn test_no_implicit_carry_over() {
    let first = Mapper::new(["a"]).unwrap();
    let second = Mapper::new(vec![("b", "renamedB"), ("c", "renamedC")]).unwrap();

    let intermediate = first.map(&json!({"a": 1, "b": 2, "c": 3})).unwrap();
    let out = second.map(&intermediate).unwrap();
    assert_eq!(out, json!({}));
}

#[test]
fn test_callback_error_propagates_unchanged() {
    let mapper = Mapper::new(vec![RuleBuilder::new("a", "b")
        .custom_transform(|_src, _value, _opts| Err(anyhow::anyhow!("no haddock today").into()))
        .build()])
    .unwrap();

    let err = mapper.map(&json!({"a": 1})).unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert_eq!(err.to_string(), "no haddock today");
}

#[test]
fn test_post_process_error_propagates() {
    let mapper = Mapper::new(vec![Descriptor::post_process(|_src, _dst, _opts| {
        Err(Error::transform("audit", "rejected"))
    })])
    .unwrap();

    let err = mapper.map(&json!({})).unwrap_err();
    assert!(matches!(err, Error::Transform { ref transform, .. } if transform == "audit"));
}

#[test]
fn test_error_in_array_element_fails_whole_call() {
    let mapper = Mapper::new(vec![RuleBuilder::new("n", "n").transform_named("to_number").build()]).unwrap();
    let err = mapper.map(&json!([{"n": "1"}, {"n": "fish"}])).unwrap_err();
    assert!(err.to_string().contains("to_number"));
}

#[test]
fn test_sub_mapper_error_propagates() {
    let internal = Mapper::new(vec![RuleBuilder::new("x", "x").transform_named("uppercase").build()]).unwrap();
    let mapper = Mapper::new(vec![RuleBuilder::new("inner", "inner").mapper(internal).build()]).unwrap();

    let err = mapper.map(&json!({"inner": {"x": 5}})).unwrap_err();
    assert!(matches!(err, Error::Transform { .. }));
}

#[test]
fn test_named_transform_with_custom_registry() {
    let mut registry = TransformRegistry::new();
    registry.register_transform("cents", |_src, value, _opts| {
        Ok(json!((value.as_f64().unwrap_or(0.0) * 100.0).round() as i64))
    });

    let mapper = Mapper::with_registry(
        vec![RuleBuilder::new("price", "priceCents").transform_named("cents").build()],
        &registry,
    )
    .unwrap();
    assert_eq!(mapper.map(&json!({"price": 12.5})).unwrap(), json!({"priceCents": 1250}));

    let err = Mapper::with_registry(
        vec![RuleBuilder::new("price", "p").transform_named("uppercase").build()],
        &registry,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnknownTransform { .. }));
}

#[test]
fn test_json_specification_with_registered_mapper() {
    let mut registry = TransformRegistry::with_built_ins();
    registry.register_mapper("address", Mapper::new(vec![("street_name", "street")]).unwrap());

    let mapper = Mapper::from_json_with(
        &json!([
            {"srcName": "name", "dstName": "name", "customTransform": "uppercase"},
            {"srcName": "home", "dstName": "address", "mapper": "address"},
            {"srcName": "work", "dstName": "office", "mapper": [{"street_name": "street"}]}
        ]),
        &registry,
    )
    .unwrap();

    let out = mapper
        .map(&json!({
            "name": "ada",
            "home": {"street_name": "Elm"},
            "work": {"street_name": "Oak"}
        }))
        .unwrap();
    assert_eq!(
        out,
        json!({"name": "ADA", "address": {"street": "Elm"}, "office": {"street": "Oak"}})
    );
}

#[test]
fn test_json_specification_from_str() {
    let registry = TransformRegistry::with_built_ins();
    let mapper = Mapper::from_json_str(r#"["a", {"b": "B"}]"#, &registry).unwrap();
    assert_eq!(mapper.map(&json!({"a": 1, "b": 2})).unwrap(), json!({"a": 1, "B": 2}));

    let err = Mapper::from_json_str("[\"a\",", &registry).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
}

#[test]
fn test_map_object_returns_none_for_null() {
    let mapper = Mapper::new(["a"]).unwrap();
    let options = MapOptions::default();
    assert!(mapper.map_object(&Value::Null, &options).unwrap().is_none());

    let object = mapper.map_object(&json!({"a": true}), &options).unwrap().unwrap();
    assert_eq!(object.get("a"), Some(&json!(true)));
}

#[test]
fn test_map_as_typed_values() {
    #[derive(serde::Serialize)]
    struct Source {
        first_name: String,
        age: u32,
    }

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Dest {
        name: String,
    }

    let mapper = Mapper::new(vec![("first_name", "name")]).unwrap();
    let dest: Dest = mapper
        .map_as(&Source { first_name: "Ada".into(), age: 36 }, &MapOptions::default())
        .unwrap();
    assert_eq!(dest, Dest { name: "Ada".into() });

    let many: Vec<Dest> = mapper
        .map_as(&vec![Source { first_name: "Grace".into(), age: 85 }], &MapOptions::default())
        .unwrap();
    assert_eq!(many, vec![Dest { name: "Grace".into() }]);
}

#[test]
fn test_rules_are_introspectable_in_order() {
    let mapper = Mapper::new(vec![
        Descriptor::post_process(|_s, _d, _o| Ok(())),
        Descriptor::field("a.b"),
        Descriptor::alias("c", "C"),
        uppercase_value().build(),
    ])
    .unwrap();

    let kinds: Vec<_> = mapper.rules().iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        vec![RuleKind::PostProcess, RuleKind::Copy, RuleKind::Alias, RuleKind::Transform]
    );
    let dests: Vec<_> = mapper.rules().iter().map(|r| r.dest_name()).collect();
    assert_eq!(dests, vec![None, Some("b"), Some("C"), Some("complexnewname")]);
    assert!(format!("{:?}", mapper).contains("complexoldname"));
}
