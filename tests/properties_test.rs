use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use yapi_codegen::{
    MockSynthesizer, Properties, SchemaDocument, SchemaKind, SchemaNode, TypeEmitter,
    derive_function_name, derive_interface_name,
};

fn scalar_kind() -> impl Strategy<Value = SchemaKind> {
    prop_oneof![
        Just(SchemaKind::String),
        Just(SchemaKind::Number),
        Just(SchemaKind::Integer),
        Just(SchemaKind::Boolean),
        Just(SchemaKind::Unknown),
    ]
}

fn scalar_properties() -> impl Strategy<Value = Vec<(String, SchemaKind, bool)>> {
    prop::collection::vec(("[a-z][a-zA-Z0-9]{0,8}", scalar_kind(), any::<bool>()), 0..8).prop_map(
        |mut fields| {
            let mut seen = std::collections::HashSet::new();
            fields.retain(|(name, _, _)| seen.insert(name.clone()));
            fields
        },
    )
}

fn build(fields: &[(String, SchemaKind, bool)]) -> Properties {
    fields
        .iter()
        .map(|(name, kind, optional)| {
            let node = SchemaNode::new(kind.clone());
            (name.clone(), if *optional { node.optional() } else { node })
        })
        .collect()
}

proptest! {
    #[test]
    fn emitted_fields_follow_property_order(fields in scalar_properties()) {
        let properties = build(&fields);
        let node = SchemaNode::new(SchemaKind::Object(Some(properties)));
        let source = TypeEmitter::new().emit_interface("Sample", &node, None);

        let emitted: Vec<String> = source
            .lines()
            .filter_map(|line| line.trim().split_once(':'))
            .map(|(name, _)| name.trim_end_matches('?').to_string())
            .collect();
        let declared: Vec<String> = fields.iter().map(|(name, _, _)| name.clone()).collect();
        prop_assert_eq!(emitted, declared);

        for (name, _, optional) in &fields {
            let marker = format!("  {}?:", name);
            prop_assert_eq!(source.contains(&marker), *optional);
        }
    }

    #[test]
    fn mock_keys_match_declared_fields(fields in scalar_properties(), seed in any::<u64>()) {
        let properties = build(&fields);
        let document = SchemaDocument::from_properties(properties.clone());
        let value = MockSynthesizer::new(StdRng::seed_from_u64(seed))
            .full_response(&document)
            .unwrap();

        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let declared: Vec<&str> = properties.keys().collect();
        prop_assert_eq!(keys, declared);

        for (name, kind, _) in &fields {
            if *kind == SchemaKind::Unknown && !["code", "message", "status"].contains(&name.as_str()) {
                prop_assert_eq!(&object[name.as_str()], &Value::Null);
            }
        }
    }

    #[test]
    fn enum_mock_is_a_member(values in prop::collection::vec(any::<i64>(), 1..6), seed in any::<u64>()) {
        let values: Vec<Value> = values.into_iter().map(|v| json!(v)).collect();
        let node = SchemaNode::new(SchemaKind::String).with_enum(values.clone());

        let mut synthesizer = MockSynthesizer::new(StdRng::seed_from_u64(seed));
        let value = synthesizer.synthesize(&node, "kind");
        prop_assert!(values.contains(&value));
    }

    #[test]
    fn identifier_derivation_is_idempotent(
        path in "(/(\\{[a-z_]{1,6}\\}|[a-zA-Z0-9][a-zA-Z0-9_-]{0,6})){0,4}",
        method in prop_oneof![Just("GET"), Just("post"), Just("Put"), Just("DELETE")],
    ) {
        prop_assert_eq!(derive_interface_name(&path, method), derive_interface_name(&path, method));
        prop_assert_eq!(derive_function_name(&path, method), derive_function_name(&path, method));

        let function_name = derive_function_name(&path, method);
        let mut chars = function_name.chars();
        prop_assert!(chars.next().is_some_and(|c| c.is_ascii_lowercase()));
        prop_assert!(chars.all(|c| c.is_ascii_alphanumeric()));

        let interface_name = derive_interface_name(&path, method);
        prop_assert!(interface_name.ends_with("Data"));
        prop_assert!(interface_name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'));
        prop_assert!(interface_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}

#[test]
fn nested_fields_emit_parents_before_children() {
    let document = SchemaDocument::parse(
        r#"{
            "properties": {
                "user": {
                    "type": "object",
                    "properties": {
                        "profile": {
                            "type": "object",
                            "properties": { "nickname": { "type": "string" } }
                        },
                        "tags": { "type": "array", "items": { "type": "string" } }
                    }
                },
                "orders": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "orderNo": { "type": "string", "required": false } }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    let root = SchemaNode::new(SchemaKind::Object(Some(
        document.properties().unwrap().clone(),
    )));

    let source = TypeEmitter::new().emit_interface("Sample", &root, None);

    assert_eq!(
        source,
        "export interface Sample {\n\
         \x20 user: {\n\
         \x20   profile: {\n\
         \x20     nickname: string;\n\
         \x20   };\n\
         \x20   tags: string[];\n\
         \x20 };\n\
         \x20 orders: {\n\
         \x20   orderNo?: string;\n\
         \x20 }[];\n\
         }"
    );
}

#[test]
fn malformed_shapes_fall_back() {
    let document = SchemaDocument::parse(
        r#"{
            "properties": {
                "list": { "type": "array", "items": "string" },
                "map": { "type": "object", "properties": [] },
                "multi": { "type": ["string", "null"] },
                "flag": { "type": "boolean", "required": "no" }
            }
        }"#,
    )
    .unwrap();
    let properties = document.properties().unwrap();

    assert_eq!(properties.get("list").unwrap().kind, SchemaKind::Array(None));
    assert_eq!(properties.get("map").unwrap().kind, SchemaKind::Object(None));
    assert_eq!(properties.get("multi").unwrap().kind, SchemaKind::Unknown);
    assert!(!properties.get("flag").unwrap().is_optional());
}
