//! Integration tests for schema interpretation.

use serde_json::json;
use typebind::ir::{Primitive, TypeKind, TypeRef};
use typebind::{generate, GenerateError, GenerationConfig, Mapper, DEFAULT_BASE_URI};

fn load_fixture(name: &str) -> serde_json::Value {
    let path = format!("tests/fixtures/{}.json", name);
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("fixture {} not found", name));
    serde_json::from_str(&content).expect("invalid JSON")
}

fn object_def(ty: &typebind::GeneratedType) -> &typebind::ir::ObjectDef {
    match &ty.kind {
        TypeKind::Object(def) => def,
        other => panic!("expected object, got {:?}", other),
    }
}

#[test]
fn fixture_generates_expected_types() {
    let graph = generate(&load_fixture("customer"), "Customer").unwrap();

    let customer = graph.find("Customer").unwrap();
    let def = object_def(customer);

    // Authored order survives.
    let wires: Vec<&str> = def.properties.iter().map(|p| p.wire_name.as_str()).collect();
    assert_eq!(
        wires,
        vec![
            "id",
            "first_name",
            "last_name",
            "status",
            "billing_address",
            "shipping_address",
            "tags",
            "referred_by",
            "created_at"
        ]
    );

    // Identifiers follow the naming policy; wire names are untouched.
    assert_eq!(def.properties[1].ident, "firstName");
    assert_eq!(def.properties[1].wire_name, "first_name");

    // Formats refine string primitives.
    assert_eq!(
        def.properties[0].type_ref,
        TypeRef::Primitive(Primitive::Uuid)
    );
    assert_eq!(
        def.properties[8].type_ref,
        TypeRef::Primitive(Primitive::DateTime)
    );

    // required array applied.
    assert!(def.properties[0].required);
    assert!(def.properties[1].required);
    assert!(!def.properties[2].required);

    // The inline enum became a named type.
    let status = graph.find("Status").unwrap();
    let TypeKind::Enum(enum_def) = &status.kind else {
        panic!("expected enum");
    };
    let idents: Vec<&str> = enum_def.constants.iter().map(|c| c.ident.as_str()).collect();
    assert_eq!(idents, vec!["ACTIVE", "SUSPENDED", "CLOSED"]);
}

#[test]
fn equal_canonical_identity_yields_same_type() {
    let graph = generate(&load_fixture("customer"), "Customer").unwrap();
    let customer = graph.find("Customer").unwrap();
    let def = object_def(customer);

    let billing = &def.properties[4].type_ref;
    let shipping = &def.properties[5].type_ref;
    let (TypeRef::Ref(a), TypeRef::Ref(b)) = (billing, shipping) else {
        panic!("expected refs");
    };
    assert_eq!(a, b, "both refs must resolve to the same type identity");
    assert!(a.index() < graph.len());

    // Only one Address type exists in the graph.
    let addresses = graph
        .types()
        .iter()
        .filter(|t| t.name.contains("Address"))
        .count();
    assert_eq!(addresses, 1);
}

#[test]
fn self_referential_schema_terminates() {
    let schema = json!({
        "type": "object",
        "title": "Node",
        "properties": {
            "value": { "type": "string" },
            "next": { "$ref": "#" }
        }
    });

    let graph = generate(&schema, "Node").unwrap();
    assert_eq!(graph.len(), 1);

    let node = graph.find("Node").unwrap();
    let def = object_def(node);
    assert_eq!(def.properties[1].type_ref, TypeRef::Ref(node.id));
}

#[test]
fn mutually_recursive_definitions_terminate() {
    let schema = json!({
        "type": "object",
        "title": "Tree",
        "properties": {
            "root": { "$ref": "#/definitions/branch" }
        },
        "definitions": {
            "branch": {
                "type": "object",
                "properties": {
                    "leaves": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/leaf" }
                    }
                }
            },
            "leaf": {
                "type": "object",
                "properties": {
                    "parent": { "$ref": "#/definitions/branch" }
                }
            }
        }
    });

    let graph = generate(&schema, "Tree").unwrap();
    let branch = graph.find("Branch").unwrap();
    let leaf = graph.find("Leaf").unwrap();

    let leaf_def = object_def(leaf);
    assert_eq!(leaf_def.properties[0].type_ref, TypeRef::Ref(branch.id));

    let branch_def = object_def(branch);
    assert_eq!(
        branch_def.properties[0].type_ref,
        TypeRef::List(Box::new(TypeRef::Ref(leaf.id)))
    );
}

#[test]
fn all_of_merges_constituent_properties() {
    let schema = json!({
        "title": "Merged",
        "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "properties": { "b": { "type": "integer" } } }
        ]
    });

    let graph = generate(&schema, "Merged").unwrap();
    let merged = graph.find("Merged").unwrap();
    let def = object_def(merged);

    assert_eq!(def.properties.len(), 2);
    assert_eq!(def.properties[0].wire_name, "a");
    assert_eq!(
        def.properties[0].type_ref,
        TypeRef::Primitive(Primitive::String)
    );
    assert_eq!(def.properties[1].wire_name, "b");
    assert_eq!(
        def.properties[1].type_ref,
        TypeRef::Primitive(Primitive::Integer)
    );
}

#[test]
fn all_of_conflicting_property_definitions_fail() {
    let schema = json!({
        "title": "Clash",
        "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "properties": { "a": { "type": "integer" } } }
        ]
    });

    let err = generate(&schema, "Clash").unwrap_err();
    match err {
        GenerateError::MergeConflict {
            property,
            first,
            second,
        } => {
            assert_eq!(property, "a");
            assert!(first.contains("/allOf/0/properties/a"));
            assert!(second.contains("/allOf/1/properties/a"));
        }
        other => panic!("expected merge conflict, got {other}"),
    }
}

#[test]
fn all_of_identical_duplicates_merge_silently() {
    let schema = json!({
        "title": "Dup",
        "allOf": [
            { "properties": { "a": { "type": "string" } } },
            { "properties": { "a": { "type": "string" } } }
        ]
    });

    let graph = generate(&schema, "Dup").unwrap();
    let def = object_def(graph.find("Dup").unwrap());
    assert_eq!(def.properties.len(), 1);
}

#[test]
fn all_of_honors_additional_properties_on_the_composite() {
    let schema = json!({
        "title": "Sealed",
        "additionalProperties": false,
        "allOf": [
            { "properties": { "a": { "type": "string" } } }
        ]
    });

    let graph = generate(&schema, "Sealed").unwrap();
    let def = object_def(graph.find("Sealed").unwrap());
    assert_eq!(def.properties.len(), 1);
    assert!(def.additional.is_none());

    // A typed catch-all on the composite flows through as well.
    let schema = json!({
        "title": "Tagged",
        "additionalProperties": { "type": "string" },
        "allOf": [
            { "properties": { "a": { "type": "integer" } } }
        ]
    });
    let graph = generate(&schema, "Tagged").unwrap();
    let def = object_def(graph.find("Tagged").unwrap());
    assert_eq!(
        def.additional,
        Some(TypeRef::Primitive(Primitive::String))
    );
}

#[test]
fn one_of_creates_union_with_sibling_subtypes() {
    let schema = json!({
        "title": "Payment",
        "oneOf": [
            { "title": "Card", "type": "object", "properties": { "number": { "type": "string" } } },
            { "title": "Cash", "type": "object", "properties": { "amount": { "type": "number" } } }
        ]
    });

    let graph = generate(&schema, "Payment").unwrap();
    let payment = graph.find("Payment").unwrap();
    assert!(matches!(payment.kind, TypeKind::Union));

    let card = graph.find("Card").unwrap();
    let cash = graph.find("Cash").unwrap();
    assert_eq!(card.supertype, Some(payment.id));
    assert_eq!(cash.supertype, Some(payment.id));
}

#[test]
fn any_of_untitled_branches_get_ordinal_names() {
    let schema = json!({
        "title": "Value",
        "anyOf": [
            { "type": "object", "properties": { "s": { "type": "string" } } },
            { "type": "string" }
        ]
    });

    let graph = generate(&schema, "Value").unwrap();
    let marker = graph.find("Value").unwrap();
    assert!(matches!(marker.kind, TypeKind::Union));

    let object_branch = graph.find("Value1").unwrap();
    assert_eq!(object_branch.supertype, Some(marker.id));

    let alias_branch = graph.find("Value2").unwrap();
    assert_eq!(alias_branch.supertype, Some(marker.id));
    assert!(matches!(
        alias_branch.kind,
        TypeKind::Alias(TypeRef::Primitive(Primitive::String))
    ));
}

#[test]
fn tuple_items_produce_fixed_arity_sequence() {
    let schema = json!({
        "type": "object",
        "title": "Row",
        "properties": {
            "cells": {
                "type": "array",
                "items": [
                    { "type": "string" },
                    { "type": "integer" },
                    { "type": "boolean" }
                ]
            }
        }
    });

    let graph = generate(&schema, "Row").unwrap();
    let def = object_def(graph.find("Row").unwrap());
    assert_eq!(
        def.properties[0].type_ref,
        TypeRef::Tuple(vec![
            TypeRef::Primitive(Primitive::String),
            TypeRef::Primitive(Primitive::Integer),
            TypeRef::Primitive(Primitive::Boolean),
        ])
    );
}

#[test]
fn type_array_records_nullability_on_the_property() {
    let schema = json!({
        "type": "object",
        "title": "Form",
        "properties": {
            "note": { "type": ["string", "null"] }
        }
    });

    let graph = generate(&schema, "Form").unwrap();
    let def = object_def(graph.find("Form").unwrap());
    assert_eq!(
        def.properties[0].type_ref,
        TypeRef::Primitive(Primitive::String)
    );
    assert!(def.properties[0].nullable);
    // No extra type was generated for the null alternative.
    assert_eq!(graph.len(), 1);
}

#[test]
fn additional_properties_only_object_becomes_map() {
    let schema = json!({
        "type": "object",
        "title": "Env",
        "properties": {
            "vars": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        }
    });

    let graph = generate(&schema, "Env").unwrap();
    let def = object_def(graph.find("Env").unwrap());
    assert_eq!(
        def.properties[0].type_ref,
        TypeRef::Map(Box::new(TypeRef::Primitive(Primitive::String)))
    );
}

#[test]
fn additional_properties_false_closes_the_object() {
    let schema = json!({
        "type": "object",
        "title": "Strict",
        "properties": { "a": { "type": "string" } },
        "additionalProperties": false
    });

    let graph = generate(&schema, "Strict").unwrap();
    let def = object_def(graph.find("Strict").unwrap());
    assert!(def.additional.is_none());

    // Objects are open by default.
    let open = generate(
        &json!({"type": "object", "title": "Open", "properties": {}}),
        "Open",
    )
    .unwrap();
    let def = object_def(open.find("Open").unwrap());
    assert_eq!(def.additional, Some(TypeRef::Any));
}

#[test]
fn draft03_boolean_required_is_honored() {
    let schema = json!({
        "type": "object",
        "title": "Legacy",
        "properties": {
            "must": { "type": "string", "required": true },
            "may": { "type": "string" }
        }
    });

    let graph = generate(&schema, "Legacy").unwrap();
    let def = object_def(graph.find("Legacy").unwrap());
    assert!(def.properties[0].required);
    assert!(!def.properties[1].required);
}

#[test]
fn sibling_identifier_collisions_disambiguate_deterministically() {
    let schema = json!({
        "type": "object",
        "title": "Mixed",
        "properties": {
            "first_name": { "type": "string" },
            "firstName": { "type": "string" }
        }
    });

    let graph = generate(&schema, "Mixed").unwrap();
    let def = object_def(graph.find("Mixed").unwrap());
    assert_eq!(def.properties[0].ident, "firstName");
    assert_eq!(def.properties[1].ident, "firstName1");
    // Wire names stay distinct and untouched.
    assert_eq!(def.properties[0].wire_name, "first_name");
    assert_eq!(def.properties[1].wire_name, "firstName");
}

#[test]
fn enum_constants_never_collide() {
    let schema = json!({
        "title": "Letter",
        "enum": ["A", "a"]
    });

    let graph = generate(&schema, "Letter").unwrap();
    let TypeKind::Enum(def) = &graph.find("Letter").unwrap().kind else {
        panic!("expected enum");
    };
    assert_eq!(def.constants[0].ident, "A");
    assert_eq!(def.constants[1].ident, "A_1");
    assert_ne!(def.constants[0].ident, def.constants[1].ident);
}

#[test]
fn dangling_ref_reports_reference_and_location() {
    let schema = json!({
        "type": "object",
        "title": "Broken",
        "properties": {
            "x": { "$ref": "#/definitions/missing" }
        }
    });

    let err = generate(&schema, "Broken").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("#/definitions/missing"));
    assert!(message.contains("/properties/x"));
}

#[test]
fn cross_document_refs_resolve_against_registered_documents() {
    let mut mapper = Mapper::with_defaults();
    mapper
        .register_document(
            "https://example.com/schemas/address.json",
            json!({
                "type": "object",
                "properties": { "city": { "type": "string" } }
            }),
        )
        .unwrap();

    let root = json!({
        "type": "object",
        "title": "Order",
        "properties": {
            "ship_to": { "$ref": "address.json" }
        }
    });

    let graph = mapper
        .generate(&root, "https://example.com/schemas/order.json", "Order")
        .unwrap();

    let address = graph.find("Address").unwrap();
    let def = object_def(graph.find("Order").unwrap());
    assert_eq!(def.properties[0].type_ref, TypeRef::Ref(address.id));
}

#[test]
fn unregistered_external_document_is_fatal() {
    let mut mapper = Mapper::with_defaults();
    let root = json!({
        "type": "object",
        "title": "Order",
        "properties": {
            "ship_to": { "$ref": "elsewhere.json#/foo" }
        }
    });

    let err = mapper
        .generate(&root, "https://example.com/schemas/order.json", "Order")
        .unwrap_err();
    assert!(err.to_string().contains("elsewhere.json#/foo"));
}

#[test]
fn invalid_default_for_primitive_is_fatal() {
    let schema = json!({
        "type": "object",
        "title": "Bad",
        "properties": {
            "age": { "type": "integer", "default": "forty" }
        }
    });

    let err = generate(&schema, "Bad").unwrap_err();
    assert!(matches!(err, GenerateError::InvalidDefault { .. }));
}

#[test]
fn valid_default_is_preserved() {
    let schema = json!({
        "type": "object",
        "title": "Good",
        "properties": {
            "age": { "type": "integer", "default": 21 }
        }
    });

    let graph = generate(&schema, "Good").unwrap();
    let def = object_def(graph.find("Good").unwrap());
    assert_eq!(def.properties[0].default, Some(json!(21)));
}

#[test]
fn null_default_on_nullable_property_is_preserved() {
    let schema = json!({
        "type": "object",
        "title": "Draft",
        "properties": {
            "note": { "type": ["string", "null"], "default": null }
        }
    });

    let graph = generate(&schema, "Draft").unwrap();
    let def = object_def(graph.find("Draft").unwrap());
    assert!(def.properties[0].nullable);
    assert_eq!(def.properties[0].default, Some(json!(null)));
}

#[test]
fn unrecognized_keywords_are_silently_skipped() {
    let schema = json!({
        "type": "object",
        "title": "Forward",
        "properties": { "a": { "type": "string", "x-vendor-extension": true } },
        "x-internal": { "anything": [1, 2, 3] }
    });

    let graph = generate(&schema, "Forward").unwrap();
    assert_eq!(graph.len(), 1);
    let def = object_def(graph.find("Forward").unwrap());
    assert_eq!(def.properties.len(), 1);
}

#[test]
fn untyped_root_generates_nothing() {
    let graph = generate(&json!({ "description": "free-form" }), "Anything").unwrap();
    assert!(graph.is_empty());
}

#[test]
fn generation_is_deterministic() {
    let fixture = load_fixture("customer");
    let first = serde_json::to_string(&generate(&fixture, "Customer").unwrap()).unwrap();
    let second = serde_json::to_string(&generate(&fixture, "Customer").unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn custom_delimiters_change_tokenization() {
    let config = GenerationConfig::from_options("none", ".").unwrap();
    let schema = json!({
        "type": "object",
        "title": "Dotty",
        "properties": {
            "user.name": { "type": "string" }
        }
    });

    let graph = Mapper::new(config)
        .generate(&schema, DEFAULT_BASE_URI, "Dotty")
        .unwrap();
    let def = object_def(graph.find("Dotty").unwrap());
    assert_eq!(def.properties[0].ident, "userName");
    assert_eq!(def.properties[0].wire_name, "user.name");
}
