//! Per-property shaping: identifier, requiredness, default, facets.

use serde_json::Value;

use super::RuleEngine;
use crate::error::GenerateError;
use crate::ir::{Property, Restrictions, TypeRef};
use crate::naming::Namespace;
use crate::schema::SchemaNode;

impl<'d> RuleEngine<'d> {
    /// Build one property. The container type is settled first (recursing
    /// into the property schema), then the validation facets are attached.
    pub(super) fn build_property(
        &mut self,
        node: SchemaNode<'d>,
        wire: &str,
        required_in_parent: bool,
        namespace: &mut Namespace,
    ) -> Result<Property, GenerateError> {
        let shaped = self.build(node.clone(), wire)?;

        let ident = self.naming.camel(wire);
        let ident = namespace.claim(ident, wire, &node.id)?;

        // Draft-04 `required` arrays on the parent and draft-03 boolean
        // `required` on the property node itself are both honored.
        let required = required_in_parent
            || node
                .keyword("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);

        let default = node.keyword("default").cloned();
        if let Some(value) = &default {
            check_default(wire, &shaped.ty, value, shaped.nullable)?;
        }

        Ok(Property {
            wire_name: wire.to_string(),
            ident,
            type_ref: shaped.ty,
            required,
            nullable: shaped.nullable,
            default,
            description: node
                .keyword("description")
                .and_then(Value::as_str)
                .map(String::from),
            restrictions: collect_restrictions(node.value),
            annotations: Vec::new(),
        })
    }
}

/// Kind-check a declared default against the resolved type. Refs, maps and
/// untyped properties accept any default shape; the emitter owns those. A
/// nullable property additionally accepts `null`.
fn check_default(
    property: &str,
    ty: &TypeRef,
    value: &Value,
    nullable: bool,
) -> Result<(), GenerateError> {
    if nullable && value.is_null() {
        return Ok(());
    }
    let expected = match ty {
        TypeRef::Primitive(p) => p.json_kind(),
        TypeRef::List(_) | TypeRef::Tuple(_) => "array",
        _ => return Ok(()),
    };
    let ok = match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(GenerateError::InvalidDefault {
            property: property.to_string(),
            expected: expected.to_string(),
            found: json_kind(value).to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validation facets, collected unevaluated for the emitter.
fn collect_restrictions(value: &Value) -> Restrictions {
    Restrictions {
        minimum: value.get("minimum").cloned(),
        maximum: value.get("maximum").cloned(),
        min_length: value.get("minLength").and_then(Value::as_u64),
        max_length: value.get("maxLength").and_then(Value::as_u64),
        pattern: value
            .get("pattern")
            .and_then(Value::as_str)
            .map(String::from),
        min_items: value.get("minItems").and_then(Value::as_u64),
        max_items: value.get("maxItems").and_then(Value::as_u64),
        unique_items: value.get("uniqueItems").and_then(Value::as_bool),
    }
}
