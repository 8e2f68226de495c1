//! `properties`, `required` and `additionalProperties` handling.

use std::collections::HashSet;

use serde_json::Value;

use super::RuleEngine;
use crate::error::GenerateError;
use crate::ir::{ObjectDef, TypeId, TypeKind, TypeRef};
use crate::naming::Namespace;
use crate::schema::SchemaNode;

impl<'d> RuleEngine<'d> {
    pub(super) fn populate_object(
        &mut self,
        node: &SchemaNode<'d>,
        id: TypeId,
    ) -> Result<(), GenerateError> {
        let name = self.graph.get(id).name.clone();

        // A referenced object schema declaring only `additionalProperties`
        // is a named map alias, not a class.
        if node.keyword("properties").is_none() {
            if let Some(values) = node.child("additionalProperties") {
                if values.value.is_object() {
                    let value_ty = self.build(values, &format!("{name}Value"))?.ty;
                    self.graph.get_mut(id).kind =
                        TypeKind::Alias(TypeRef::Map(Box::new(value_ty)));
                    return Ok(());
                }
            }
        }

        let required = required_names(node.value);
        let mut namespace = Namespace::default();
        let mut properties = Vec::new();

        if let Some(props) = node.child("properties") {
            if let Some(entries) = props.value.as_object() {
                for wire in entries.keys() {
                    let Some(prop_node) = props.child(wire) else {
                        continue;
                    };
                    let property = self.build_property(
                        prop_node,
                        wire,
                        required.contains(wire.as_str()),
                        &mut namespace,
                    )?;
                    properties.push(property);
                }
            }
        }

        let additional = self.additional_type(node, &name)?;
        self.graph.get_mut(id).kind = TypeKind::Object(ObjectDef {
            properties,
            additional,
        });
        Ok(())
    }

    /// Catch-all value type for undeclared properties. Objects are open by
    /// default; `additionalProperties: false` closes them; a schema form
    /// types the catch-all.
    pub(super) fn additional_type(
        &mut self,
        node: &SchemaNode<'d>,
        owner_name: &str,
    ) -> Result<Option<TypeRef>, GenerateError> {
        match node.keyword("additionalProperties") {
            Some(Value::Bool(false)) => Ok(None),
            Some(value) if value.is_object() => {
                let Some(values) = node.child("additionalProperties") else {
                    return Ok(Some(TypeRef::Any));
                };
                let ty = self.build(values, &format!("{owner_name}Value"))?.ty;
                Ok(Some(ty))
            }
            _ => Ok(Some(TypeRef::Any)),
        }
    }
}

/// Names listed in a draft-04 style `required` array.
pub(super) fn required_names(value: &Value) -> HashSet<&str> {
    value
        .get("required")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
