//! `items` handling: homogeneous lists and fixed-arity tuples.

use serde_json::Value;

use super::RuleEngine;
use crate::error::GenerateError;
use crate::ir::TypeRef;
use crate::schema::SchemaNode;

impl<'d> RuleEngine<'d> {
    /// Resolve an array schema's element type. A single `items` schema
    /// yields a list; an `items` array yields a fixed-arity sequence with
    /// one component type per position. Missing `items` is an untyped list.
    pub(super) fn items_type(
        &mut self,
        node: &SchemaNode<'d>,
        hint: &str,
    ) -> Result<TypeRef, GenerateError> {
        let Some(items) = node.child("items") else {
            return Ok(TypeRef::List(Box::new(TypeRef::Any)));
        };

        if let Value::Array(entries) = items.value {
            let mut components = Vec::with_capacity(entries.len());
            for index in 0..entries.len() {
                let Some(component) = items.child_index(index) else {
                    continue;
                };
                let shaped = self.build(component, &format!("{hint}Item{index}"))?;
                components.push(shaped.ty);
            }
            return Ok(TypeRef::Tuple(components));
        }

        let shaped = self.build(items, &format!("{hint}Item"))?;
        Ok(TypeRef::List(Box::new(shaped.ty)))
    }
}
