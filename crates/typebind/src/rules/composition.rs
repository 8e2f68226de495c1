//! Composition keywords: `allOf` merging, `oneOf`/`anyOf` unions.

use std::collections::HashMap;

use serde_json::Value;

use super::RuleEngine;
use crate::error::GenerateError;
use crate::ir::{ObjectDef, TypeId, TypeKind, TypeRef};
use crate::naming::Namespace;
use crate::rules::object::required_names;
use crate::schema::SchemaNode;

impl<'d> RuleEngine<'d> {
    /// Merge `allOf` constituents into one object type.
    ///
    /// Properties keep first-seen declaration order across branches. Two
    /// branches may repeat a property only with structurally identical
    /// definitions; anything else is a merge conflict reporting both
    /// locations.
    pub(super) fn populate_all_of(
        &mut self,
        node: &SchemaNode<'d>,
        id: TypeId,
    ) -> Result<(), GenerateError> {
        let mut order: Vec<(String, SchemaNode<'d>)> = Vec::new();
        let mut seen: HashMap<String, SchemaNode<'d>> = HashMap::new();
        let mut required: Vec<String> = required_names(node.value)
            .into_iter()
            .map(String::from)
            .collect();

        let mut merge_branch = |branch: SchemaNode<'d>| -> Result<(), GenerateError> {
            required.extend(required_names(branch.value).into_iter().map(String::from));
            let Some(props) = branch.child("properties") else {
                return Ok(());
            };
            let Some(entries) = props.value.as_object() else {
                return Ok(());
            };
            for wire in entries.keys() {
                let Some(prop_node) = props.child(wire) else {
                    continue;
                };
                match seen.get(wire.as_str()) {
                    Some(previous) if previous.value != prop_node.value => {
                        return Err(GenerateError::MergeConflict {
                            property: wire.clone(),
                            first: previous.id.to_string(),
                            second: prop_node.id.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(wire.clone(), prop_node.clone());
                        order.push((wire.clone(), prop_node));
                    }
                }
            }
            Ok(())
        };

        // The node's own properties participate in the merge ahead of the
        // constituents.
        merge_branch(node.clone())?;

        if let Some(all_of) = node.child("allOf") {
            if let Some(entries) = all_of.value.as_array() {
                for index in 0..entries.len() {
                    let Some(branch) = all_of.child_index(index) else {
                        continue;
                    };
                    let branch = self.deref_node(branch)?;
                    merge_branch(branch)?;
                }
            }
        }

        let mut namespace = Namespace::default();
        let mut properties = Vec::new();
        for (wire, prop_node) in order {
            let property = self.build_property(
                prop_node,
                &wire,
                required.iter().any(|r| r == &wire),
                &mut namespace,
            )?;
            properties.push(property);
        }

        // The catch-all comes from the composite node itself, so
        // `additionalProperties: false` closes the merged object too.
        let name = self.graph.get(id).name.clone();
        let additional = self.additional_type(node, &name)?;
        self.graph.get_mut(id).kind = TypeKind::Object(ObjectDef {
            properties,
            additional,
        });
        Ok(())
    }

    /// Generate `oneOf`/`anyOf` siblings under a shared union marker.
    ///
    /// Every branch becomes a named sibling type with its `supertype` set to
    /// the marker; non-object branches are wrapped in named aliases so the
    /// sibling set is uniform. Branch names come from the branch `title`,
    /// falling back to the marker's name plus the branch ordinal.
    pub(super) fn populate_union(
        &mut self,
        node: &SchemaNode<'d>,
        id: TypeId,
    ) -> Result<(), GenerateError> {
        self.graph.get_mut(id).kind = TypeKind::Union;

        let keyword = if node.keyword("oneOf").is_some() {
            "oneOf"
        } else {
            "anyOf"
        };
        let Some(branches) = node.child(keyword) else {
            return Ok(());
        };
        let Some(entries) = branches.value.as_array() else {
            return Ok(());
        };

        let parent_name = self.graph.get(id).name.clone();
        for index in 0..entries.len() {
            let Some(branch) = branches.child_index(index) else {
                continue;
            };
            let hint = branch
                .keyword("title")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("{parent_name}{}", index + 1));

            let shaped = self.build(branch.clone(), &hint)?;
            let sibling = match shaped.ty {
                TypeRef::Ref(sibling) => sibling,
                other => self.alias_type(&branch, &hint, other)?,
            };

            if sibling != id {
                let generated = self.graph.get_mut(sibling);
                if generated.supertype.is_none() {
                    generated.supertype = Some(id);
                }
            }
        }
        Ok(())
    }

    /// Named alias wrapper for a non-object union branch.
    fn alias_type(
        &mut self,
        node: &SchemaNode<'d>,
        hint: &str,
        ty: TypeRef,
    ) -> Result<TypeId, GenerateError> {
        if let Some(existing) = self.graph.lookup(&node.id) {
            return Ok(existing);
        }
        let pascal = self.naming.pascal(hint);
        let name = self.type_names.claim(pascal, hint, &node.id)?;
        let id = self.graph.insert_placeholder(node.id.clone(), name);
        self.graph.get_mut(id).kind = TypeKind::Alias(ty);
        Ok(id)
    }
}
