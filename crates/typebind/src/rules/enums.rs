//! `enum` handling.

use serde_json::Value;

use super::RuleEngine;
use crate::error::GenerateError;
use crate::ir::{EnumConstant, EnumDef, TypeId, TypeKind};
use crate::naming::Namespace;
use crate::schema::SchemaNode;

impl<'d> RuleEngine<'d> {
    /// Turn an `enum` keyword into constants. Literal values are preserved
    /// exactly; constant identifiers come from the naming policy, with
    /// case-insensitive disambiguation so two distinct literals can never
    /// share an identifier.
    pub(super) fn populate_enum(
        &mut self,
        node: &SchemaNode<'d>,
        id: TypeId,
    ) -> Result<(), GenerateError> {
        let mut constants = Vec::new();
        let mut namespace = Namespace::default();

        if let Some(values) = node.keyword("enum").and_then(Value::as_array) {
            for value in values {
                let raw = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let ident = self.naming.constant(&raw);
                let ident = namespace.claim_with_separator(ident, "_", &raw, &node.id)?;
                constants.push(EnumConstant {
                    value: value.clone(),
                    ident,
                    annotations: Vec::new(),
                });
            }
        }

        self.graph.get_mut(id).kind = TypeKind::Enum(EnumDef { constants });
        Ok(())
    }
}
