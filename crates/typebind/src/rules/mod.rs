//! Keyword-dispatch rule engine.
//!
//! Recursive descent over immutable schema nodes. For each node the engine
//! settles the type-determining keywords first (`$ref`, `enum`, `type`,
//! composition, structural inference), then lets the constraint-refining
//! handlers attach facets. Handlers never talk to the annotation layer;
//! decoration is a separate pass over the finished graph.
//!
//! Unrecognized keywords are deliberately skipped: they stay on the schema
//! node but have no type-model effect.

mod array;
mod composition;
mod enums;
mod object;
mod primitive;
mod property;

use serde_json::Value;
use tracing::debug;

use crate::error::GenerateError;
use crate::ir::{TypeGraph, TypeId, TypeKind, TypeRef};
use crate::naming::{select_shape, NamingPolicy, Namespace, Shape};
use crate::resolver::{self, DocumentStore};
use crate::schema::{CanonicalId, SchemaNode};

/// Result of shaping one schema node: the type reference a parent should
/// use, plus nullability from a `type` array.
pub(crate) struct Shaped {
    pub ty: TypeRef,
    pub nullable: bool,
}

impl Shaped {
    fn plain(ty: TypeRef) -> Self {
        Self {
            ty,
            nullable: false,
        }
    }
}

/// One generation run's interpreter state.
///
/// Constructed fresh per run; the dedup cache lives inside the [`TypeGraph`]
/// and dies with it.
pub struct RuleEngine<'d> {
    docs: &'d DocumentStore,
    naming: NamingPolicy,
    type_names: Namespace,
    graph: TypeGraph,
}

impl<'d> RuleEngine<'d> {
    pub fn new(docs: &'d DocumentStore, naming: NamingPolicy) -> Self {
        Self {
            docs,
            naming,
            type_names: Namespace::default(),
            graph: TypeGraph::new(),
        }
    }

    /// Interpret the document graph rooted at `root` and return the
    /// completed (undecorated) type graph.
    pub fn run(mut self, root: CanonicalId, name_hint: &str) -> Result<TypeGraph, GenerateError> {
        let node = self
            .docs
            .node(&root)
            .ok_or_else(|| GenerateError::Resolution {
                reference: root.to_string(),
                location: root.to_string(),
            })?;
        self.build(node, name_hint)?;
        Ok(self.graph)
    }

    /// Shape one schema node, creating named types as needed.
    fn build(&mut self, node: SchemaNode<'d>, hint: &str) -> Result<Shaped, GenerateError> {
        if let Some(reference) = node.keyword("$ref").and_then(Value::as_str) {
            return self.build_ref(reference, &node, hint);
        }

        match select_shape(node.value) {
            Shape::Enum | Shape::AllOf | Shape::Union => {
                let id = self.named_type(&node, hint)?;
                Ok(Shaped::plain(TypeRef::Ref(id)))
            }
            Shape::Object => self.object_type(node, hint, false),
            Shape::Explicit {
                type_name,
                nullable,
            } => match type_name.as_str() {
                "object" => self.object_type(node, hint, nullable),
                "array" => {
                    let ty = self.items_type(&node, hint)?;
                    Ok(Shaped { ty, nullable })
                }
                other => {
                    let format = node.keyword("format").and_then(Value::as_str);
                    Ok(Shaped {
                        ty: primitive::primitive_type(other, format),
                        nullable: nullable || other == "null",
                    })
                }
            },
            Shape::Array => {
                let ty = self.items_type(&node, hint)?;
                Ok(Shaped::plain(ty))
            }
            Shape::Any => Ok(Shaped::plain(TypeRef::Any)),
        }
    }

    /// Shape an object node. Objects declaring only `additionalProperties`
    /// become inline maps; anything else becomes a named type.
    fn object_type(
        &mut self,
        node: SchemaNode<'d>,
        hint: &str,
        nullable: bool,
    ) -> Result<Shaped, GenerateError> {
        if node.keyword("properties").is_none() {
            if let Some(values) = node.child("additionalProperties") {
                if values.value.is_object() {
                    let value_ty = self.build(values, &format!("{hint}Value"))?.ty;
                    return Ok(Shaped {
                        ty: TypeRef::Map(Box::new(value_ty)),
                        nullable,
                    });
                }
            }
        }
        let id = self.named_type(&node, hint)?;
        Ok(Shaped {
            ty: TypeRef::Ref(id),
            nullable,
        })
    }

    /// Dereference a `$ref`, generating the target type on first visit.
    fn build_ref(
        &mut self,
        reference: &str,
        node: &SchemaNode<'d>,
        hint: &str,
    ) -> Result<Shaped, GenerateError> {
        let id = resolver::resolve(reference, &node.id, self.docs)?;
        if let Some(existing) = self.graph.lookup(&id) {
            return Ok(Shaped::plain(TypeRef::Ref(existing)));
        }
        let target = self
            .docs
            .node(&id)
            .ok_or_else(|| GenerateError::Resolution {
                reference: reference.to_string(),
                location: node.id.to_string(),
            })?;
        let fallback = id
            .last_segment()
            .or_else(|| document_stem(&id))
            .unwrap_or_else(|| hint.to_string());
        let target_id = self.named_type(&target, &fallback)?;
        Ok(Shaped::plain(TypeRef::Ref(target_id)))
    }

    /// Look up or create the generated type for a schema node.
    ///
    /// The placeholder is registered under the node's canonical id *before*
    /// recursing into the body, so direct or mutual recursion finds the
    /// placeholder and terminates.
    fn named_type(&mut self, node: &SchemaNode<'d>, hint: &str) -> Result<TypeId, GenerateError> {
        if let Some(existing) = self.graph.lookup(&node.id) {
            return Ok(existing);
        }
        let raw = node
            .keyword("title")
            .and_then(Value::as_str)
            .unwrap_or(hint);
        let pascal = self.naming.pascal(raw);
        let name = self.type_names.claim(pascal, raw, &node.id)?;
        let id = self.graph.insert_placeholder(node.id.clone(), name);
        debug!(name = %self.graph.get(id).name, origin = %node.id, "created type");
        self.populate(node.clone(), id)?;
        Ok(id)
    }

    /// Fill in a placeholder according to its node's shape. After this
    /// returns the type is never mutated again by the engine.
    fn populate(&mut self, node: SchemaNode<'d>, id: TypeId) -> Result<(), GenerateError> {
        {
            let generated = self.graph.get_mut(id);
            generated.title = node
                .keyword("title")
                .and_then(Value::as_str)
                .map(String::from);
            generated.description = node
                .keyword("description")
                .and_then(Value::as_str)
                .map(String::from);
        }

        if let Some(reference) = node.keyword("$ref").and_then(Value::as_str) {
            let name = self.graph.get(id).name.clone();
            let shaped = self.build_ref(reference, &node, &name)?;
            self.graph.get_mut(id).kind = TypeKind::Alias(shaped.ty);
            return Ok(());
        }

        match select_shape(node.value) {
            Shape::Enum => self.populate_enum(&node, id),
            Shape::AllOf => self.populate_all_of(&node, id),
            Shape::Union => self.populate_union(&node, id),
            Shape::Object => self.populate_object(&node, id),
            Shape::Explicit { ref type_name, .. } if type_name == "object" => {
                self.populate_object(&node, id)
            }
            _ => {
                // $ref target with a non-nominal shape: a named alias.
                let name = self.graph.get(id).name.clone();
                let shaped = self.build(node, &name)?;
                self.graph.get_mut(id).kind = TypeKind::Alias(shaped.ty);
                Ok(())
            }
        }
    }

    /// Follow a `$ref` chain to the node it ultimately points at.
    fn deref_node(&self, node: SchemaNode<'d>) -> Result<SchemaNode<'d>, GenerateError> {
        let mut current = node;
        let mut hops = 0;
        while let Some(reference) = current.keyword("$ref").and_then(Value::as_str) {
            hops += 1;
            // A chain this long is a ref loop; report the last link.
            if hops > 32 {
                return Err(GenerateError::Resolution {
                    reference: reference.to_string(),
                    location: current.id.to_string(),
                });
            }
            let id = resolver::resolve(reference, &current.id, self.docs)?;
            current = self
                .docs
                .node(&id)
                .ok_or_else(|| GenerateError::Resolution {
                    reference: reference.to_string(),
                    location: current.id.to_string(),
                })?;
        }
        Ok(current)
    }
}

/// Name hint for a document-root ref target: the file stem of its URI.
fn document_stem(id: &CanonicalId) -> Option<String> {
    let segment = id.uri.path_segments()?.next_back()?;
    let stem = segment.split('.').next().unwrap_or(segment);
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}
