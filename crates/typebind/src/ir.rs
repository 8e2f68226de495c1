//! The generated type model.
//!
//! Passive data: nothing in this module interprets schemas or decides names.
//! The rule engine builds a [`TypeGraph`] incrementally, the annotation pass
//! attaches [`Annotation`] metadata, and the finished graph is handed to an
//! emitter as-is.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::schema::CanonicalId;

/// Identity of a generated type within one run's [`TypeGraph`].
///
/// The dedup invariant is stated over these ids: schema nodes with equal
/// [`CanonicalId`] resolve to the same `TypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    /// Position in [`TypeGraph::types`], for emitters that key output
    /// artifacts by type.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of generated types for one run, indexed by canonical schema identity.
///
/// Types are created placeholder-first: `insert_placeholder` registers the
/// canonical id *before* the caller recurses into the schema body, so a
/// self-referential schema finds the placeholder on its second visit and
/// terminates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeGraph {
    types: Vec<GeneratedType>,
    #[serde(skip)]
    ids: HashMap<CanonicalId, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The type previously created for this canonical id, if any.
    pub fn lookup(&self, id: &CanonicalId) -> Option<TypeId> {
        self.ids.get(id).copied()
    }

    /// Register an empty placeholder for `origin` and return its id.
    pub(crate) fn insert_placeholder(&mut self, origin: CanonicalId, name: String) -> TypeId {
        let id = TypeId(self.types.len());
        self.ids.insert(origin.clone(), id);
        self.types.push(GeneratedType {
            id,
            name,
            kind: TypeKind::Alias(TypeRef::Any),
            supertype: None,
            origin,
            title: None,
            description: None,
            annotations: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: TypeId) -> &GeneratedType {
        &self.types[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> &mut GeneratedType {
        &mut self.types[id.0]
    }

    /// All generated types, in creation order (stable across runs).
    pub fn types(&self) -> &[GeneratedType] {
        &self.types
    }

    pub(crate) fn types_mut(&mut self) -> &mut [GeneratedType] {
        &mut self.types
    }

    /// First type with the given generated name.
    pub fn find(&self, name: &str) -> Option<&GeneratedType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// A class, enumeration, union marker, or primitive alias to be emitted.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedType {
    pub id: TypeId,
    /// Generated (disambiguated) type name.
    pub name: String,
    pub kind: TypeKind,
    /// Supertype marker for `oneOf`/`anyOf` siblings.
    pub supertype: Option<TypeId>,
    /// Canonical identity of the originating schema node. Diagnostics only.
    pub origin: CanonicalId,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Type-level serialization metadata, filled by the decoration pass.
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Serialize)]
pub enum TypeKind {
    Object(ObjectDef),
    Enum(EnumDef),
    /// Empty supertype marker shared by `oneOf`/`anyOf` sibling types.
    Union,
    /// A named alias for a non-object shape (`$ref` to a primitive, array
    /// or map schema).
    Alias(TypeRef),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectDef {
    /// Properties in authored order. Order is contractual: annotation styles
    /// that emit a property-order directive consume it as-is.
    pub properties: Vec<Property>,
    /// Value type for undeclared properties; `None` means the object is
    /// closed (`additionalProperties: false`).
    pub additional: Option<TypeRef>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EnumDef {
    pub constants: Vec<EnumConstant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnumConstant {
    /// The literal schema value, preserved exactly.
    pub value: Value,
    /// Generated constant identifier. Unique within the enum.
    pub ident: String,
    pub annotations: Vec<Annotation>,
}

/// A single property owned by one object type.
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    /// Schema field name; the wire identity, never transformed.
    pub wire_name: String,
    /// Generated identifier, post naming policy.
    pub ident: String,
    pub type_ref: TypeRef,
    pub required: bool,
    /// Set when the schema declared `type: [.., "null"]`.
    pub nullable: bool,
    /// Kind-checked against `type_ref` when that is a primitive.
    pub default: Option<Value>,
    pub description: Option<String>,
    /// Validation facets, passed through unevaluated for the emitter.
    pub restrictions: Restrictions,
    /// Property-level serialization metadata, filled by the decoration pass.
    pub annotations: Vec<Annotation>,
}

/// Unevaluated validation facets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Restrictions {
    pub minimum: Option<Value>,
    pub maximum: Option<Value>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: Option<bool>,
}

impl Restrictions {
    /// True when no facet is set, so emitters can skip validation output
    /// for the property entirely.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reference to a type: primitive, another generated type, or a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeRef {
    Primitive(Primitive),
    Ref(TypeId),
    List(Box<TypeRef>),
    /// Fixed-arity sequence from an `items` array (tuple typing).
    Tuple(Vec<TypeRef>),
    /// String-keyed map from an `additionalProperties` schema.
    Map(Box<TypeRef>),
    Any,
}

/// Primitive types, including format-refined string variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
    DateTime,
    Date,
    Time,
    Uri,
    Uuid,
    Bytes,
}

impl Primitive {
    /// JSON kind a `default` literal must have for this primitive.
    pub fn json_kind(self) -> &'static str {
        match self {
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            _ => "string",
        }
    }
}

/// Serialization metadata as structure, never as source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Simple name, e.g. `JsonProperty`.
    pub name: String,
    /// Fully qualified path the emitter should import.
    pub import_path: String,
    /// Named arguments in declaration order.
    pub args: Vec<(String, Value)>,
}

impl Annotation {
    pub fn new(import_path: impl Into<String>) -> Self {
        let import_path = import_path.into();
        let name = import_path
            .rsplit('.')
            .next()
            .unwrap_or(import_path.as_str())
            .to_string();
        Self {
            name,
            import_path,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.push((key.into(), value));
        self
    }
}
