//! JSON Schema to serialization-annotated type graphs.
//!
//! `typebind` interprets a JSON Schema document graph into a deduplicated,
//! named type graph (classes, properties, enumerations, unions), then
//! decorates it with serialization metadata for a chosen runtime library
//! convention. The graph is handed to an emitter as passive structure; this
//! crate never produces source text and never touches the filesystem.
//!
//! # Architecture
//!
//! ```text
//! Schema documents        Rule engine             Decoration
//! ────────────────     ────────────────     ─────────────────────
//! parsed JSON      ─┐                    ┌─> Jackson 2 metadata
//! + base URIs      ─┼─> TypeGraph ───────┼─> Jackson 1 metadata
//! ($ref-linked)    ─┘   (ir.rs)          ├─> Gson metadata
//!                                        └─> none (inert)
//! ```
//!
//! # Example
//!
//! ```
//! use typebind::{generate, ir::TypeKind};
//!
//! let schema = serde_json::json!({
//!     "type": "object",
//!     "title": "User",
//!     "properties": {
//!         "id": { "type": "string" },
//!         "first_name": { "type": "string" }
//!     },
//!     "required": ["id"]
//! });
//!
//! let graph = generate(&schema, "User").unwrap();
//! let user = graph.find("User").unwrap();
//! let TypeKind::Object(def) = &user.kind else { panic!() };
//! assert_eq!(def.properties[1].ident, "firstName");
//! assert_eq!(def.properties[1].wire_name, "first_name");
//! ```
//!
//! # Cyclic schemas
//!
//! Generated types are registered placeholder-first under their canonical
//! identity (normalized URI + JSON pointer), so self-referential and
//! mutually recursive schemas terminate: the second visit to an identity
//! finds the placeholder and uses it as a type reference.

pub mod annotate;
pub mod config;
pub mod error;
pub mod ir;
pub mod naming;
pub mod resolver;
pub mod rules;
pub mod schema;

use serde_json::Value;
use url::Url;

pub use annotate::{AnnotationStyle, Annotator};
pub use config::GenerationConfig;
pub use error::GenerateError;
pub use ir::{GeneratedType, Property, TypeGraph, TypeId, TypeRef};
pub use schema::CanonicalId;

use resolver::DocumentStore;
use rules::RuleEngine;

/// Base URI assumed for documents generated without one.
pub const DEFAULT_BASE_URI: &str = "memory://typebind/schema.json";

/// Drives generation runs: holds configuration and the registered document
/// set. One run processes one schema document graph to completion.
pub struct Mapper {
    config: GenerationConfig,
    docs: DocumentStore,
}

impl Mapper {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            docs: DocumentStore::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(GenerationConfig::default())
    }

    /// Register an external document so absolute or relative `$ref`s can
    /// reach it. The core never fetches documents itself.
    pub fn register_document(&mut self, uri: &str, document: Value) -> Result<(), GenerateError> {
        let url = parse_uri(uri)?;
        self.docs.insert(url, document);
        Ok(())
    }

    /// Generate the decorated type graph for a root schema.
    ///
    /// The root document is registered under `base_uri`, the rule engine
    /// walks the graph with a run-local dedup cache, and the decoration
    /// pass then runs over the finished graph. Errors abort the run with
    /// nothing emitted.
    pub fn generate(
        &mut self,
        root: &Value,
        base_uri: &str,
        name_hint: &str,
    ) -> Result<TypeGraph, GenerateError> {
        let naming = naming::NamingPolicy::new(&self.config.property_word_delimiters)?;
        let url = parse_uri(base_uri)?;
        self.docs.insert(url.clone(), root.clone());

        let engine = RuleEngine::new(&self.docs, naming);
        let mut graph = engine.run(CanonicalId::root(url), name_hint)?;
        annotate::decorate(&mut graph, self.config.annotation_style);
        Ok(graph)
    }
}

fn parse_uri(uri: &str) -> Result<Url, GenerateError> {
    Url::parse(uri).map_err(|e| GenerateError::Config {
        message: format!("invalid document uri {uri:?}: {e}"),
    })
}

/// Generate with the default configuration (Jackson 2, `_`/`-` delimiters).
pub fn generate(root: &Value, name_hint: &str) -> Result<TypeGraph, GenerateError> {
    Mapper::with_defaults().generate(root, DEFAULT_BASE_URI, name_hint)
}

/// Generate with an explicit annotation style and default delimiters.
pub fn generate_with_style(
    root: &Value,
    name_hint: &str,
    style: AnnotationStyle,
) -> Result<TypeGraph, GenerateError> {
    let config = GenerationConfig {
        annotation_style: style,
        ..GenerationConfig::default()
    };
    Mapper::new(config).generate(root, DEFAULT_BASE_URI, name_hint)
}
