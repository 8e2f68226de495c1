//! `$ref` resolution against a registered document set.
//!
//! The store owns every parsed document for the run; the core never fetches
//! or reads files itself. Resolution normalizes relative and absolute URIs
//! against the referring document's base and checks that the pointed-to node
//! exists. Failures are fatal and carry the offending ref verbatim.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::GenerateError;
use crate::schema::{CanonicalId, SchemaNode};

/// Immutable set of parsed schema documents, keyed by normalized base URI.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, Value>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parsed document under its base URI. Re-registering a URI
    /// replaces the previous document.
    pub fn insert(&mut self, mut uri: Url, document: Value) {
        uri.set_fragment(None);
        debug!(uri = %uri, "registered schema document");
        self.documents.insert(uri, document);
    }

    /// The node a canonical id points at, if the document is registered and
    /// the pointer lands on something.
    pub fn node(&self, id: &CanonicalId) -> Option<SchemaNode<'_>> {
        let document = self.documents.get(&id.uri)?;
        let value = if id.pointer.is_empty() {
            document
        } else {
            document.pointer(&id.pointer)?
        };
        Some(SchemaNode::new(value, id.clone()))
    }
}

/// Resolve a `$ref` string against the referring node's canonical location.
///
/// Accepted forms: `#`, `#/definitions/Foo`, `other.json`, `other.json#/x`
/// and absolute URIs with or without a pointer fragment. Named anchors
/// (`#foo`) are not pointers and are rejected.
pub fn resolve(
    reference: &str,
    context: &CanonicalId,
    documents: &DocumentStore,
) -> Result<CanonicalId, GenerateError> {
    let unresolvable = || GenerateError::Resolution {
        reference: reference.to_string(),
        location: context.to_string(),
    };

    let (uri_part, fragment) = match reference.split_once('#') {
        Some((uri, fragment)) => (uri, fragment),
        None => (reference, ""),
    };

    if !fragment.is_empty() && !fragment.starts_with('/') {
        return Err(unresolvable());
    }

    let uri = if uri_part.is_empty() {
        context.uri.clone()
    } else {
        let mut joined = context.uri.join(uri_part).map_err(|_| unresolvable())?;
        joined.set_fragment(None);
        joined
    };

    let id = CanonicalId::new(uri, fragment);
    if documents.node(&id).is_none() {
        return Err(unresolvable());
    }
    debug!(reference, resolved = %id, "resolved $ref");
    Ok(id)
}
