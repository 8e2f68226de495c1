//! Schema nodes and canonical schema identity.
//!
//! A [`SchemaNode`] is a borrowed view into a parsed document; documents are
//! immutable once registered and owned by the [`DocumentStore`](crate::resolver::DocumentStore)
//! for the run. A [`CanonicalId`] (normalized document URI plus JSON-pointer
//! fragment) is the key the type graph deduplicates on.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Normalized absolute URI + JSON-pointer path of one schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalId {
    /// Absolute, fragmentless document URI.
    pub uri: Url,
    /// RFC 6901 pointer into the document. Empty for the document root.
    pub pointer: String,
}

impl CanonicalId {
    pub fn root(uri: Url) -> Self {
        Self {
            uri,
            pointer: String::new(),
        }
    }

    pub fn new(uri: Url, pointer: impl Into<String>) -> Self {
        Self {
            uri,
            pointer: pointer.into(),
        }
    }

    /// Identity of a child node one object key (or array index) deeper.
    pub fn child(&self, segment: &str) -> Self {
        let mut pointer = String::with_capacity(self.pointer.len() + segment.len() + 1);
        pointer.push_str(&self.pointer);
        pointer.push('/');
        pointer.push_str(&escape_segment(segment));
        Self {
            uri: self.uri.clone(),
            pointer,
        }
    }

    /// Last pointer segment, unescaped. `None` at the document root.
    pub fn last_segment(&self) -> Option<String> {
        self.pointer
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(unescape_segment)
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.uri, self.pointer)
    }
}

fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// A parsed JSON Schema fragment and its canonical location.
#[derive(Debug, Clone)]
pub struct SchemaNode<'a> {
    pub value: &'a Value,
    pub id: CanonicalId,
}

impl<'a> SchemaNode<'a> {
    pub fn new(value: &'a Value, id: CanonicalId) -> Self {
        Self { value, id }
    }

    /// Value of a keyword on this node, if present.
    pub fn keyword(&self, name: &str) -> Option<&'a Value> {
        self.value.get(name)
    }

    /// Child node under an object key.
    pub fn child(&self, segment: &str) -> Option<SchemaNode<'a>> {
        let value = self.value.get(segment)?;
        Some(SchemaNode {
            value,
            id: self.id.child(segment),
        })
    }

    /// Child node at an array index.
    pub fn child_index(&self, index: usize) -> Option<SchemaNode<'a>> {
        let value = self.value.get(index)?;
        Some(SchemaNode {
            value,
            id: self.id.child(&index.to_string()),
        })
    }
}
