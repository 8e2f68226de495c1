//! Naming policy and shape selection.
//!
//! Identifier derivation tokenizes raw schema names on a configurable
//! delimiter set plus camelCase boundaries, then re-joins per the target
//! convention. Wire names are never touched here; preserving them is the
//! annotation layer's job.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::GenerateError;
use crate::schema::CanonicalId;

/// Word delimiters used by default: underscore and hyphen.
pub const DEFAULT_DELIMITERS: [char; 2] = ['_', '-'];

/// Maps raw schema names to identifiers in the target convention.
#[derive(Debug, Clone)]
pub struct NamingPolicy {
    delimiters: Vec<char>,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl NamingPolicy {
    /// Build a policy from a configured delimiter set.
    ///
    /// Alphanumeric delimiters would eat the name itself, so they are a
    /// configuration error, reported with the offending character verbatim.
    pub fn new(delimiters: &[char]) -> Result<Self, GenerateError> {
        for c in delimiters {
            if c.is_alphanumeric() {
                return Err(GenerateError::Config {
                    message: format!("invalid property word delimiter {c:?}"),
                });
            }
        }
        Ok(Self {
            delimiters: delimiters.to_vec(),
        })
    }

    /// camelCase, for property identifiers.
    pub fn camel(&self, raw: &str) -> String {
        let tokens = self.tokenize(raw);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i == 0 {
                out.push_str(&token.to_lowercase());
            } else {
                out.push_str(&capitalize(token));
            }
        }
        finish_identifier(out, "value")
    }

    /// PascalCase, for type names.
    pub fn pascal(&self, raw: &str) -> String {
        let mut out = String::new();
        for token in self.tokenize(raw) {
            out.push_str(&capitalize(&token));
        }
        finish_identifier(out, "Value")
    }

    /// SCREAMING_SNAKE, for enum constants.
    pub fn constant(&self, raw: &str) -> String {
        let tokens = self.tokenize(raw);
        let joined = tokens
            .iter()
            .map(|t| t.to_uppercase())
            .collect::<Vec<_>>()
            .join("_");
        finish_identifier(joined, "EMPTY")
    }

    /// Split a raw name into words. Configured delimiters separate words;
    /// any other non-alphanumeric character is dropped without creating a
    /// boundary (so the delimiter set actually decides word structure).
    /// Lower→upper, letter→digit and acronym-end camel boundaries also split.
    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let chars: Vec<char> = raw.chars().collect();
        let mut tokens = Vec::new();
        let mut current = String::new();

        for i in 0..chars.len() {
            let c = chars[i];
            if self.delimiters.contains(&c) {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                continue;
            }
            if !c.is_alphanumeric() {
                continue;
            }
            if !current.is_empty() {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = (c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric()))
                    || (c.is_uppercase() && prev.is_uppercase() && next_lower)
                    || (c.is_numeric() && prev.is_alphabetic());
                if boundary {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Empty identifiers fall back to a placeholder; digit-leading identifiers
/// get a leading underscore so they stay legal in the target language.
fn finish_identifier(ident: String, fallback: &str) -> String {
    if ident.is_empty() {
        return fallback.to_string();
    }
    if ident.chars().next().is_some_and(|c| c.is_numeric()) {
        return format!("_{ident}");
    }
    ident
}

/// One declaration scope's set of claimed identifiers.
///
/// Keys are compared case-insensitively so conventions that fold case (enum
/// constants, most target languages' file systems) cannot silently collide.
/// Collisions get a numeric disambiguator in declaration order, which keeps
/// output reproducible across runs.
#[derive(Debug, Default)]
pub struct Namespace {
    used: HashMap<String, String>,
}

impl Namespace {
    /// Claim `ident` for `owner` (the raw schema name, for diagnostics).
    /// Returns the possibly-disambiguated identifier.
    pub fn claim(
        &mut self,
        ident: String,
        owner: &str,
        location: &CanonicalId,
    ) -> Result<String, GenerateError> {
        self.claim_with_separator(ident, "", owner, location)
    }

    /// Like [`claim`](Self::claim) with a separator between the identifier
    /// and the disambiguator (`_` for SCREAMING_SNAKE constants).
    pub fn claim_with_separator(
        &mut self,
        ident: String,
        separator: &str,
        owner: &str,
        location: &CanonicalId,
    ) -> Result<String, GenerateError> {
        let key = ident.to_lowercase();
        if !self.used.contains_key(&key) {
            self.used.insert(key, owner.to_string());
            return Ok(ident);
        }
        for n in 1..100u32 {
            let candidate = format!("{ident}{separator}{n}");
            let candidate_key = candidate.to_lowercase();
            if !self.used.contains_key(&candidate_key) {
                self.used.insert(candidate_key, owner.to_string());
                return Ok(candidate);
            }
        }
        let first = self.used.get(&key).cloned().unwrap_or_default();
        Err(GenerateError::NamingAmbiguity {
            identifier: ident,
            first,
            second: owner.to_string(),
            location: location.to_string(),
        })
    }
}

/// Classification of a schema node, in fixed precedence order:
/// explicit `enum` > explicit `type` > composition > structural inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Explicit `enum` keyword.
    Enum,
    /// Explicit `type` keyword. For a type array (`["string","null"]`) this
    /// is the first non-null entry with nullability recorded alongside.
    Explicit { type_name: String, nullable: bool },
    /// `allOf` composition: constituents merge into one object type.
    AllOf,
    /// `oneOf`/`anyOf` composition: siblings under a union marker.
    Union,
    /// No explicit type, but `properties`/`additionalProperties` present.
    Object,
    /// No explicit type, but `items` present.
    Array,
    /// Nothing recognizable; untyped.
    Any,
}

/// Decide what a schema node is. Unrecognized keywords never influence the
/// decision (forward-compatible skip).
pub fn select_shape(value: &Value) -> Shape {
    if value.get("enum").is_some() {
        return Shape::Enum;
    }

    match value.get("type") {
        Some(Value::String(type_name)) => {
            return Shape::Explicit {
                type_name: type_name.clone(),
                nullable: false,
            };
        }
        Some(Value::Array(entries)) => {
            let names: Vec<&str> = entries.iter().filter_map(Value::as_str).collect();
            let nullable = names.contains(&"null");
            if let Some(first) = names.iter().find(|n| **n != "null") {
                return Shape::Explicit {
                    type_name: (*first).to_string(),
                    nullable,
                };
            }
            return Shape::Any;
        }
        _ => {}
    }

    if value.get("allOf").is_some() {
        return Shape::AllOf;
    }
    if value.get("oneOf").is_some() || value.get("anyOf").is_some() {
        return Shape::Union;
    }
    if value.get("properties").is_some() || value.get("additionalProperties").is_some() {
        return Shape::Object;
    }
    if value.get("items").is_some() {
        return Shape::Array;
    }
    Shape::Any
}
