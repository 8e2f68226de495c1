//! Generation configuration.
//!
//! Everything here is validated eagerly, before any schema document is
//! read: a run either starts with a fully valid configuration or not at
//! all, and never partially emits output.

use crate::annotate::AnnotationStyle;
use crate::error::GenerateError;
use crate::naming::{NamingPolicy, DEFAULT_DELIMITERS};

/// Options consumed by the core. Everything else (target package, output
/// directory, encodings) belongs to the surrounding tooling.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Serialization convention applied to the whole run.
    pub annotation_style: AnnotationStyle,
    /// Characters that separate words in schema property names.
    pub property_word_delimiters: Vec<char>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            annotation_style: AnnotationStyle::default(),
            property_word_delimiters: DEFAULT_DELIMITERS.to_vec(),
        }
    }
}

impl GenerationConfig {
    /// Parse and validate raw option strings, as delivered by build tooling.
    ///
    /// Both failure modes report the invalid value verbatim.
    pub fn from_options(
        annotation_style: &str,
        property_word_delimiters: &str,
    ) -> Result<Self, GenerateError> {
        let style = annotation_style.parse::<AnnotationStyle>()?;
        let delimiters: Vec<char> = property_word_delimiters.chars().collect();
        // Validates the delimiter set; the policy itself is rebuilt per run.
        NamingPolicy::new(&delimiters)?;
        Ok(Self {
            annotation_style: style,
            property_word_delimiters: delimiters,
        })
    }
}
