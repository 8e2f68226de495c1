//! Gson-style decoration.
//!
//! Gson needs no type-level metadata: a per-property `SerializedName`
//! marker is enough to preserve wire names that the naming policy has
//! rewritten into idiomatic identifiers.

use serde_json::Value;

use super::{AnnotationStyle, Annotator};
use crate::ir::{Annotation, GeneratedType, Property};

const SERIALIZED_NAME: &str = "com.google.gson.annotations.SerializedName";

pub struct GsonAnnotator;

impl Annotator for GsonAnnotator {
    fn style(&self) -> AnnotationStyle {
        AnnotationStyle::Gson
    }

    fn annotate_property(&self, property: &Property, _owner: &GeneratedType) -> Vec<Annotation> {
        vec![
            Annotation::new(SERIALIZED_NAME)
                .arg("value", Value::String(property.wire_name.clone())),
        ]
    }

    fn annotate_enum_constant(&self, value: &Value) -> Vec<Annotation> {
        let literal = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        vec![Annotation::new(SERIALIZED_NAME).arg("value", Value::String(literal))]
    }
}
