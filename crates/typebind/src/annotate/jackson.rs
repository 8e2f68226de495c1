//! Jackson-style decoration, generations 1 and 2.
//!
//! Both generations carry the same metadata shapes; they differ in the
//! annotation packages (`org.codehaus.jackson` vs `com.fasterxml.jackson`)
//! and in how non-null inclusion is spelled.

use serde_json::{json, Value};

use super::{AnnotationStyle, Annotator};
use crate::ir::{Annotation, GeneratedType, Property, TypeKind};

#[derive(Debug, Clone, Copy)]
enum Generation {
    V1,
    V2,
}

pub struct JacksonAnnotator {
    generation: Generation,
}

impl JacksonAnnotator {
    pub const fn v1() -> Self {
        Self {
            generation: Generation::V1,
        }
    }

    pub const fn v2() -> Self {
        Self {
            generation: Generation::V2,
        }
    }

    fn property_import(&self) -> &'static str {
        match self.generation {
            Generation::V1 => "org.codehaus.jackson.annotate.JsonProperty",
            Generation::V2 => "com.fasterxml.jackson.annotation.JsonProperty",
        }
    }
}

impl Annotator for JacksonAnnotator {
    fn style(&self) -> AnnotationStyle {
        match self.generation {
            Generation::V1 => AnnotationStyle::Jackson1,
            Generation::V2 => AnnotationStyle::Jackson2,
        }
    }

    fn annotate_type(&self, ty: &GeneratedType) -> Vec<Annotation> {
        let TypeKind::Object(def) = &ty.kind else {
            return Vec::new();
        };
        let wire_names: Vec<&str> = def.properties.iter().map(|p| p.wire_name.as_str()).collect();

        let order_import = match self.generation {
            Generation::V1 => "org.codehaus.jackson.annotate.JsonPropertyOrder",
            Generation::V2 => "com.fasterxml.jackson.annotation.JsonPropertyOrder",
        };
        let inclusion = match self.generation {
            Generation::V1 => Annotation::new("org.codehaus.jackson.map.annotate.JsonSerialize")
                .arg("include", json!("JsonSerialize.Inclusion.NON_NULL")),
            Generation::V2 => Annotation::new("com.fasterxml.jackson.annotation.JsonInclude")
                .arg("value", json!("JsonInclude.Include.NON_NULL")),
        };

        vec![
            Annotation::new(order_import).arg("value", json!(wire_names)),
            inclusion,
        ]
    }

    fn annotate_property(&self, property: &Property, _owner: &GeneratedType) -> Vec<Annotation> {
        vec![
            Annotation::new(self.property_import())
                .arg("value", Value::String(property.wire_name.clone())),
        ]
    }

    fn annotate_enum_constant(&self, value: &Value) -> Vec<Annotation> {
        let literal = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        vec![Annotation::new(self.property_import()).arg("value", Value::String(literal))]
    }
}
