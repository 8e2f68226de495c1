//! Serialization-metadata decoration.
//!
//! Annotators transform nothing: they only attach [`Annotation`] metadata to
//! a finished type graph. The rule engine never calls into this module; the
//! [`decorate`] pass runs once, after generation, over immutable structure.
//!
//! Property decoration always receives the original wire name, never the
//! generated identifier, so the emitted metadata preserves wire-format
//! identity regardless of how the naming policy transformed the name.

mod gson;
mod jackson;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::GenerateError;
use crate::ir::{Annotation, GeneratedType, Property, TypeGraph, TypeKind};

pub use gson::GsonAnnotator;
pub use jackson::JacksonAnnotator;

/// The serialization convention for one generation run.
///
/// Resolved once from configuration before any schema is read and never
/// reread mid-run, so every type in a run is decorated consistently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AnnotationStyle {
    #[default]
    Jackson2,
    Jackson1,
    Gson,
    None,
}

impl FromStr for AnnotationStyle {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jackson" | "jackson2" => Ok(AnnotationStyle::Jackson2),
            "jackson1" => Ok(AnnotationStyle::Jackson1),
            "gson" => Ok(AnnotationStyle::Gson),
            "none" => Ok(AnnotationStyle::None),
            other => Err(GenerateError::Config {
                message: format!(
                    "unrecognized annotation style {other:?} (expected one of jackson, jackson1, jackson2, gson, none)"
                ),
            }),
        }
    }
}

impl fmt::Display for AnnotationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnnotationStyle::Jackson2 => "jackson2",
            AnnotationStyle::Jackson1 => "jackson1",
            AnnotationStyle::Gson => "gson",
            AnnotationStyle::None => "none",
        })
    }
}

/// An annotation strategy: three injection points, all additive.
pub trait Annotator: Send + Sync {
    fn style(&self) -> AnnotationStyle;

    /// Type-level metadata for a finished type.
    fn annotate_type(&self, _ty: &GeneratedType) -> Vec<Annotation> {
        Vec::new()
    }

    /// Property-level metadata. `property.wire_name` is the untouched
    /// schema field name.
    fn annotate_property(&self, _property: &Property, _owner: &GeneratedType) -> Vec<Annotation> {
        Vec::new()
    }

    /// Metadata for one enum constant's literal value.
    fn annotate_enum_constant(&self, _value: &Value) -> Vec<Annotation> {
        Vec::new()
    }
}

/// The inert strategy: a valid selection that attaches nothing.
pub struct NoopAnnotator;

impl Annotator for NoopAnnotator {
    fn style(&self) -> AnnotationStyle {
        AnnotationStyle::None
    }
}

static JACKSON2: JacksonAnnotator = JacksonAnnotator::v2();
static JACKSON1: JacksonAnnotator = JacksonAnnotator::v1();
static GSON: GsonAnnotator = GsonAnnotator;
static NOOP: NoopAnnotator = NoopAnnotator;

/// The annotator registered for a style.
pub fn annotator_for(style: AnnotationStyle) -> &'static dyn Annotator {
    match style {
        AnnotationStyle::Jackson2 => &JACKSON2,
        AnnotationStyle::Jackson1 => &JACKSON1,
        AnnotationStyle::Gson => &GSON,
        AnnotationStyle::None => &NOOP,
    }
}

/// Single decoration pass over a completed type graph.
pub fn decorate(graph: &mut TypeGraph, style: AnnotationStyle) {
    let annotator = annotator_for(style);

    for index in 0..graph.types().len() {
        let ty = &graph.types()[index];
        let type_annotations = annotator.annotate_type(ty);

        let member_annotations: Vec<Vec<Annotation>> = match &ty.kind {
            TypeKind::Object(def) => def
                .properties
                .iter()
                .map(|p| annotator.annotate_property(p, ty))
                .collect(),
            TypeKind::Enum(def) => def
                .constants
                .iter()
                .map(|c| annotator.annotate_enum_constant(&c.value))
                .collect(),
            _ => Vec::new(),
        };

        let ty = &mut graph.types_mut()[index];
        ty.annotations = type_annotations;
        match &mut ty.kind {
            TypeKind::Object(def) => {
                for (property, annotations) in def.properties.iter_mut().zip(member_annotations) {
                    property.annotations = annotations;
                }
            }
            TypeKind::Enum(def) => {
                for (constant, annotations) in def.constants.iter_mut().zip(member_annotations) {
                    constant.annotations = annotations;
                }
            }
            _ => {}
        }
    }
}
