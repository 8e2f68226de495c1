//! Explicit `type` strings and `format` refinement.

use crate::ir::{Primitive, TypeRef};

/// Map an explicit non-object `type` to a type reference, refined by
/// `format` where one applies. Unknown types and unknown formats degrade
/// gracefully rather than failing the run.
pub(super) fn primitive_type(type_name: &str, format: Option<&str>) -> TypeRef {
    match type_name {
        "string" => TypeRef::Primitive(match format {
            Some("date-time") => Primitive::DateTime,
            Some("date") => Primitive::Date,
            Some("time") => Primitive::Time,
            Some("uri") => Primitive::Uri,
            Some("uuid") => Primitive::Uuid,
            Some("base64") => Primitive::Bytes,
            _ => Primitive::String,
        }),
        "integer" => TypeRef::Primitive(Primitive::Integer),
        "number" => TypeRef::Primitive(Primitive::Number),
        "boolean" => TypeRef::Primitive(Primitive::Boolean),
        _ => TypeRef::Any,
    }
}
