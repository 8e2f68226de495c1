//! Error taxonomy for a generation run.
//!
//! Every variant is a property of the static input or configuration: nothing
//! here is transient, so no error is retryable and a rerun on the same input
//! reproduces the same failure.

/// Fatal errors raised during type generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Invalid configuration, detected before any schema is read.
    /// The message always contains the offending value verbatim so calling
    /// tooling can surface it to users.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A `$ref` that points at nothing: dangling JSON pointer or an external
    /// document that was never registered.
    #[error("unresolvable $ref {reference:?} referenced from {location}")]
    Resolution { reference: String, location: String },

    /// Two distinct schema names collapsed to the same generated identifier
    /// even after disambiguation.
    #[error("identifier {identifier:?} is ambiguous between {first:?} and {second:?} at {location}")]
    NamingAmbiguity {
        identifier: String,
        first: String,
        second: String,
        location: String,
    },

    /// `allOf` combined two incompatible definitions of the same property.
    #[error("allOf merge conflict on property {property:?}: {first} vs {second}")]
    MergeConflict {
        property: String,
        first: String,
        second: String,
    },

    /// A `default` value whose JSON kind does not match the property's
    /// resolved type.
    #[error("default for property {property:?} is not a valid {expected} (found {found})")]
    InvalidDefault {
        property: String,
        expected: String,
        found: String,
    },
}
