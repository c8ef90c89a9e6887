//! typeport compiler: type graph to TypeScript declarations.
//!
//! This crate walks a [`TypeGraph`](typeport_core::TypeGraph) and produces
//! the TypeScript declarations that describe its wire form:
//! - `typegen::typescript` - the visitor, registry, and renderer

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fmt;

use typeport_core::{TagError, UnsupportedKind};

pub mod typegen;

/// Fatal errors raised while translating a type graph.
///
/// Every error aborts the run. Output is only produced once all requested
/// roots resolved, so a failed run never yields partial declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A struct's namespace has no configured prefix.
    #[error("no prefix configured for namespace `{namespace}` (needed by `{type_name}`)")]
    UnmappedNamespace {
        namespace: String,
        type_name: String,
    },

    /// A struct embeds more than one type.
    #[error("`{type_name}` has multiple embedded types")]
    AmbiguousEmbedding { type_name: String },

    /// A field tag uses a flag the emitter does not understand.
    #[error("`{type_name}.{field}`: unsupported {key} directive `{directive}`")]
    UnsupportedDirective {
        type_name: String,
        field: String,
        key: &'static str,
        directive: String,
    },

    /// Record/tuple shape rules were violated.
    #[error("`{type_name}`: {reason}")]
    ShapeConflict {
        type_name: String,
        reason: ShapeConflict,
    },

    /// A kind with no wire representation was reached.
    #[error("unsupported kind `{kind}` at {location}")]
    UnsupportedKind {
        kind: UnsupportedKind,
        location: String,
    },

    /// Configured prefixes that no emitted type needed.
    #[error("unused namespace prefixes: {}", .namespaces.join(", "))]
    StaleConfiguration { namespaces: Vec<String> },

    /// A struct that collapses to its embedded type is referenced while that
    /// embedded type is still being resolved.
    #[error("`{type_name}` aliases its embedded type but is referenced from within it")]
    CyclicAlias { type_name: String },

    /// A defined type contains itself without a struct in between, so its
    /// wire form would be infinite.
    #[error("`{type_name}` contains itself without an intervening struct")]
    RecursiveDefinition { type_name: String },

    /// A requested root id is not declared in the graph.
    #[error("unknown root type `{0}`")]
    UnknownRoot(String),

    /// A field's struct tag could not be parsed.
    #[error("`{type_name}.{field}`: {source}")]
    Tag {
        type_name: String,
        field: String,
        #[source]
        source: TagError,
    },
}

/// The specific record/tuple rule a struct broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeConflict {
    /// The tuple marker appeared after fields were already rendered.
    TupleAfterFields,
    /// Two tuple markers on the same struct.
    TupleRequestedTwice,
    /// An optional member inside a tuple.
    OptionalInTuple { field: String },
    /// A tuple struct that also embeds a type.
    ExtendsInTuple,
}

impl fmt::Display for ShapeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeConflict::TupleAfterFields => {
                f.write_str("toarray marker must precede all rendered fields")
            }
            ShapeConflict::TupleRequestedTwice => f.write_str("toarray requested more than once"),
            ShapeConflict::OptionalInTuple { field } => {
                write!(f, "field `{field}` cannot be optional in a tuple")
            }
            ShapeConflict::ExtendsInTuple => f.write_str("tuple types cannot extend another type"),
        }
    }
}

/// Result type for emission.
pub type Result<T> = std::result::Result<T, Error>;
