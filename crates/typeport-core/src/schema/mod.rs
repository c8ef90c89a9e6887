//! Schema documents: the JSON description of a type graph.
//!
//! A schema lists declared types (structs, defined types, well-known value
//! types) with their namespaces and fields. Field types are written as type
//! expressions (see [`expr`]). Loading produces a [`Schema`] whose
//! [`TypeGraph`](crate::TypeGraph) the emitter walks.

pub mod expr;
mod json;

#[cfg(test)]
mod json_tests;

pub use expr::{TypeExpr, TypeExprError};
pub use json::{Schema, SchemaError};
