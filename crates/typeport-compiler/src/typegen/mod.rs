//! Declaration generation from type graphs.
//!
//! Walks a [`TypeGraph`](typeport_core::TypeGraph) from one or more root types
//! and produces declarations for a target language. Currently supports
//! TypeScript.
//!
//! # Example
//!
//! ```ignore
//! use typeport_compiler::typegen::typescript::{self, Config, NamespaceMap};
//! use typeport_core::schema::Schema;
//!
//! let schema = Schema::from_json(json)?;
//! let namespaces = NamespaceMap::from(schema.prefixes.clone());
//! let output = typescript::emit(&schema.graph, &schema.roots, namespaces, Config::default())?;
//! ```

pub mod typescript;
