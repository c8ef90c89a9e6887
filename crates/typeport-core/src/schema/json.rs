//! JSON deserialization and graph construction for schema documents.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

use super::expr::{self, TypeExpr, TypeExprError};
use crate::{
    Field, FloatKind, IntKind, TypeGraph, TypeId, TypeKind, UnsupportedKind, WellKnown,
};

/// Error while loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate type id `{0}`")]
    DuplicateType(String),

    #[error("type `{type_id}` must declare exactly one of `fields`, `underlying`, `well_known`")]
    ConflictingKinds { type_id: String },

    #[error("type `{type_id}`: unknown well-known type `{value}`")]
    UnknownWellKnown { type_id: String, value: String },

    #[error("{context}: invalid type expression: {source}")]
    TypeExpr {
        context: String,
        #[source]
        source: TypeExprError,
    },

    #[error("{context}: unknown type `{name}`")]
    UnknownType { context: String, name: String },

    #[error("type `{type_id}`: field #{index} has no name")]
    MissingFieldName { type_id: String, index: usize },

    #[error("type `{type_id}`: embedded field #{index} must refer to a declared type")]
    EmbeddedNotNamed { type_id: String, index: usize },

    #[error("type `{0}` is defined in terms of itself")]
    DefinitionCycle(String),
}

/// A loaded schema document.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub graph: TypeGraph,
    /// Namespace -> prefix entries carried by the document, in order.
    pub prefixes: IndexMap<String, String>,
    /// Default root type ids.
    pub roots: Vec<String>,
}

impl Schema {
    /// Parse a schema from JSON and build its type graph.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: RawSchema = serde_json::from_str(json)?;
        raw.build()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSchema {
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    #[serde(default)]
    roots: Vec<String>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    #[serde(default)]
    id: Option<String>,
    namespace: String,
    name: String,
    #[serde(default)]
    fields: Option<Vec<RawField>>,
    #[serde(default)]
    underlying: Option<String>,
    #[serde(default)]
    well_known: Option<String>,
}

impl RawType {
    fn type_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    embedded: bool,
    #[serde(default)]
    tag: String,
}

impl RawSchema {
    fn build(self) -> Result<Schema, SchemaError> {
        let mut graph = TypeGraph::new();
        let mut seen = HashSet::new();

        // Pass 1: declare every named type so fields may refer forward.
        for raw in &self.types {
            let type_id = raw.type_id();
            if !seen.insert(type_id.to_string()) {
                return Err(SchemaError::DuplicateType(type_id.to_string()));
            }

            let declared_kinds = [
                raw.fields.is_some(),
                raw.underlying.is_some(),
                raw.well_known.is_some(),
            ]
            .iter()
            .filter(|set| **set)
            .count();
            if declared_kinds > 1 {
                return Err(SchemaError::ConflictingKinds {
                    type_id: type_id.to_string(),
                });
            }

            if let Some(value) = &raw.well_known {
                let kind =
                    WellKnown::from_name(value).ok_or_else(|| SchemaError::UnknownWellKnown {
                        type_id: type_id.to_string(),
                        value: value.clone(),
                    })?;
                graph.declare_well_known(type_id, &raw.namespace, &raw.name, kind);
            } else if raw.underlying.is_some() {
                graph.declare_defined_pending(type_id, &raw.namespace, &raw.name);
            } else {
                graph.declare_struct(type_id, &raw.namespace, &raw.name);
            }
        }

        // Pass 2: resolve field types and underlying types.
        for raw in &self.types {
            let type_id = raw.type_id();
            let Some(id) = graph.lookup(type_id) else {
                continue;
            };

            if let Some(underlying) = &raw.underlying {
                let context = format!("type `{type_id}`");
                let target = lower_str(&mut graph, underlying, &context)?;
                graph.set_underlying(id, target);
                continue;
            }

            let Some(raw_fields) = &raw.fields else {
                continue;
            };
            let mut fields = Vec::with_capacity(raw_fields.len());
            for (index, raw_field) in raw_fields.iter().enumerate() {
                let context = match &raw_field.name {
                    Some(name) => format!("field `{type_id}.{name}`"),
                    None => format!("field #{index} of `{type_id}`"),
                };
                let ty = lower_str(&mut graph, &raw_field.ty, &context)?;
                let name = match (&raw_field.name, raw_field.embedded) {
                    (Some(name), _) => name.clone(),
                    (None, true) => embedded_name(&graph, ty).ok_or_else(|| {
                        SchemaError::EmbeddedNotNamed {
                            type_id: type_id.to_string(),
                            index,
                        }
                    })?,
                    (None, false) => {
                        return Err(SchemaError::MissingFieldName {
                            type_id: type_id.to_string(),
                            index,
                        });
                    }
                };
                fields.push(Field {
                    name,
                    ty,
                    embedded: raw_field.embedded,
                    tag: raw_field.tag.clone(),
                });
            }
            graph.set_fields(id, fields);
        }

        check_definition_cycles(&graph)?;

        tracing::debug!(
            declared = graph.declared().count(),
            total = graph.len(),
            "schema loaded"
        );

        Ok(Schema {
            graph,
            prefixes: self.prefixes,
            roots: self.roots,
        })
    }
}

fn lower_str(graph: &mut TypeGraph, input: &str, context: &str) -> Result<TypeId, SchemaError> {
    let parsed = expr::parse(input).map_err(|source| SchemaError::TypeExpr {
        context: context.to_string(),
        source,
    })?;
    lower(graph, &parsed, context)
}

/// Turn a parsed expression into a graph handle. Declared ids shadow builtins.
fn lower(graph: &mut TypeGraph, expr: &TypeExpr<'_>, context: &str) -> Result<TypeId, SchemaError> {
    let id = match expr {
        TypeExpr::Name(name) => {
            if let Some(id) = graph.lookup(name) {
                return Ok(id);
            }
            let kind = builtin(name).ok_or_else(|| SchemaError::UnknownType {
                context: context.to_string(),
                name: name.to_string(),
            })?;
            graph.intern(kind)
        }
        TypeExpr::Slice(elem) => {
            let elem = lower(graph, elem, context)?;
            graph.slice(elem)
        }
        TypeExpr::Array(len, elem) => {
            let elem = lower(graph, elem, context)?;
            graph.array(*len, elem)
        }
        TypeExpr::Map(key, value) => {
            let key = lower(graph, key, context)?;
            let value = lower(graph, value, context)?;
            graph.map(key, value)
        }
        TypeExpr::Pointer(pointee) => {
            let pointee = lower(graph, pointee, context)?;
            graph.pointer(pointee)
        }
        TypeExpr::Chan(elem) => {
            // The element must still name a real type.
            lower(graph, elem, context)?;
            graph.unsupported(UnsupportedKind::Chan)
        }
        TypeExpr::Interface => graph.unsupported(UnsupportedKind::Interface),
        TypeExpr::Func => graph.unsupported(UnsupportedKind::Func),
    };
    Ok(id)
}

fn builtin(name: &str) -> Option<TypeKind> {
    let kind = match name {
        "bool" => TypeKind::Bool,
        "string" => TypeKind::String,
        "int8" => TypeKind::Int(IntKind::I8),
        "int16" => TypeKind::Int(IntKind::I16),
        "int32" | "rune" => TypeKind::Int(IntKind::I32),
        "int64" => TypeKind::Int(IntKind::I64),
        "int" => TypeKind::Int(IntKind::Int),
        "uint8" | "byte" => TypeKind::Int(IntKind::U8),
        "uint16" => TypeKind::Int(IntKind::U16),
        "uint32" => TypeKind::Int(IntKind::U32),
        "uint64" => TypeKind::Int(IntKind::U64),
        "uint" => TypeKind::Int(IntKind::Uint),
        "uintptr" => TypeKind::Int(IntKind::Uintptr),
        "float32" => TypeKind::Float(FloatKind::F32),
        "float64" => TypeKind::Float(FloatKind::F64),
        "complex64" => TypeKind::Unsupported(UnsupportedKind::Complex64),
        "complex128" => TypeKind::Unsupported(UnsupportedKind::Complex128),
        "any" => TypeKind::Unsupported(UnsupportedKind::Interface),
        "unsafe.Pointer" => TypeKind::Unsupported(UnsupportedKind::UnsafePointer),
        _ => return None,
    };
    Some(kind)
}

/// Embedded members take the bare name of the (possibly pointed-to) type.
fn embedded_name(graph: &TypeGraph, ty: TypeId) -> Option<String> {
    let target = match graph.kind(ty) {
        TypeKind::Pointer { pointee } => *pointee,
        _ => ty,
    };
    match graph.kind(target) {
        TypeKind::Struct { named, .. }
        | TypeKind::Defined { named, .. }
        | TypeKind::WellKnown { named, .. } => Some(named.name.clone()),
        _ => None,
    }
}

/// A defined type may only reach itself again through a struct. Any other
/// path (`type A []A`, `type M map[string]M`) has no finite wire form.
fn check_definition_cycles(graph: &TypeGraph) -> Result<(), SchemaError> {
    for (type_id, start) in graph.declared() {
        if !matches!(graph.kind(start), TypeKind::Defined { .. }) {
            continue;
        }
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            for next in structural_edges(graph.kind(current)) {
                if next == start {
                    return Err(SchemaError::DefinitionCycle(type_id.to_string()));
                }
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
    }
    Ok(())
}

/// Types a kind is built from, not counting struct fields.
fn structural_edges(kind: &TypeKind) -> Vec<TypeId> {
    match kind {
        TypeKind::Defined { underlying, .. } => vec![*underlying],
        TypeKind::Array { elem, .. } | TypeKind::Slice { elem } => vec![*elem],
        TypeKind::Map { key, value } => vec![*key, *value],
        TypeKind::Pointer { pointee } => vec![*pointee],
        _ => Vec::new(),
    }
}
