//! Core emitter struct and type resolution.

use std::collections::{HashMap, HashSet};

use typeport_core::{
    Field, FloatKind, IntKind, Named, TypeGraph, TypeId, TypeKind, UnsupportedKind, WellKnown,
};

use super::directives::{self, DirectiveError, FieldPlan};
use super::naming::{self, NamespaceMap};
use super::{BYTES_TYPE, Config, Declaration, Member, Registry, RenderedType};
use crate::{Error, Result, ShapeConflict};

/// A struct whose fields are still being resolved.
#[derive(Debug)]
struct Pending {
    reference: String,
    referenced: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Record,
    Tuple,
}

/// A struct's fields after directives were applied.
struct Layout {
    shape: Shape,
    extends: Option<String>,
    members: Vec<Member>,
}

/// TypeScript emitter over a type graph.
pub struct Emitter<'a> {
    graph: &'a TypeGraph,
    config: Config,
    namespaces: NamespaceMap,
    registry: Registry,
    /// Structs currently on the resolution stack, for self references.
    pending: HashMap<TypeId, Pending>,
    /// Non-struct defined types being expanded since the innermost struct.
    expanding: HashSet<TypeId>,
    /// `Type.field` trail for error locations.
    trail: Vec<String>,
}

impl<'a> Emitter<'a> {
    pub fn new(graph: &'a TypeGraph, namespaces: NamespaceMap, config: Config) -> Self {
        Self {
            graph,
            config,
            namespaces,
            registry: Registry::new(),
            pending: HashMap::new(),
            expanding: HashSet::new(),
            trail: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All declarations registered so far, rendered in order.
    pub fn render(&self) -> String {
        self.registry.render(&self.config)
    }

    /// Resolve a declared type by its schema id.
    pub fn resolve_root(&mut self, type_id: &str) -> Result<String> {
        let id = self
            .graph
            .lookup(type_id)
            .ok_or_else(|| Error::UnknownRoot(type_id.to_string()))?;
        tracing::debug!(root = type_id, "resolving root");
        self.resolve(id)
    }

    /// Return the TypeScript expression for `id`, registering every struct
    /// reached on the way.
    pub fn resolve(&mut self, id: TypeId) -> Result<String> {
        if let Some(rendered) = self.registry.get(id) {
            return Ok(rendered.reference.clone());
        }
        if let Some(pending) = self.pending.get_mut(&id) {
            pending.referenced = true;
            return Ok(pending.reference.clone());
        }

        let graph = self.graph;
        tracing::trace!(ty = %graph.display(id), "resolve");

        match graph.kind(id) {
            TypeKind::WellKnown { kind, .. } => Ok(self.well_known(*kind)),
            TypeKind::Bool => Ok("boolean".to_string()),
            TypeKind::Int(kind) => Ok(self.int(*kind)),
            TypeKind::Float(FloatKind::F32 | FloatKind::F64) => Ok("number".to_string()),
            TypeKind::String => Ok("string".to_string()),
            TypeKind::Array { elem, .. } | TypeKind::Slice { elem } => self.sequence(*elem),
            TypeKind::Map { key, value } => self.map(*key, *value),
            TypeKind::Pointer { pointee } => self.resolve(*pointee),
            TypeKind::Struct { named, fields } => self.structure(id, named, fields),
            TypeKind::Defined { named, underlying } => {
                match graph.kind(graph.underlying(*underlying)) {
                    // A defined struct is its own declaration with the
                    // underlying struct's fields.
                    TypeKind::Struct { fields, .. } => self.structure(id, named, fields),
                    _ => self.defined(id, named, *underlying),
                }
            }
            TypeKind::Unsupported(kind) => Err(self.unsupported(*kind)),
        }
    }

    fn well_known(&self, kind: WellKnown) -> String {
        match kind {
            WellKnown::Timestamp => self.int(IntKind::I64),
            WellKnown::Quantity => BYTES_TYPE.to_string(),
        }
    }

    fn int(&self, kind: IntKind) -> String {
        match kind {
            IntKind::I64 | IntKind::U64 | IntKind::Uintptr => self.config.long_int_type.clone(),
            IntKind::I8
            | IntKind::I16
            | IntKind::I32
            | IntKind::Int
            | IntKind::U8
            | IntKind::U16
            | IntKind::U32
            | IntKind::Uint => "number".to_string(),
        }
    }

    fn sequence(&mut self, elem: TypeId) -> Result<String> {
        let graph = self.graph;
        if matches!(graph.kind(graph.underlying(elem)), TypeKind::Int(IntKind::U8)) {
            return Ok(BYTES_TYPE.to_string());
        }
        Ok(format!("{}[]", self.resolve(elem)?))
    }

    fn map(&mut self, key: TypeId, value: TypeId) -> Result<String> {
        let graph = self.graph;
        if matches!(graph.kind(graph.underlying(key)), TypeKind::String) {
            let value = self.resolve(value)?;
            return Ok(format!("{{[key: string]: {value}}}"));
        }
        let key = self.resolve(key)?;
        let value = self.resolve(value)?;
        Ok(format!("Map<{key}, {value}>"))
    }

    fn unsupported(&self, kind: UnsupportedKind) -> Error {
        let location = self
            .trail
            .last()
            .cloned()
            .unwrap_or_else(|| "root".to_string());
        Error::UnsupportedKind { kind, location }
    }

    fn defined(&mut self, id: TypeId, named: &Named, underlying: TypeId) -> Result<String> {
        if !self.expanding.insert(id) {
            return Err(Error::RecursiveDefinition {
                type_name: format!("{}.{}", named.namespace, named.name),
            });
        }
        let resolved = self.resolve(underlying);
        self.expanding.remove(&id);
        resolved
    }

    /// Resolve a struct-like type and register its declaration.
    fn structure(&mut self, id: TypeId, named: &Named, fields: &[Field]) -> Result<String> {
        let type_name = format!("{}.{}", named.namespace, named.name);
        let prefix = self
            .namespaces
            .consult(&named.namespace)
            .ok_or_else(|| Error::UnmappedNamespace {
                namespace: named.namespace.clone(),
                type_name: type_name.clone(),
            })?;
        let reference = naming::reference_name(prefix, &named.name);

        self.pending.insert(
            id,
            Pending {
                reference: reference.clone(),
                referenced: false,
            },
        );
        // A struct breaks any defined-type recursion around it.
        let outer = std::mem::take(&mut self.expanding);
        let layout = self.layout(&type_name, named, fields);
        self.expanding = outer;
        // Dropped on failure too, so a later resolve cannot see a stale name.
        let referenced = self.pending.remove(&id).is_some_and(|p| p.referenced);
        let Layout {
            shape,
            extends,
            members,
        } = layout?;

        // Nothing of its own: the struct is just its embedded type.
        if let (true, Some(base)) = (members.is_empty(), extends.clone()) {
            if referenced {
                return Err(Error::CyclicAlias { type_name });
            }
            tracing::debug!(ty = %type_name, alias = %base, "collapsed to embedded type");
            self.registry.insert(
                id,
                RenderedType {
                    reference: base.clone(),
                    declaration: None,
                },
            );
            return Ok(base);
        }

        let declaration = match shape {
            Shape::Tuple if extends.is_some() => {
                return Err(Error::ShapeConflict {
                    type_name,
                    reason: ShapeConflict::ExtendsInTuple,
                });
            }
            Shape::Tuple => Declaration::Tuple { members },
            Shape::Record if members.is_empty() => Declaration::EmptyMap,
            Shape::Record => Declaration::Interface { extends, members },
        };

        tracing::debug!(ty = %type_name, reference = %reference, "registered declaration");
        self.registry.insert(
            id,
            RenderedType {
                reference: reference.clone(),
                declaration: Some(declaration),
            },
        );
        Ok(reference)
    }

    /// Apply each field's directives and resolve the fields that render.
    fn layout(&mut self, type_name: &str, named: &Named, fields: &[Field]) -> Result<Layout> {
        let mut shape = Shape::Record;
        let mut tuple_requested = false;
        let mut extends: Option<String> = None;
        let mut members: Vec<Member> = Vec::new();

        for field in fields {
            if field.embedded {
                if extends.is_some() {
                    return Err(Error::AmbiguousEmbedding {
                        type_name: type_name.to_string(),
                    });
                }
                extends = Some(self.resolve_field(&named.name, field)?);
                continue;
            }

            let plan = directives::plan(field).map_err(|err| match err {
                DirectiveError::Tag(source) => Error::Tag {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    source,
                },
                DirectiveError::Unsupported { key, directive } => Error::UnsupportedDirective {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                    key,
                    directive,
                },
            })?;

            match plan {
                FieldPlan::Skip | FieldPlan::Marker { to_array: false } => {}
                FieldPlan::Marker { to_array: true } => {
                    let conflict = if tuple_requested {
                        Some(ShapeConflict::TupleRequestedTwice)
                    } else if !members.is_empty() {
                        Some(ShapeConflict::TupleAfterFields)
                    } else {
                        None
                    };
                    if let Some(reason) = conflict {
                        return Err(Error::ShapeConflict {
                            type_name: type_name.to_string(),
                            reason,
                        });
                    }
                    tuple_requested = true;
                    shape = Shape::Tuple;
                }
                FieldPlan::Member { name, optional } => {
                    if optional && shape == Shape::Tuple {
                        return Err(Error::ShapeConflict {
                            type_name: type_name.to_string(),
                            reason: ShapeConflict::OptionalInTuple { field: name },
                        });
                    }
                    let ty = self.resolve_field(&named.name, field)?;
                    members.push(Member { name, optional, ty });
                }
            }
        }

        Ok(Layout {
            shape,
            extends,
            members,
        })
    }

    fn resolve_field(&mut self, owner: &str, field: &Field) -> Result<String> {
        self.trail.push(format!("`{owner}.{}`", field.name));
        let resolved = self.resolve(field.ty);
        self.trail.pop();
        resolved
    }
}
