#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for typeport type graphs.
//!
//! Two layers:
//! - **Schema layer**: 1:1 mapping to the JSON schema document (`schema`)
//! - **Graph layer**: ID-indexed type descriptors for traversal (`TypeGraph`)
//!
//! The graph is the introspection surface the TypeScript emitter consumes:
//! every descriptor exposes its kind, constituent descriptors, and for
//! struct-like types an ordered field list plus a namespace and bare name.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

pub mod colors;
pub mod schema;
pub mod tag;

mod invariants;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod tag_tests;

pub use colors::Colors;
pub use schema::{SchemaError, TypeExprError};
pub use tag::{StructTag, TagError};

// ============================================================================
// Kinds
// ============================================================================

/// Handle to a type descriptor inside a [`TypeGraph`].
///
/// Identity is by handle: two struct declarations with identical fields are
/// still distinct types. Structural types (slices, maps, pointers, ...) are
/// interned, so the same shape always yields the same handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Raw index for debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Integer widths. `Int`/`Uint` are the machine-word types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Int,
    U8,
    U16,
    U32,
    U64,
    Uint,
    Uintptr,
}

impl IntKind {
    pub fn name(self) -> &'static str {
        match self {
            IntKind::I8 => "int8",
            IntKind::I16 => "int16",
            IntKind::I32 => "int32",
            IntKind::I64 => "int64",
            IntKind::Int => "int",
            IntKind::U8 => "uint8",
            IntKind::U16 => "uint16",
            IntKind::U32 => "uint32",
            IntKind::U64 => "uint64",
            IntKind::Uint => "uint",
            IntKind::Uintptr => "uintptr",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    pub fn name(self) -> &'static str {
        match self {
            FloatKind::F32 => "float32",
            FloatKind::F64 => "float64",
        }
    }
}

/// External value types whose wire representation differs from their
/// in-memory shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// Wall-clock timestamp, serialized as an integer count.
    Timestamp,
    /// Arbitrary-precision quantity, serialized as raw big-endian bytes.
    Quantity,
}

impl WellKnown {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(WellKnown::Timestamp),
            "quantity" => Some(WellKnown::Quantity),
            _ => None,
        }
    }
}

/// Kinds that exist in the source type system but have no wire form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    Complex64,
    Complex128,
    Func,
    Chan,
    Interface,
    UnsafePointer,
}

impl UnsupportedKind {
    pub fn name(self) -> &'static str {
        match self {
            UnsupportedKind::Complex64 => "complex64",
            UnsupportedKind::Complex128 => "complex128",
            UnsupportedKind::Func => "func",
            UnsupportedKind::Chan => "chan",
            UnsupportedKind::Interface => "interface",
            UnsupportedKind::UnsafePointer => "unsafe.Pointer",
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A struct field as seen by the emitter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    /// Declared name. For embedded fields this is the embedded type's name.
    pub name: String,
    pub ty: TypeId,
    pub embedded: bool,
    /// Raw struct tag, e.g. `json:"height,omitempty"`.
    pub tag: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
            tag: String::new(),
        }
    }

    pub fn embedded(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty)
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Namespace-qualified name of a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Named {
    pub namespace: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    Int(IntKind),
    Float(FloatKind),
    String,
    Array { len: u64, elem: TypeId },
    Slice { elem: TypeId },
    Map { key: TypeId, value: TypeId },
    Pointer { pointee: TypeId },
    Struct { named: Named, fields: Vec<Field> },
    /// Named non-struct type whose kind is that of `underlying`.
    Defined { named: Named, underlying: TypeId },
    WellKnown { named: Named, kind: WellKnown },
    Unsupported(UnsupportedKind),
}

impl TypeKind {
    /// Structural kinds are interned; declared kinds get a fresh handle.
    fn is_structural(&self) -> bool {
        !matches!(
            self,
            TypeKind::Struct { .. } | TypeKind::Defined { .. } | TypeKind::WellKnown { .. }
        )
    }
}

// ============================================================================
// Type Graph
// ============================================================================

/// Arena of type descriptors plus an index of declared type ids.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeKind>,
    /// Structural kind -> handle, for interning.
    interned: HashMap<TypeKind, TypeId>,
    /// Schema id -> handle for declared types, in declaration order.
    declared: IndexMap<String, TypeId>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the kind of a type.
    pub fn kind(&self, id: TypeId) -> &TypeKind {
        self.ensure_node(id)
    }

    /// Follow `Defined` chains down to the first non-defined kind.
    pub fn underlying(&self, mut id: TypeId) -> TypeId {
        // Bounded so a malformed programmatic graph cannot spin forever.
        for _ in 0..=self.nodes.len() {
            match self.kind(id) {
                TypeKind::Defined { underlying, .. } => id = *underlying,
                _ => return id,
            }
        }
        id
    }

    /// Look up a declared type by its schema id.
    pub fn lookup(&self, type_id: &str) -> Option<TypeId> {
        self.declared.get(type_id).copied()
    }

    /// Declared type ids in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.declared.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Intern a structural kind, returning the shared handle.
    pub fn intern(&mut self, kind: TypeKind) -> TypeId {
        debug_assert!(kind.is_structural(), "declared kinds must use declare_*");
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = self.push(kind.clone());
        self.interned.insert(kind, id);
        id
    }

    pub fn bool(&mut self) -> TypeId {
        self.intern(TypeKind::Bool)
    }

    pub fn int(&mut self, kind: IntKind) -> TypeId {
        self.intern(TypeKind::Int(kind))
    }

    pub fn float(&mut self, kind: FloatKind) -> TypeId {
        self.intern(TypeKind::Float(kind))
    }

    pub fn string(&mut self) -> TypeId {
        self.intern(TypeKind::String)
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Slice { elem })
    }

    pub fn array(&mut self, len: u64, elem: TypeId) -> TypeId {
        self.intern(TypeKind::Array { len, elem })
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeKind::Map { key, value })
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(TypeKind::Pointer { pointee })
    }

    pub fn unsupported(&mut self, kind: UnsupportedKind) -> TypeId {
        self.intern(TypeKind::Unsupported(kind))
    }

    /// Declare a struct without fields. Fields are attached later with
    /// [`set_fields`](Self::set_fields), which allows self-referential shapes.
    pub fn declare_struct(
        &mut self,
        type_id: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> TypeId {
        let named = Named {
            namespace: namespace.into(),
            name: name.into(),
        };
        let id = self.push(TypeKind::Struct {
            named,
            fields: Vec::new(),
        });
        self.declared.insert(type_id.into(), id);
        id
    }

    /// Declare a named non-struct type over `underlying`.
    pub fn declare_defined(
        &mut self,
        type_id: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        underlying: TypeId,
    ) -> TypeId {
        let named = Named {
            namespace: namespace.into(),
            name: name.into(),
        };
        let id = self.push(TypeKind::Defined { named, underlying });
        self.declared.insert(type_id.into(), id);
        id
    }

    pub fn declare_well_known(
        &mut self,
        type_id: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        kind: WellKnown,
    ) -> TypeId {
        let named = Named {
            namespace: namespace.into(),
            name: name.into(),
        };
        let id = self.push(TypeKind::WellKnown { named, kind });
        self.declared.insert(type_id.into(), id);
        id
    }

    /// Replace the fields of a declared struct.
    pub fn set_fields(&mut self, id: TypeId, new_fields: Vec<Field>) {
        match self.ensure_node_mut(id) {
            TypeKind::Struct { fields, .. } => *fields = new_fields,
            other => panic!("TypeGraph: set_fields on non-struct {other:?}"),
        }
    }

    /// Declare a defined type whose underlying type is not known yet. It
    /// points at itself until [`set_underlying`](Self::set_underlying) runs.
    pub(crate) fn declare_defined_pending(
        &mut self,
        type_id: &str,
        namespace: &str,
        name: &str,
    ) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.declare_defined(type_id, namespace, name, id)
    }

    /// Retarget a declared defined type's underlying type, which allows
    /// defined types that mention themselves.
    pub fn set_underlying(&mut self, id: TypeId, target: TypeId) {
        if let TypeKind::Defined { underlying, .. } = self.ensure_node_mut(id) {
            *underlying = target;
        }
    }

    /// Render a type the way it would be written in a type expression.
    pub fn display(&self, id: TypeId) -> String {
        match self.kind(id) {
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Int(k) => k.name().to_string(),
            TypeKind::Float(k) => k.name().to_string(),
            TypeKind::String => "string".to_string(),
            TypeKind::Array { len, elem } => format!("[{len}]{}", self.display(*elem)),
            TypeKind::Slice { elem } => format!("[]{}", self.display(*elem)),
            TypeKind::Map { key, value } => {
                format!("map[{}]{}", self.display(*key), self.display(*value))
            }
            TypeKind::Pointer { pointee } => format!("*{}", self.display(*pointee)),
            TypeKind::Struct { named, .. }
            | TypeKind::Defined { named, .. }
            | TypeKind::WellKnown { named, .. } => format!("{}.{}", named.namespace, named.name),
            TypeKind::Unsupported(k) => k.name().to_string(),
        }
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(kind);
        id
    }
}
