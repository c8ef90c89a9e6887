//! Memo of resolved struct types.

use indexmap::IndexMap;
use typeport_core::TypeId;

/// Result of resolving one struct-like type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedType {
    /// How other declarations refer to this type.
    pub reference: String,
    /// `None` when the type collapsed into the type it embeds.
    pub declaration: Option<Declaration>,
}

/// Body of an emitted declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// `interface Ref extends Base { ... }`
    Interface {
        extends: Option<String>,
        members: Vec<Member>,
    },
    /// `type Ref = [ ... ];`
    Tuple { members: Vec<Member> },
    /// `type Ref = Map<never, never>;` for a record with nothing on the wire.
    EmptyMap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub optional: bool,
    /// Rendered TypeScript type expression.
    pub ty: String,
}

/// Resolved types in completion order.
///
/// A type completes only after everything it references, so iterating the
/// registry yields dependencies before dependents.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<TypeId, RenderedType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TypeId) -> Option<&RenderedType> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of memoized types, including aliases without a declaration.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &RenderedType)> {
        self.entries.iter().map(|(id, rendered)| (*id, rendered))
    }

    /// Types that produce a declaration, in emission order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.entries.values().filter_map(|rendered| {
            rendered
                .declaration
                .as_ref()
                .map(|decl| (rendered.reference.as_str(), decl))
        })
    }

    pub(super) fn insert(&mut self, id: TypeId, rendered: RenderedType) {
        debug_assert!(!self.entries.contains_key(&id), "type registered twice");
        self.entries.insert(id, rendered);
    }
}
