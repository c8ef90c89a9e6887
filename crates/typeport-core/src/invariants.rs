//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{TypeGraph, TypeId, TypeKind};

impl TypeGraph {
    pub(crate) fn ensure_node(&self, id: TypeId) -> &TypeKind {
        self.nodes.get(id.0 as usize).unwrap_or_else(|| {
            panic!(
                "TypeGraph: type id {} not found \
                 (handles must come from the same graph)",
                id.0
            )
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: TypeId) -> &mut TypeKind {
        let len = self.nodes.len();
        self.nodes.get_mut(id.0 as usize).unwrap_or_else(|| {
            panic!(
                "TypeGraph: type id {} not found in graph of {len} types \
                 (handles must come from the same graph)",
                id.0
            )
        })
    }
}
