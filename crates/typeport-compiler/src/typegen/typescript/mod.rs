//! TypeScript declaration emitter.
//!
//! Resolves types depth-first from the requested roots. Every struct reached
//! becomes one declaration; dependencies are registered before dependents,
//! so the concatenated output reads top-down.

mod config;
mod directives;
mod emitter;
mod naming;
mod registry;
mod render;


pub use config::Config;
pub use emitter::Emitter;
pub use naming::{NamespaceMap, reference_name};
pub use registry::{Declaration, Member, Registry, RenderedType};

use typeport_core::TypeGraph;

use crate::Result;

/// TypeScript name for byte sequences.
pub const BYTES_TYPE: &str = "Uint8Array";

/// Resolve `roots` (declared type ids) and return the rendered declarations.
///
/// Fails with [`StaleConfiguration`](crate::Error::StaleConfiguration) if any
/// entry of `namespaces` was never consulted.
pub fn emit<S: AsRef<str>>(
    graph: &TypeGraph,
    roots: &[S],
    namespaces: NamespaceMap,
    config: Config,
) -> Result<String> {
    let mut emitter = Emitter::new(graph, namespaces, config);
    for root in roots {
        emitter.resolve_root(root.as_ref())?;
    }
    let output = emitter.render();
    emitter.namespaces().ensure_all_consulted()?;
    Ok(output)
}
