use typeport_compiler::typegen::typescript::{Config, Emitter};

use super::schema_loader::{Loaded, SchemaSource};
use super::{CommandError, fail};

pub struct CheckArgs {
    pub source: SchemaSource,
    pub allow_unused_prefixes: bool,
}

/// Outcome of a successful check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckReport {
    pub roots: usize,
    pub declarations: usize,
}

pub fn run(args: CheckArgs) {
    match execute(&args) {
        Ok(report) => println!(
            "ok: {} declarations from {} roots",
            report.declarations, report.roots
        ),
        Err(err) => fail(err),
    }
}

pub fn execute(args: &CheckArgs) -> Result<CheckReport, CommandError> {
    let Loaded {
        schema,
        namespaces,
        roots,
    } = args.source.load()?;

    let mut emitter = Emitter::new(&schema.graph, namespaces, Config::default());
    for root in &roots {
        emitter.resolve_root(root)?;
    }
    if !args.allow_unused_prefixes {
        emitter.namespaces().ensure_all_consulted()?;
    }

    Ok(CheckReport {
        roots: roots.len(),
        declarations: emitter.registry().declarations().count(),
    })
}
