pub mod check;
pub mod emit;
pub mod schema_loader;

#[cfg(test)]
mod schema_loader_tests;

use std::io;
use std::path::PathBuf;

use typeport_core::SchemaError;

/// Anything that stops a command. Printed as `error: ...` before exiting.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("{}: invalid prefix map: {source}", .path.display())]
    Prefixes {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no root types: pass --root or list `roots` in the schema")]
    NoRoots,

    #[error(transparent)]
    Emit(#[from] typeport_compiler::Error),
}

/// Report a failed command and exit with status 1.
pub fn fail(err: CommandError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}
