use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use typeport_compiler::typegen::typescript::{Config, Emitter};

use super::schema_loader::{Loaded, SchemaSource};
use super::{CommandError, fail};

pub struct EmitArgs {
    pub source: SchemaSource,
    pub output: Option<PathBuf>,
    pub export: bool,
    pub long_int: Option<String>,
    pub indent: Option<usize>,
    pub allow_unused_prefixes: bool,
    pub color: bool,
}

impl EmitArgs {
    fn config(&self) -> Config {
        let mut config = Config::new().export(self.export).colored(self.color);
        if let Some(name) = &self.long_int {
            config = config.long_int_type(name.as_str());
        }
        if let Some(width) = self.indent {
            config = config.indent(width);
        }
        config
    }
}

pub fn run(args: EmitArgs) {
    if let Err(err) = execute(&args) {
        fail(err);
    }
}

/// Resolve every root, write the declarations, then check for unused
/// prefixes. The output is written even when that last check fails.
pub fn execute(args: &EmitArgs) -> Result<(), CommandError> {
    let Loaded {
        schema,
        namespaces,
        roots,
    } = args.source.load()?;

    let mut emitter = Emitter::new(&schema.graph, namespaces, args.config());
    for root in &roots {
        emitter.resolve_root(root)?;
    }
    tracing::debug!(
        declarations = emitter.registry().declarations().count(),
        "emitting"
    );

    write_output(args.output.as_deref(), &emitter.render())?;

    if !args.allow_unused_prefixes {
        emitter.namespaces().ensure_all_consulted()?;
    }
    Ok(())
}

fn write_output(path: Option<&Path>, text: &str) -> Result<(), CommandError> {
    match path {
        Some(path) => fs::write(path, text).map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| CommandError::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}
