use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use typeport_compiler::typegen::typescript::NamespaceMap;
use typeport_core::schema::Schema;

use super::CommandError;

/// Where a command gets its schema, roots, and prefixes from.
#[derive(Clone, Debug, Default)]
pub struct SchemaSource {
    pub schema_path: PathBuf,
    /// Explicit roots. Empty means the schema's own list.
    pub roots: Vec<String>,
    pub prefixes_file: Option<PathBuf>,
    /// `-p NS=PREFIX` pairs, applied last.
    pub prefixes: Vec<(String, String)>,
}

/// A schema ready for emission.
#[derive(Debug)]
pub struct Loaded {
    pub schema: Schema,
    pub namespaces: NamespaceMap,
    pub roots: Vec<String>,
}

impl SchemaSource {
    pub fn load(&self) -> Result<Loaded, CommandError> {
        let text = read_input(&self.schema_path)?;
        let schema = Schema::from_json(&text).map_err(|source| CommandError::Schema {
            path: self.schema_path.clone(),
            source,
        })?;

        let file_prefixes = match &self.prefixes_file {
            Some(path) => load_prefixes(path)?,
            None => IndexMap::new(),
        };
        let namespaces = build_namespaces(&schema.prefixes, file_prefixes, &self.prefixes);
        let roots = select_roots(&schema.roots, &self.roots)?;

        tracing::debug!(
            roots = roots.len(),
            prefixes = namespaces.len(),
            "schema source ready"
        );
        Ok(Loaded {
            schema,
            namespaces,
            roots,
        })
    }
}

/// Read a file, or stdin for "-".
pub fn read_input(path: &Path) -> Result<String, CommandError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CommandError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_prefixes(path: &Path) -> Result<IndexMap<String, String>, CommandError> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|source| CommandError::Prefixes {
        path: path.to_path_buf(),
        source,
    })
}

/// Schema prefixes, then file prefixes, then command-line pairs. Later
/// entries replace earlier ones for the same namespace.
pub fn build_namespaces(
    schema: &IndexMap<String, String>,
    file: IndexMap<String, String>,
    pairs: &[(String, String)],
) -> NamespaceMap {
    let mut namespaces = NamespaceMap::from(schema.clone());
    namespaces.extend(file);
    namespaces.extend(pairs.iter().cloned());
    namespaces
}

pub fn select_roots(schema: &[String], requested: &[String]) -> Result<Vec<String>, CommandError> {
    let roots = if requested.is_empty() {
        schema
    } else {
        requested
    };
    if roots.is_empty() {
        return Err(CommandError::NoRoots);
    }
    Ok(roots.to_vec())
}
