//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `Into<*Args>` impls resolve color and config defaults

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::emit::EmitArgs;
use crate::commands::schema_loader::SchemaSource;

pub struct EmitParams {
    pub schema_path: PathBuf,
    pub roots: Vec<String>,
    pub prefixes_file: Option<PathBuf>,
    pub prefixes: Vec<(String, String)>,
    pub output: Option<PathBuf>,
    pub no_export: bool,
    pub long_int: Option<String>,
    pub indent: Option<usize>,
    pub allow_unused_prefixes: bool,
    pub color: ColorChoice,
}

impl EmitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            roots: roots(m),
            prefixes_file: m.get_one::<PathBuf>("prefixes_file").cloned(),
            prefixes: prefixes(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            no_export: m.get_flag("no_export"),
            long_int: m.get_one::<String>("long_int").cloned(),
            indent: m.get_one::<usize>("indent").copied(),
            allow_unused_prefixes: m.get_flag("allow_unused_prefixes"),
            color: parse_color(m),
        }
    }
}

impl From<EmitParams> for EmitArgs {
    fn from(p: EmitParams) -> Self {
        // Never write escape codes into a file.
        let color = p.output.is_none() && p.color.should_colorize();
        Self {
            source: SchemaSource {
                schema_path: p.schema_path,
                roots: p.roots,
                prefixes_file: p.prefixes_file,
                prefixes: p.prefixes,
            },
            output: p.output,
            export: !p.no_export,
            long_int: p.long_int,
            indent: p.indent,
            allow_unused_prefixes: p.allow_unused_prefixes,
            color,
        }
    }
}

pub struct CheckParams {
    pub schema_path: PathBuf,
    pub roots: Vec<String>,
    pub prefixes_file: Option<PathBuf>,
    pub prefixes: Vec<(String, String)>,
    pub allow_unused_prefixes: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: schema_path(m),
            roots: roots(m),
            prefixes_file: m.get_one::<PathBuf>("prefixes_file").cloned(),
            prefixes: prefixes(m),
            allow_unused_prefixes: m.get_flag("allow_unused_prefixes"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source: SchemaSource {
                schema_path: p.schema_path,
                roots: p.roots,
                prefixes_file: p.prefixes_file,
                prefixes: p.prefixes,
            },
            allow_unused_prefixes: p.allow_unused_prefixes,
        }
    }
}

fn schema_path(m: &ArgMatches) -> PathBuf {
    // Required by clap; "-" only as a fallback for programmatic matches.
    m.get_one::<PathBuf>("schema_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn roots(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("root")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn prefixes(m: &ArgMatches) -> Vec<(String, String)> {
    m.get_many::<(String, String)>("prefix")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
