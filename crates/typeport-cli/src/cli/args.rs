//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands,
//! so `emit` and `check` accept the same schema and prefix flags.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema document (positional, "-" for stdin).
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Schema document (use \"-\" for stdin)")
}

/// Root type ids (--root, repeatable).
pub fn root_arg() -> Arg {
    Arg::new("root")
        .short('r')
        .long("root")
        .value_name("ID")
        .action(ArgAction::Append)
        .help("Root type id to emit (default: the schema's roots)")
}

/// Prefix map file (--prefixes).
pub fn prefixes_file_arg() -> Arg {
    Arg::new("prefixes_file")
        .long("prefixes")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON object mapping namespaces to prefixes")
}

/// Inline prefix entry (-p NS=PREFIX, repeatable).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .short('p')
        .long("prefix")
        .value_name("NS=PREFIX")
        .value_parser(parse_prefix)
        .action(ArgAction::Append)
        .help("Namespace prefix, overrides the schema and --prefixes")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write declarations to FILE instead of stdout")
}

/// Omit the export keyword (--no-export).
pub fn no_export_arg() -> Arg {
    Arg::new("no_export")
        .long("no-export")
        .action(ArgAction::SetTrue)
        .help("Do not prefix declarations with `export`")
}

/// 64-bit integer type name (--long-int).
pub fn long_int_arg() -> Arg {
    Arg::new("long_int")
        .long("long-int")
        .value_name("NAME")
        .help("TypeScript type for 64-bit integers (default: longnum)")
}

/// Member indentation (--indent).
pub fn indent_arg() -> Arg {
    Arg::new("indent")
        .long("indent")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Spaces of member indentation (default: 4)")
}

/// Skip the unused prefix check (--allow-unused-prefixes).
pub fn allow_unused_prefixes_arg() -> Arg {
    Arg::new("allow_unused_prefixes")
        .long("allow-unused-prefixes")
        .action(ArgAction::SetTrue)
        .help("Do not fail when a configured prefix was never needed")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity (-v, -vv). Global so it works before or after the subcommand.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug, -vv for trace)")
}

fn parse_prefix(value: &str) -> Result<(String, String), String> {
    let (namespace, prefix) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NS=PREFIX, got `{value}`"))?;
    if namespace.is_empty() {
        return Err("namespace must not be empty".to_string());
    }
    Ok((namespace.to_string(), prefix.to_string()))
}
