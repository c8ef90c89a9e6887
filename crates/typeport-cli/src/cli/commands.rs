//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("typeport")
        .about("TypeScript declarations from type graph schemas")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(emit_command())
        .subcommand(check_command())
}

/// Emit TypeScript declarations.
pub fn emit_command() -> Command {
    Command::new("emit")
        .about("Emit TypeScript declarations for root types")
        .override_usage(
            "\
  typeport emit <SCHEMA> [--root <ID>]... [-p NS=PREFIX]...
  typeport emit - --prefixes prefixes.json -o types.ts",
        )
        .after_help(
            r#"EXAMPLES:
  typeport emit schema.json                          # roots listed in the schema
  typeport emit schema.json -r genesis.Document      # explicit root
  typeport emit schema.json -p example.org/meta=Meta # extra prefix
  typeport emit schema.json --long-int bigint -o types.ts"#,
        )
        .arg(schema_path_arg())
        .arg(root_arg())
        .arg(prefixes_file_arg())
        .arg(prefix_arg())
        .arg(output_arg())
        .arg(no_export_arg())
        .arg(long_int_arg())
        .arg(indent_arg())
        .arg(allow_unused_prefixes_arg())
        .arg(color_arg())
}

/// Resolve roots without printing.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Resolve root types and report problems without emitting")
        .after_help(
            r#"EXAMPLES:
  typeport check schema.json
  typeport check schema.json -r genesis.Document --prefixes prefixes.json"#,
        )
        .arg(schema_path_arg())
        .arg(root_arg())
        .arg(prefixes_file_arg())
        .arg(prefix_arg())
        .arg(allow_unused_prefixes_arg())
}
