//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Args conversion: color and export defaults are resolved
//! 3. Flag validation: malformed prefix pairs are rejected by clap

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, emit_command};
use crate::commands::check::CheckArgs;
use crate::commands::emit::EmitArgs;

#[test]
fn emit_extracts_all_flags() {
    let m = emit_command()
        .try_get_matches_from([
            "emit",
            "schema.json",
            "-r",
            "genesis.Document",
            "--root",
            "meta.Meta",
            "--prefixes",
            "prefixes.json",
            "-p",
            "example.org/meta=Meta",
            "-p",
            "time=",
            "-o",
            "types.ts",
            "--no-export",
            "--long-int",
            "bigint",
            "--indent",
            "2",
            "--allow-unused-prefixes",
            "--color",
            "always",
        ])
        .unwrap();
    let params = EmitParams::from_matches(&m);

    assert_eq!(params.schema_path, PathBuf::from("schema.json"));
    assert_eq!(params.roots, ["genesis.Document", "meta.Meta"]);
    assert_eq!(params.prefixes_file, Some(PathBuf::from("prefixes.json")));
    assert_eq!(
        params.prefixes,
        [
            ("example.org/meta".to_string(), "Meta".to_string()),
            ("time".to_string(), String::new()),
        ]
    );
    assert_eq!(params.output, Some(PathBuf::from("types.ts")));
    assert!(params.no_export);
    assert_eq!(params.long_int.as_deref(), Some("bigint"));
    assert_eq!(params.indent, Some(2));
    assert!(params.allow_unused_prefixes);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn emit_defaults() {
    let m = emit_command()
        .try_get_matches_from(["emit", "-"])
        .unwrap();
    let params = EmitParams::from_matches(&m);

    assert_eq!(params.schema_path, PathBuf::from("-"));
    assert!(params.roots.is_empty());
    assert!(params.prefixes.is_empty());
    assert_eq!(params.color, ColorChoice::Auto);

    let args: EmitArgs = params.into();
    assert!(args.export);
    assert!(!args.allow_unused_prefixes);
    assert_eq!(args.source.schema_path, PathBuf::from("-"));
}

#[test]
fn output_file_disables_color() {
    let m = emit_command()
        .try_get_matches_from(["emit", "s.json", "-o", "out.ts", "--color", "always"])
        .unwrap();
    let args: EmitArgs = EmitParams::from_matches(&m).into();
    assert!(!args.color);

    let m = emit_command()
        .try_get_matches_from(["emit", "s.json", "--color", "always"])
        .unwrap();
    let args: EmitArgs = EmitParams::from_matches(&m).into();
    assert!(args.color);
}

#[test]
fn emit_requires_schema() {
    let result = emit_command().try_get_matches_from(["emit"]);
    assert!(result.is_err());
}

#[test]
fn malformed_prefix_pair_is_rejected() {
    let err = emit_command()
        .try_get_matches_from(["emit", "s.json", "-p", "no-equals"])
        .unwrap_err();
    assert!(err.to_string().contains("expected NS=PREFIX"));

    let err = emit_command()
        .try_get_matches_from(["emit", "s.json", "-p", "=Prefix"])
        .unwrap_err();
    assert!(err.to_string().contains("namespace must not be empty"));
}

#[test]
fn check_extracts_flags() {
    let m = check_command()
        .try_get_matches_from(["check", "schema.json", "-r", "a.A", "-p", "a=A"])
        .unwrap();
    let args: CheckArgs = CheckParams::from_matches(&m).into();

    assert_eq!(args.source.schema_path, PathBuf::from("schema.json"));
    assert_eq!(args.source.roots, ["a.A"]);
    assert_eq!(args.source.prefixes, [("a".to_string(), "A".to_string())]);
    assert!(!args.allow_unused_prefixes);
}

#[test]
fn check_has_no_output_flags() {
    let help = check_command().render_help().to_string();
    assert!(!help.contains("--output"), "check help should not show --output");
    assert!(!help.contains("--color"), "check help should not show --color");
}

#[test]
fn verbose_is_global() {
    let m = build_cli()
        .try_get_matches_from(["typeport", "emit", "s.json", "-vv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 2);

    let m = build_cli()
        .try_get_matches_from(["typeport", "-v", "check", "s.json"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 1);
}
