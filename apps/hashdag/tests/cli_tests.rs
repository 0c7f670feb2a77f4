//! Tests for CLI argument parsing and flag/settings layering.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use clap::{CommandFactory, Parser};
use hashdag::cli::{Cli, Commands, DEFAULT_RENDER_PATH};
use hashdag::files::OutputFormat;
use hashdag::settings::{ConversionSettings, EngineKind, GeneratorSettings};
use hashdag_core::IntegrityPolicy;
use std::path::PathBuf;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_flag_defaults() {
    let cli = Cli::try_parse_from(["hashdag"]).unwrap();
    assert!(!cli.verbose);
    assert!(!cli.quiet);
    assert!(!cli.json_mode);
    assert_eq!(cli.config, PathBuf::from("hashdag.toml"));
    assert!(cli.command.is_none());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["hashdag", "demo", "--json-mode", "-q", "-c", "x.toml"]).unwrap();
    assert!(cli.json_mode);
    assert!(cli.quiet);
    assert_eq!(cli.config, PathBuf::from("x.toml"));
}

#[test]
fn test_demo_default_output_path() {
    let cli = Cli::try_parse_from(["hashdag", "demo"]).unwrap();
    match cli.command {
        Some(Commands::Demo { output_path, .. }) => {
            assert_eq!(output_path, PathBuf::from(DEFAULT_RENDER_PATH));
        }
        other => panic!("expected demo, got {other:?}"),
    }
}

#[test]
fn test_convert_flags() {
    let cli = Cli::try_parse_from([
        "hashdag",
        "convert",
        "--input",
        "in.json",
        "--output",
        "out.hdag",
        "--format",
        "canonical",
        "--engine",
        "naive",
        "--lenient",
        "--parallel",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            format,
            render,
            conversion,
        }) => {
            assert_eq!(input, PathBuf::from("in.json"));
            assert_eq!(output, Some(PathBuf::from("out.hdag")));
            assert_eq!(format, OutputFormat::Canonical);
            assert!(render.is_none());
            assert_eq!(conversion.engine, Some(EngineKind::Naive));
            assert!(conversion.lenient);
            assert!(conversion.parallel);
        }
        other => panic!("expected convert, got {other:?}"),
    }
}

#[test]
fn test_convert_requires_input() {
    assert!(Cli::try_parse_from(["hashdag", "convert"]).is_err());
}

#[test]
fn test_unknown_engine_rejected() {
    assert!(Cli::try_parse_from(["hashdag", "demo", "--engine", "md5"]).is_err());
}

#[test]
fn test_conversion_flags_override_settings() {
    let cli = Cli::try_parse_from(["hashdag", "random", "--width", "64", "--lenient"]).unwrap();
    let Some(Commands::Random { conversion, .. }) = cli.command else {
        panic!("expected random");
    };

    let settings = conversion.apply(ConversionSettings {
        engine: EngineKind::Naive,
        width: 4,
        policy: IntegrityPolicy::Strict,
        parallel: true,
    });

    // Absent flags keep file values
    assert_eq!(settings.engine, EngineKind::Naive);
    assert!(settings.parallel);
    assert_eq!(settings.width, 64);
    assert_eq!(settings.policy, IntegrityPolicy::Lenient);
}

#[test]
fn test_generator_flags_override_settings() {
    let cli = Cli::try_parse_from([
        "hashdag",
        "generate",
        "-o",
        "g.json",
        "--node-qty",
        "7",
        "--seed",
        "42",
    ])
    .unwrap();
    let Some(Commands::Generate { generator, .. }) = cli.command else {
        panic!("expected generate");
    };

    let settings = generator.apply(GeneratorSettings::default());
    assert_eq!(settings.node_qty, 7);
    assert_eq!(settings.seed, Some(42));
    assert_eq!(settings.max_outdegree, GeneratorSettings::default().max_outdegree);
}
