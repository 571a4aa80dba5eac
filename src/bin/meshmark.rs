// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Command-line front end for marking and verifying GLB models.
//!
//! Exit codes: 0 marked / intact, 2 tamper detected, 1 any error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meshmark_core::{mark_file, marked_path, verify_file, KeySpec, Verification};

#[derive(Parser)]
#[command(name = "meshmark", version)]
#[command(about = "Fragile keyed watermarking of GLB meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a watermark into a GLB file
    Mark {
        /// Model to mark
        input: PathBuf,

        /// Watermark key: BB<seed>*<attribute>*<digestKey>
        #[arg(short, long, env = "MESHMARK_KEY", hide_env_values = true)]
        key: String,

        /// Output path [default: <input>_marked.<ext>]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a marked GLB file for modifications
    Verify {
        /// Model to verify
        input: PathBuf,

        /// Watermark key used when marking
        #[arg(short, long, env = "MESHMARK_KEY", hide_env_values = true)]
        key: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn parse_key(key: &str) -> Result<KeySpec> {
    KeySpec::parse(key).context("invalid watermark key")
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Mark { input, key, output } => {
            let key = parse_key(&key)?;
            let output = output.unwrap_or_else(|| marked_path(&input));
            let summary = mark_file(&input, &output, &key)
                .with_context(|| format!("marking {}", input.display()))?;
            println!(
                "marked mesh {} (accessor {}, {} vertices) -> {}",
                summary.mesh_index,
                summary.accessor_index,
                summary.vertex_count,
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { input, key } => {
            let key = parse_key(&key)?;
            match verify_file(&input, &key).with_context(|| format!("verifying {}", input.display()))? {
                Verification::Intact => {
                    println!("{}: watermark intact", input.display());
                    Ok(ExitCode::SUCCESS)
                }
                Verification::Tampered => {
                    println!("{}: watermark MISMATCH, model was modified", input.display());
                    Ok(ExitCode::from(2))
                }
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
