//! CLI command definitions

use crate::PanelKey;
use anyhow::Context;
use clap::{Parser, Subcommand};
use panelkey_common::PanelKeyConfig;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "panelkey")]
#[command(version, about = "ML-DSA-65 and X25519 node key generation")]
pub struct Cli {
    /// Path to the configuration file
    ///
    /// Default: $PANELKEY_CONFIG, then $XDG_CONFIG_HOME/panelkey/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Generate an ML-DSA-65 key pair
    ///
    /// With --seed the key pair is derived from that 32-byte URL-safe Base64
    /// seed and is reproducible; without it a fresh seed is generated.
    ///
    /// Example usage:
    ///   panelkey mldsa65
    ///   panelkey mldsa65 --seed AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA --json
    Mldsa65 {
        /// Seed to derive from (URL-safe Base64, 32 bytes)
        #[arg(long)]
        seed: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// X25519 key operations
    X25519 {
        /// X25519 operation
        #[command(subcommand)]
        command: X25519Command,
    },
}

/// X25519 subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum X25519Command {
    /// Print the public key for a URL-safe Base64 private key
    Public {
        /// Private key (URL-safe Base64, 32 bytes, padding optional)
        private_key: String,
    },

    /// Generate a fresh key pair
    Generate {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Execute a parsed command, writing results to `out`
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, key generation
/// fails, or `out` cannot be written.
pub async fn run_command<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let config =
        PanelKeyConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!("Using configuration {config:?}");

    match cli.command {
        Commands::Mldsa65 { seed, json } => {
            let mut builder = PanelKey::mldsa65_with_config(&config);
            if let Some(seed) = seed {
                builder = builder.with_seed(seed);
            }
            let keys = builder
                .generate()
                .await
                .context("ML-DSA-65 key generation failed")?;

            if json {
                write_json(out, &keys)?;
            } else {
                writeln!(out, "seed: {}", keys.seed)?;
                writeln!(out, "verify: {}", keys.verify)?;
            }
        }
        Commands::X25519 { command } => match command {
            X25519Command::Public { private_key } => {
                let public_key = PanelKey::x25519()
                    .with_private_key(private_key)
                    .public_key()
                    .context("X25519 public key derivation failed")?;
                writeln!(out, "{public_key}")?;
            }
            X25519Command::Generate { json } => {
                let keys = PanelKey::x25519()
                    .keypair()
                    .context("X25519 key generation failed")?;

                if json {
                    write_json(out, &keys)?;
                } else {
                    writeln!(out, "private_key: {}", keys.private_key)?;
                    writeln!(out, "public_key: {}", keys.public_key)?;
                }
            }
        },
    }

    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
