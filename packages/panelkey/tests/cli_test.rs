//! Command-line behaviour of the panelkey binary's command runner

use clap::Parser;
use panelkey::cli::{run_command, Cli, Commands, X25519Command};
use panelkey::{Mldsa65Keys, PanelKey, X25519Keys};
use std::io::Write;
use tempfile::NamedTempFile;

const ZERO_SEED: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

async fn run(args: &[&str]) -> anyhow::Result<String> {
    let config = config_file("[mldsa65]\nallow_unseeded_fallback = false\n");
    let config_path = config.path().to_string_lossy().into_owned();

    let mut argv = vec!["panelkey", "--config", config_path.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;

    let mut out = Vec::new();
    run_command(cli, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_argument_parsing() {
    let cli = Cli::try_parse_from(["panelkey", "mldsa65", "--seed", ZERO_SEED, "--json"])
        .expect("valid arguments");
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Mldsa65 { seed, json } => {
            assert_eq!(seed.as_deref(), Some(ZERO_SEED));
            assert!(json);
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["panelkey", "x25519", "public", "abc", "--config", "c.toml"])
        .expect("global --config after subcommand");
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("c.toml")));
    assert!(matches!(
        cli.command,
        Commands::X25519 {
            command: X25519Command::Public { .. }
        }
    ));

    assert!(Cli::try_parse_from(["panelkey"]).is_err());
}

#[tokio::test]
async fn test_mldsa65_with_seed_is_reproducible() {
    let first = run(&["mldsa65", "--seed", ZERO_SEED, "--json"])
        .await
        .expect("first run");
    let second = run(&["mldsa65", "--seed", ZERO_SEED, "--json"])
        .await
        .expect("second run");
    assert_eq!(first, second);

    let keys: Mldsa65Keys = serde_json::from_str(&first).expect("json output");
    assert_eq!(keys.seed, ZERO_SEED);
    assert!(!keys.verify.contains('='));
}

#[tokio::test]
async fn test_mldsa65_plain_output() {
    let output = run(&["mldsa65"]).await.expect("run");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("seed: "));
    assert!(lines[1].starts_with("verify: "));
}

#[tokio::test]
async fn test_mldsa65_rejects_short_seed() {
    let err = run(&["mldsa65", "--seed", "AAAA"])
        .await
        .expect_err("3-byte seed");
    assert!(format!("{err:#}").contains("Invalid seed length"));
}

#[tokio::test]
async fn test_x25519_public_matches_facade() {
    let pair = PanelKey::x25519().keypair().expect("keypair");

    let output = run(&["x25519", "public", pair.private_key.as_str()])
        .await
        .expect("run");
    assert_eq!(output.trim_end(), pair.public_key);
}

#[tokio::test]
async fn test_x25519_invalid_private_key() {
    let err = run(&["x25519", "public", "c2hvcnQ"])
        .await
        .expect_err("short key");
    assert!(format!("{err:#}").contains("invalid private key"));
}

#[tokio::test]
async fn test_x25519_generate_json() {
    let output = run(&["x25519", "generate", "--json"]).await.expect("run");
    let keys: X25519Keys = serde_json::from_str(&output).expect("json output");

    let public_key = PanelKey::x25519()
        .with_private_key(keys.private_key)
        .public_key()
        .expect("derive");
    assert_eq!(public_key, keys.public_key);
}

#[tokio::test]
async fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    let cli = Cli::try_parse_from([
        "panelkey",
        "--config",
        missing.to_str().expect("utf-8 path"),
        "x25519",
        "generate",
    ])
    .expect("parse");

    let mut out = Vec::new();
    let err = run_command(cli, &mut out)
        .await
        .expect_err("explicit config must exist");
    assert!(format!("{err:#}").contains("failed to load configuration"));
    assert!(out.is_empty());
}
