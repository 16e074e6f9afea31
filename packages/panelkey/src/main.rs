//! Main entry point for the panelkey CLI application

use clap::Parser;
use panelkey::cli::{run_command, Cli};
use panelkey_common::LoggingTransformer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    LoggingTransformer::init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    run_command(cli, &mut stdout).await
}
