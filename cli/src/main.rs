use std::io;

use anyhow::Result;
use clap::Parser;
use spycats_cli::{app, config, shell, Cli, Command, UreqTransport};
use spycats_core::{Roster, SpyCatClient};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")))
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref(), cli.api_url.as_deref())?;
    tracing::debug!(api_url = %settings.api_url, "settings loaded");

    let mut roster = Roster::new(SpyCatClient::new(&settings.api_url));
    let transport = UreqTransport::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match cli.command {
        Command::Shell => shell::run(&mut roster, &transport, stdin.lock(), stdout.lock()),
        command => app::execute(command, &mut roster, &transport, &mut stdin.lock(), &mut stdout),
    }
}
