use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io;

mod cli;
mod commands;
mod config;
mod delivery;
mod discovery;
mod event;
mod summarizer;

#[cfg(test)]
mod testutil;

use cli::{Cli, Commands};
use config::{Config, Environment, LogLevel};

/// Diagnostics go to stderr unless a log file is configured. A log file
/// that cannot be opened falls back to stderr instead of failing the hook.
fn setup_logging(log_level: LogLevel, log_file: Option<&std::path::Path>) {
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    let mut open_error = None;
    if let Some(path) = log_file {
        let path = Config::expand_path(path);
        let opened = path
            .parent()
            .map(fs::create_dir_all)
            .transpose()
            .and_then(|_| fs::OpenOptions::new().create(true).append(true).open(&path));
        match opened {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => open_error = Some(format!("{}: {}", path.display(), e)),
        }
    }

    builder.init();

    if let Some(err) = open_error {
        log::warn!("Failed to open log file {}, logging to stderr", err);
    }
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
}

fn run(cli: Cli, config: Config, env: Environment) -> Result<()> {
    match cli.command {
        None => commands::send::run(cli.send, &config, &env, io::stdin().lock()),
        Some(Commands::Discover { url, path }) => commands::discover::run(url.as_deref(), &path, &config, &env),
        Some(Commands::Config { action }) => commands::config::run(action, &config),
        Some(Commands::Completions { shell }) => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let log_level = if cli.verbose { LogLevel::Debug } else { config.log_level };
    setup_logging(log_level, config.log_file.as_deref());

    // Environment is read once here and handed down explicitly
    let env = Environment::capture();

    info!("Starting hookrelay with config from: {:?}", cli.config);

    run(cli, config, env)
}
