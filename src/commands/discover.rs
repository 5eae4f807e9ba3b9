//! Observability server discovery diagnostics

use colored::*;
use eyre::Result;

use crate::config::{Config, Environment};
use crate::discovery::{Discovery, join_url};

pub fn run(url: Option<&str>, path: &str, config: &Config, env: &Environment) -> Result<()> {
    let discovery = Discovery::new(&config.discovery, env.server_url.clone(), &config.delivery.user_agent);

    if let Some(url) = url {
        if discovery.probe(url) {
            println!("{} Server reachable: {}", "✓".green(), url);
        } else {
            println!("{} Server unreachable: {}", "✗".red(), url);
        }
        return Ok(());
    }

    println!("{} Discovering observability server...", "→".blue());

    match discovery.discover(None) {
        Some(base) => {
            println!("{} Found server: {}", "✓".green(), base.cyan());
            println!("  Endpoint: {}", join_url(&base, path));
        }
        None => {
            println!("{} No reachable server found", "✗".red());
            println!("Tried:");
            for candidate in discovery.candidates(None) {
                println!("  - {}", candidate.dimmed());
            }
        }
    }

    Ok(())
}
