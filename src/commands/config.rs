use colored::*;
use eyre::Result;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "hookrelay Configuration".bold());
            println!();

            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
            match &config.log_file {
                Some(path) => println!("{}: {}", "log_file".cyan(), path.display()),
                None => println!("{}: {}", "log_file".cyan(), "stderr".dimmed()),
            }
            println!();

            println!("{}:", "discovery".cyan());
            println!("  local_url: {}", config.discovery.local_url);
            println!("  container_url: {}", config.discovery.container_url);
            println!("  probe_timeout_secs: {}", config.discovery.probe_timeout_secs);
            println!("  health_path: {}", config.discovery.health_path);
            println!();

            println!("{}:", "delivery".cyan());
            println!("  timeout_secs: {}", config.delivery.timeout_secs);
            println!("  user_agent: {}", config.delivery.user_agent);
            println!();

            println!("{}:", "summarizer".cyan());
            println!("  model: {}", config.summarizer.model);
            println!("  max_tokens: {}", config.summarizer.max_tokens);
            println!("  timeout_secs: {}", config.summarizer.timeout_secs);
        }
    }

    Ok(())
}
