//! Relay one hook event to the collector
//!
//! Only a missing source app, an unusable endpoint or malformed input may
//! fail the invocation, and all of those are detected before anything is
//! sent. Once delivery has been attempted the command succeeds regardless
//! of its outcome so the calling hook is never reported as failed.

use eyre::{Context, Result, eyre};
use std::io::Read;

use crate::cli::SendArgs;
use crate::config::{Config, Environment, first_present};
use crate::delivery::DeliveryClient;
use crate::discovery::{Discovery, events_url};
use crate::event::{BuildOptions, EventBuilder, parse_input};
use crate::summarizer::{AnthropicSummarizer, Summarizer};

pub fn run(args: SendArgs, config: &Config, env: &Environment, mut input: impl Read) -> Result<()> {
    let source_app = first_present([args.source_app.clone(), env.app_name.clone()])
        .ok_or_else(|| eyre!("--source-app argument or APP_NAME environment variable is required"))?;

    let event_type = args.event_type.clone().ok_or_else(|| eyre!("--event-type is required"))?;

    // Parsed before any network activity so bad input never probes or sends
    let mut raw = String::new();
    input.read_to_string(&mut raw).context("Failed to read hook input from stdin")?;
    let payload = parse_input(&raw)?;

    let endpoint = resolve_endpoint(&args, config, env)?;
    log::debug!("Relaying {} event from {} to {}", event_type, source_app, endpoint);

    let summarizer = match (&env.api_key, args.summarize) {
        (Some(key), true) => Some(AnthropicSummarizer::new(&config.summarizer, key.clone())),
        _ => None,
    };
    let builder = EventBuilder::new(summarizer.as_ref().map(|s| s as &dyn Summarizer));

    let options = BuildOptions {
        add_chat: args.add_chat,
        summarize: args.summarize,
    };
    let envelope = builder.build(payload, &source_app, &event_type, options);

    let client = DeliveryClient::new(&config.delivery);
    let _delivered = client.deliver(&envelope, &endpoint);

    Ok(())
}

/// Explicit argument, then environment, then live discovery
fn resolve_endpoint(args: &SendArgs, config: &Config, env: &Environment) -> Result<String> {
    if let Some(base) = first_present([args.server_url.clone(), env.server_url.clone()]) {
        return Ok(events_url(&base));
    }

    let discovery = Discovery::new(&config.discovery, None, &config.delivery.user_agent);
    discovery.events_endpoint(None).ok_or_else(|| {
        eyre!(
            "Could not discover observability server. Tried: {}",
            discovery.candidates(None).join(", ")
        )
    })
}
