use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "hookrelay",
    about = "Send Claude Code hook events to a multi-agent observability server",
    version = env!("GIT_DESCRIBE"),
    subcommand_negates_reqs = true,
    after_help = "Reads the hook input as JSON on stdin.\n\nEnvironment:\n  APP_NAME                   fallback for --source-app\n  OBSERVABILITY_SERVER_URL   fallback for --server-url\n  ANTHROPIC_API_KEY          enables --summarize"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to hookrelay.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable debug diagnostics")]
    pub verbose: bool,

    #[command(flatten)]
    pub send: SendArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SendArgs {
    /// Source application name (can be set via APP_NAME env var)
    #[arg(long)]
    pub source_app: Option<String>,

    /// Hook event type (PreToolUse, PostToolUse, etc.)
    #[arg(long, required = true)]
    pub event_type: Option<String>,

    /// Server URL (can be set via OBSERVABILITY_SERVER_URL env var)
    #[arg(long)]
    pub server_url: Option<String>,

    /// Include chat transcript if available
    #[arg(long)]
    pub add_chat: bool,

    /// Generate AI summary of the event
    #[arg(long)]
    pub summarize: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate a reachable observability server
    Discover {
        /// Probe only this base URL
        url: Option<String>,

        /// API path to resolve on the discovered server
        #[arg(long, default_value = "/events")]
        path: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}
