//! angelia - CLI entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use angelia::report::{GenerateOptions, run_config_set, run_config_show, run_generate};

/// Generate status reports and standup updates from git commits.
#[derive(Parser, Debug)]
#[command(name = "angelia")]
#[command(about = "Generate status reports and standup updates from your git commits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a message from git commits in the selected period
    Generate {
        /// Git author email
        #[arg(short, long)]
        author: Option<String>,

        /// Time interval (daily, weekly, monthly)
        #[arg(short, long)]
        interval: Option<String>,

        /// Message template (report, transcript, summary)
        #[arg(short, long)]
        template: Option<String>,

        /// Gemini API key
        #[arg(long)]
        api_key: Option<String>,

        /// Output language (e.g. en, tr)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value (author, default_type, api_key)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            author,
            interval,
            template,
            api_key,
            language,
        } => {
            let opts = GenerateOptions {
                author,
                interval,
                template,
                api_key,
                language,
            };
            run_generate(&opts).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => run_config_show(),
            ConfigCommands::Set { key, value } => run_config_set(&key, &value),
        },
    }
}
