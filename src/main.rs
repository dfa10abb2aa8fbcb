use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cv_screener::cli;
use cv_screener::config::Config;
use cv_screener::registry::PromptRegistry;

#[derive(Parser)]
#[command(name = "cv-screener")]
#[command(about = "Candidate screening toolkit: GitHub account validation and the evaluation prompt pack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a candidate's GitHub account (URL, @handle, or username)
    Validate {
        /// Identifier to validate; prompted for interactively when omitted
        identifier: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Request timeout in seconds (overrides configuration)
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// List the evaluation prompt documents
    Prompts {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print one prompt document for use in an external runner
    Show {
        /// Name of the prompt to print
        name: String,
    },

    /// Show status of configuration and prompts
    Status,

    /// Initialize configuration and setup
    Init {
        /// Force overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Check installation and configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("cv_screener={}", log_level))
        .init();

    // Load configuration
    let config = Config::load(cli.config.as_deref()).await?;

    // Initialize prompt registry
    let registry = PromptRegistry::new(&config.prompts_dir).await?;

    match cli.command {
        Commands::Validate {
            identifier,
            format,
            timeout,
        } => {
            cli::validate_account(&config, identifier, &format, timeout).await?;
        }

        Commands::Prompts { format } => {
            cli::list_prompts(&registry, &format).await?;
        }

        Commands::Show { name } => {
            cli::show_prompt(&registry, &name).await?;
        }

        Commands::Status => {
            cli::show_status(&registry, &config).await?;
        }

        Commands::Init { force } => {
            cli::initialize_config(force).await?;
        }

        Commands::Doctor => {
            cli::check_health(&registry, &config).await?;
        }
    }

    Ok(())
}
