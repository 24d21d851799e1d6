//! Main entry point for the Microsoft Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microsoft_translator::cli::commands::{self, Commands};
use microsoft_translator::TranslatorConfig;

/// Microsoft Translator - translate text from the command line
#[derive(Parser, Debug)]
#[command(name = "mstranslate", version, about, long_about = None)]
struct Args {
    /// Subscription key (optional, defaults to SUBSCRIPTION_KEY env var)
    #[arg(long)]
    subscription_key: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("mstranslate={0},microsoft_translator={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::default(),
    };

    // Override config with CLI args if provided
    if let Some(subscription_key) = args.subscription_key {
        config.subscription_key = subscription_key;
    }

    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    match args.command {
        Some(Commands::Translate { text, from, to }) => {
            commands::handle_translate(config, text, from, to).await?;
        }
        Some(Commands::Batch {
            texts,
            from,
            to,
            detailed,
        }) => {
            commands::handle_batch(config, texts, from, to, detailed).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
