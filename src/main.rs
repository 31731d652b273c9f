//! Main entry point for the book translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod processors;

use cli::commands::Commands;

/// Book Translator - chunked LLM document translation
#[derive(Parser, Debug)]
#[command(name = "book-translator", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to OPENAI_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

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

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("book_translator={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        std::env::set_var("OPENAI_API_KEY", api_key);
    }

    // Execute command
    match args.command {
        Some(Commands::Translate {
            file,
            output,
            model,
            budget,
            unit,
            style,
            source_lang,
        }) => {
            cli::commands::handle_translate(file, output, model, budget, unit, style, source_lang)
                .await?;
        }
        Some(Commands::Estimate { file, model }) => {
            cli::commands::handle_estimate(file, model).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
