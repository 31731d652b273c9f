//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::core::models::BudgetUnit;

/// Commands for the book translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a plain-text document into English
    Translate {
        /// Input file (required)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file (default: <input>_translated.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model name (default: MODEL_NAME env var or gpt-3.5-turbo)
        #[arg(short, long)]
        model: Option<String>,

        /// Chunk budget in the chosen unit
        #[arg(short, long)]
        budget: Option<usize>,

        /// Budget unit: word or token
        #[arg(short, long)]
        unit: Option<BudgetUnit>,

        /// Optional style or tone instruction (e.g. "gothic novel")
        #[arg(short, long)]
        style: Option<String>,

        /// Source language code (auto-detect if not specified)
        #[arg(long)]
        source_lang: Option<String>,
    },

    /// Estimate word count, token volume, and cost without translating
    Estimate {
        /// Input file (required)
        #[arg(short, long)]
        file: PathBuf,

        /// Model name to price against
        #[arg(short, long)]
        model: Option<String>,
    },
}

/// Handle the translate command
pub async fn handle_translate(
    file: PathBuf,
    output: Option<PathBuf>,
    model: Option<String>,
    budget: Option<usize>,
    unit: Option<BudgetUnit>,
    style: Option<String>,
    source_lang: Option<String>,
) -> anyhow::Result<()> {
    use crate::core::config::TranslatorConfig;
    use crate::core::pipeline::Translator;
    use crate::processors::text::TextProcessor;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::info;

    let start_time = Instant::now();

    let mut config = TranslatorConfig::from_env()?;
    if let Some(model) = model {
        config.model_name = model;
    }
    if let Some(budget) = budget {
        config.max_chunk_budget = budget;
    }
    if let Some(unit) = unit {
        config.budget_unit = unit;
    }
    config.custom_style = style;
    config.source_language_override = source_lang;

    let output = output.unwrap_or_else(|| default_output_path(&file));

    info!("Starting translation");
    info!("Input: {}", file.display());
    info!("Output: {}", output.display());
    info!("Model: {}", config.model_name);
    info!(
        "Budget: {} {}s per chunk",
        config.max_chunk_budget, config.budget_unit
    );

    let processor = TextProcessor::new(Translator::new(config)?);

    // Progress is a completed fraction; render it as a percentage bar
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Translating");

    let report = processor
        .translate_file(&file, &output, |fraction| {
            pb.set_position((fraction * 100.0).round() as u64);
        })
        .await?;

    pb.finish_with_message("Completed");

    let duration = start_time.elapsed();
    info!(
        "Completed: {} chunks, {} failed in {:?}",
        report.results.len(),
        report.failed_chunks(),
        duration
    );

    println!("\n✅ Translation completed!");
    println!("   Source language: {}", report.source_language);
    println!("   Chunks: {}", report.results.len());
    println!("   Failed: {}", report.failed_chunks());
    println!("   Output: {}", output.display());
    println!("   Time: {:?}", duration);

    print_usage_table(&report.usage);

    Ok(())
}

/// Handle the estimate command
pub async fn handle_estimate(file: PathBuf, model: Option<String>) -> anyhow::Result<()> {
    use crate::core::config::TranslatorConfig;
    use crate::core::language::detect_language;
    use crate::core::models::word_count;

    let content = tokio::fs::read_to_string(&file).await?;

    let mut config = TranslatorConfig::default();
    if let Some(model) = model {
        config.model_name = model;
    }

    let words = word_count(&content);
    let estimated_tokens = words * 2;
    let cost = config.estimate_cost(words);

    println!("📖 {}", file.display());
    if let Some(lang) = detect_language(&content) {
        println!("   Detected language: {lang}");
    } else {
        println!("   Detected language: unknown");
    }
    println!("   Words: {words}");
    println!("   Estimated tokens: ~{estimated_tokens}");
    println!(
        "   Estimated cost with {}: ${:.2}",
        config.model_name, cost
    );

    Ok(())
}

/// Per-chunk token usage table shown after a run
fn print_usage_table(usage: &[crate::core::models::UsageRecord]) {
    if usage.is_empty() {
        return;
    }

    println!("\n📊 Token usage per chunk:");
    println!("   {:>5}  {:>8}  {:>8}  {:>8}  {:>6}", "chunk", "chars", "tokens", "limit", "used");
    for record in usage {
        println!(
            "   {:>5}  {:>8}  {:>8}  {:>8}  {:>5.1}%",
            record.chunk_index,
            record.char_count,
            record.token_count,
            record.token_limit,
            record.utilization() * 100.0
        );
    }
}

/// `book.txt` becomes `book_translated.txt` next to the input
fn default_output_path(input: &PathBuf) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "translated".to_string());
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "txt".to_string());

    let mut out = input.clone();
    out.set_file_name(format!("{stem}_translated.{extension}"));
    out
}
