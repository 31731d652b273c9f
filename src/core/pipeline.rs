//! Run orchestration: detect, compose, segment, dispatch, reassemble

use tracing::info;

use crate::core::client::{OpenAiBackend, TranslationBackend};
use crate::core::config::TranslatorConfig;
use crate::core::dispatcher::{prompt_overhead_tokens, reassemble, translate_chunks};
use crate::core::errors::{Result, TranslationError};
use crate::core::instructions::compose;
use crate::core::language::detect_language;
use crate::core::models::{RunReport, PARAGRAPH_DELIMITER};
use crate::core::segmenter::{fit_to_context, segment};
use crate::core::tokenizer::TokenCounter;

/// One-document translation pipeline.
///
/// Holds the configuration, the tokenizer for the configured model, and the
/// backend. Each `run` derives its chunk list fresh; nothing is cached
/// between runs.
pub struct Translator {
    config: TranslatorConfig,
    backend: Box<dyn TranslationBackend>,
    counter: TokenCounter,
}

impl Translator {
    /// Create a pipeline talking to the configured OpenAI-compatible endpoint
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let backend = OpenAiBackend::new(&config)?;
        Ok(Self::with_backend(config, Box::new(backend)))
    }

    /// Create a pipeline over an arbitrary backend (used by tests and
    /// alternative transports)
    pub fn with_backend(config: TranslatorConfig, backend: Box<dyn TranslationBackend>) -> Self {
        let counter = TokenCounter::for_model(&config.model_name);
        Self {
            config,
            backend,
            counter,
        }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate a raw document into English.
    ///
    /// `on_progress` receives the completed fraction after every chunk.
    /// Input problems are fatal and surface here before any chunk is
    /// dispatched; per-chunk backend failures become sentinel paragraphs in
    /// the returned report instead of aborting the run.
    pub async fn run(&self, raw_text: &str, on_progress: impl FnMut(f64)) -> Result<RunReport> {
        if raw_text.trim().is_empty() {
            return Err(TranslationError::InputError {
                message: "Document contains no text".to_string(),
            });
        }

        let source_language = match &self.config.source_language_override {
            Some(lang) => lang.clone(),
            None => detect_language(raw_text).ok_or_else(|| TranslationError::InputError {
                message: "Could not detect the source language; \
                          set source_language_override"
                    .to_string(),
            })?,
        };

        let instructions = compose(
            &source_language,
            self.config.custom_style.as_deref(),
            &self.config,
        );

        let chunks = segment(
            raw_text,
            self.config.max_chunk_budget,
            self.config.budget_unit,
            &self.counter,
        );

        let overhead = prompt_overhead_tokens(&instructions, &source_language, &self.counter);
        let context_limit = self.config.context_limit();
        let chunks = fit_to_context(chunks, overhead, context_limit, &self.counter);

        info!(
            "Translating {} chunks from '{}' with {} ({} token window)",
            chunks.len(),
            source_language,
            self.config.model_name,
            context_limit
        );

        let (results, usage) = translate_chunks(
            self.backend.as_ref(),
            &chunks,
            &instructions,
            &source_language,
            context_limit,
            &self.counter,
            on_progress,
        )
        .await;

        let translation = reassemble(&results);
        let failed = results.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            info!("Run finished with {}/{} failed chunks", failed, results.len());
        } else {
            info!("Run finished, all {} chunks translated", results.len());
        }

        Ok(RunReport {
            translation,
            source_language,
            results,
            usage,
        })
    }

    /// Translate a document already decomposed into paragraphs. This is the
    /// seam external readers (word-processor extractors, etc.) call into.
    pub async fn run_paragraphs(
        &self,
        paragraphs: &[String],
        on_progress: impl FnMut(f64),
    ) -> Result<RunReport> {
        let raw = paragraphs.join(PARAGRAPH_DELIMITER);
        self.run(&raw, on_progress).await
    }
}
