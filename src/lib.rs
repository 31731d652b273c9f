//! Book Translator - chunked LLM document translation library
//!
//! Splits long documents into paragraph-aligned, token-bounded chunks,
//! injects style and consistency directives, dispatches each chunk to an
//! LLM backend, and reassembles the English translation while tracking
//! per-chunk token usage.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod processors;

// Re-export key types for convenience
pub use crate::core::{
    client::{OpenAiBackend, TranslationBackend, TranslationPrompt},
    config::TranslatorConfig,
    dispatcher::reassemble,
    errors::TranslationError,
    instructions::{compose, InstructionSet},
    models::{BudgetUnit, Chunk, ChunkResult, RunReport, UsageRecord, FAILURE_SENTINEL},
    pipeline::Translator,
    segmenter::{fit_to_context, segment, split_paragraphs},
    tokenizer::TokenCounter,
};

pub use crate::processors::text::TextProcessor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
