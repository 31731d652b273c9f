//! Sequential chunk dispatch, usage accounting, and output reassembly

use tracing::{debug, warn};

use crate::core::client::{TranslationBackend, TranslationPrompt};
use crate::core::instructions::InstructionSet;
use crate::core::language::language_name;
use crate::core::models::{Chunk, ChunkResult, UsageRecord, PARAGRAPH_DELIMITER};
use crate::core::tokenizer::TokenCounter;

/// System message for every backend call
const SYSTEM_PROMPT: &str = "You are a helpful assistant who translates books.";

/// Build the full prompt for one chunk: persona, named source language,
/// instruction text, the chunk verbatim, and the translation cue.
pub fn build_prompt(
    chunk: &Chunk,
    instructions: &InstructionSet,
    source_language: &str,
) -> TranslationPrompt {
    let user = format!(
        "You are a professional literary translator. Translate the following \
         text from {} into English.\n\n{}\n\nText:\n{}\n\nEnglish Translation:",
        language_name(source_language),
        instructions.render(),
        chunk.text
    );

    TranslationPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Token cost of the prompt scaffolding alone (persona, language line,
/// instructions, cue) - everything except the chunk body. The segmenter
/// subtracts this from the context window when sub-splitting.
pub fn prompt_overhead_tokens(
    instructions: &InstructionSet,
    source_language: &str,
    counter: &TokenCounter,
) -> usize {
    let empty = Chunk {
        text: String::new(),
        size: 0,
    };
    counter.count(&build_prompt(&empty, instructions, source_language).full_text())
}

/// Record character and token counts for one prompt against the model limit.
/// Pure function of its inputs; recorded before dispatch, whether or not the
/// backend call later succeeds.
pub fn record_usage(
    chunk_index: usize,
    prompt_text: &str,
    token_limit: usize,
    counter: &TokenCounter,
) -> UsageRecord {
    UsageRecord {
        chunk_index,
        char_count: prompt_text.chars().count(),
        token_count: counter.count(prompt_text),
        token_limit,
    }
}

/// Translate chunks strictly one at a time, in input order.
///
/// A backend failure marks that chunk's slot with the failure sentinel and
/// the run continues; no retries, no reordering. `on_progress` receives the
/// completed fraction after every chunk, so it reaches 1.0 once the run ends.
pub async fn translate_chunks(
    backend: &dyn TranslationBackend,
    chunks: &[Chunk],
    instructions: &InstructionSet,
    source_language: &str,
    token_limit: usize,
    counter: &TokenCounter,
    mut on_progress: impl FnMut(f64),
) -> (Vec<ChunkResult>, Vec<UsageRecord>) {
    let total = chunks.len();
    let mut results = Vec::with_capacity(total);
    let mut usage = Vec::with_capacity(total);

    for (index, chunk) in chunks.iter().enumerate() {
        let prompt = build_prompt(chunk, instructions, source_language);
        usage.push(record_usage(index, &prompt.full_text(), token_limit, counter));

        match backend.translate(&prompt).await {
            Ok(translation) => {
                debug!("Chunk {}/{} translated", index + 1, total);
                results.push(ChunkResult::Translated(translation));
            }
            Err(e) => {
                warn!("Chunk {}/{} failed: {}", index + 1, total, e);
                results.push(ChunkResult::Failed);
            }
        }

        on_progress((index + 1) as f64 / total as f64);
    }

    (results, usage)
}

/// Join per-chunk results back into a single document with the paragraph
/// delimiter. Failure sentinels are kept verbatim so a failed chunk stays
/// visible in the output instead of disappearing.
pub fn reassemble(results: &[ChunkResult]) -> String {
    results
        .iter()
        .map(|r| r.text())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_DELIMITER)
}
