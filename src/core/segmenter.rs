//! Paragraph-aligned chunking bounded by a word or token budget

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::core::models::{word_count, BudgetUnit, Chunk};
use crate::core::tokenizer::TokenCounter;

/// One or more consecutive blank lines count as a single paragraph break
fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"))
}

/// Split raw text into paragraphs on blank-line boundaries.
/// Empty fragments (leading/trailing blank lines) are dropped; paragraph
/// order is preserved.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break()
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Split `text` into paragraph-aligned chunks whose size stays within
/// `budget`, measured in `unit`.
///
/// A single paragraph larger than the budget is still emitted as its own
/// chunk; nothing is dropped or truncated here. The trailing partial chunk
/// is always emitted.
pub fn segment(text: &str, budget: usize, unit: BudgetUnit, counter: &TokenCounter) -> Vec<Chunk> {
    let paragraphs = split_paragraphs(text);
    let chunks = match unit {
        BudgetUnit::Word => pack(&paragraphs, budget, word_count),
        BudgetUnit::Token => pack(&paragraphs, budget, |p| counter.count(p)),
    };

    debug!(
        "Segmented {} paragraphs into {} chunks ({} {} budget)",
        paragraphs.len(),
        chunks.len(),
        budget,
        unit
    );
    chunks
}

/// Greedily accumulate paragraphs into chunks while the running size stays
/// within `budget`
fn pack(paragraphs: &[&str], budget: usize, measure: impl Fn(&str) -> usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0;

    for para in paragraphs {
        let size = measure(para);
        if !current.is_empty() && current_size + size > budget {
            chunks.push(Chunk::new(&current, current_size));
            current.clear();
            current_size = 0;
        }
        current.push(para);
        current_size += size;
    }

    if !current.is_empty() {
        chunks.push(Chunk::new(&current, current_size));
    }

    chunks
}

/// Re-split any chunk whose realized prompt would overflow the model's
/// context window.
///
/// The realized prompt size is approximated as `overhead_tokens` (persona,
/// instructions and scaffolding) plus the chunk's own token count. Oversized
/// chunks are re-packed at paragraph granularity against the tighter budget
/// `context_limit - overhead_tokens`, recursively. A single paragraph that
/// still overflows is accepted as-is with a warning, so this always
/// terminates.
pub fn fit_to_context(
    chunks: Vec<Chunk>,
    overhead_tokens: usize,
    context_limit: usize,
    counter: &TokenCounter,
) -> Vec<Chunk> {
    let budget = context_limit.saturating_sub(overhead_tokens).max(1);
    let mut fitted = Vec::new();
    for chunk in chunks {
        fit_chunk(chunk, budget, overhead_tokens, context_limit, counter, &mut fitted);
    }
    fitted
}

fn fit_chunk(
    chunk: Chunk,
    budget: usize,
    overhead_tokens: usize,
    context_limit: usize,
    counter: &TokenCounter,
    out: &mut Vec<Chunk>,
) {
    let prompt_tokens = overhead_tokens + counter.count(&chunk.text);
    if prompt_tokens <= context_limit {
        out.push(chunk);
        return;
    }

    let sub = pack(&chunk.paragraphs(), budget, |p| counter.count(p));

    // A sub-split that cannot make progress (single paragraph, or the whole
    // chunk re-packed into one piece) is accepted with overflow rather than
    // recursed on.
    if sub.len() <= 1 {
        warn!(
            "Chunk of ~{} prompt tokens exceeds the {} token context window \
             and cannot be split further; accepting overflow",
            prompt_tokens, context_limit
        );
        out.push(chunk);
        return;
    }

    debug!(
        "Sub-splitting oversized chunk (~{} prompt tokens) into {} pieces",
        prompt_tokens,
        sub.len()
    );
    for piece in sub {
        fit_chunk(piece, budget, overhead_tokens, context_limit, counter, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::PARAGRAPH_DELIMITER;

    fn words(n: usize) -> String {
        vec!["palabra"; n].join(" ")
    }

    fn counter() -> TokenCounter {
        TokenCounter::word_only()
    }

    #[test]
    fn test_split_collapses_blank_line_runs() {
        let text = "first paragraph\n\nsecond paragraph\n\n\n\nthird paragraph\n\n";
        let paragraphs = split_paragraphs(text);
        assert_eq!(
            paragraphs,
            vec!["first paragraph", "second paragraph", "third paragraph"]
        );
    }

    #[test]
    fn test_structural_round_trip() {
        let text = format!(
            "{}\n\n{}\n\n{}",
            words(10),
            words(20),
            words(5)
        );
        let original = split_paragraphs(&text);

        let chunks = segment(&text, 15, BudgetUnit::Word, &counter());

        let reassembled: Vec<&str> = chunks
            .iter()
            .flat_map(|c| c.paragraphs())
            .collect();
        assert_eq!(reassembled, original);
    }

    #[test]
    fn test_chunks_respect_budget() {
        let text = (0..10)
            .map(|_| words(100))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_DELIMITER);

        let chunks = segment(&text, 250, BudgetUnit::Word, &counter());

        for chunk in &chunks {
            assert!(chunk.size <= 250, "chunk of {} words over budget", chunk.size);
        }
    }

    #[test]
    fn test_paragraphs_pack_to_the_boundary() {
        // 1600 words as four ~400 word paragraphs with an 800 word budget
        let text = (0..4)
            .map(|_| words(400))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_DELIMITER);

        let chunks = segment(&text, 800, BudgetUnit::Word, &counter());

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].size, 800);
        assert_eq!(chunks[1].size, 800);
    }

    #[test]
    fn test_oversized_paragraph_emitted_alone() {
        let text = format!("{}\n\n{}\n\n{}", words(10), words(500), words(10));

        let chunks = segment(&text, 50, BudgetUnit::Word, &counter());

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].size, 500);
    }

    #[test]
    fn test_token_budget_unit() {
        let text = format!("{}\n\n{}", words(30), words(30));
        // word_only counter makes token counts equal word counts
        let chunks = segment(&text, 40, BudgetUnit::Token, &counter());
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_fit_to_context_splits_oversized_chunk() {
        let paragraphs: Vec<String> = (0..4).map(|_| words(100)).collect();
        let refs: Vec<&str> = paragraphs.iter().map(|s| s.as_str()).collect();
        let chunk = Chunk::new(&refs, 400);

        // 50 token overhead against a 250 token window leaves a 200 budget
        let fitted = fit_to_context(vec![chunk], 50, 250, &counter());

        assert_eq!(fitted.len(), 2);
        for piece in &fitted {
            assert!(50 + counter().count(&piece.text) <= 250);
        }
    }

    #[test]
    fn test_fit_to_context_terminates_on_oversized_paragraph() {
        let big = words(1000);
        let chunk = Chunk::new(&[big.as_str()], 1000);

        let fitted = fit_to_context(vec![chunk], 50, 250, &counter());

        // Accepted overflow: the paragraph comes back whole instead of
        // looping or being truncated
        assert_eq!(fitted.len(), 1);
        assert_eq!(fitted[0].text, big);
    }

    #[test]
    fn test_fit_to_context_leaves_fitting_chunks_alone() {
        let chunk = Chunk::new(&["short paragraph"], 2);
        let fitted = fit_to_context(vec![chunk.clone()], 10, 4096, &counter());
        assert_eq!(fitted, vec![chunk]);
    }
}
