//! Core data models for the chunked translation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delimiter between paragraphs in raw and reassembled text
pub const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Placeholder emitted for a chunk whose translation failed
pub const FAILURE_SENTINEL: &str = "[Translation failed for this part]";

/// Measurement basis used to bound chunk size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetUnit {
    /// Whitespace word count - cheap, approximate
    Word,
    /// Exact tokenizer output - precise, needs a BPE encoding
    Token,
}

impl fmt::Display for BudgetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetUnit::Word => write!(f, "word"),
            BudgetUnit::Token => write!(f, "token"),
        }
    }
}

impl std::str::FromStr for BudgetUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "word" | "words" => Ok(BudgetUnit::Word),
            "token" | "tokens" => Ok(BudgetUnit::Token),
            other => Err(format!("unknown budget unit: {other}")),
        }
    }
}

/// A contiguous run of paragraphs dispatched as one translation unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Paragraphs joined with the paragraph delimiter
    pub text: String,
    /// Size in the budget unit active when the chunk was built
    pub size: usize,
}

impl Chunk {
    pub fn new(paragraphs: &[&str], size: usize) -> Self {
        Self {
            text: paragraphs.join(PARAGRAPH_DELIMITER),
            size,
        }
    }

    /// Paragraphs contained in this chunk, in order
    pub fn paragraphs(&self) -> Vec<&str> {
        self.text.split(PARAGRAPH_DELIMITER).collect()
    }
}

/// Per-chunk translation outcome, positionally aligned with the chunk list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkResult {
    /// Backend returned a translation
    Translated(String),
    /// Backend call failed; the run continued
    Failed,
}

impl ChunkResult {
    /// Output text for this slot. Failed chunks render as a visible
    /// placeholder so no chunk is ever silently dropped from the output.
    pub fn text(&self) -> &str {
        match self {
            ChunkResult::Translated(text) => text,
            ChunkResult::Failed => FAILURE_SENTINEL,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChunkResult::Failed)
    }
}

/// Token accounting for one dispatched chunk, recorded before the backend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub chunk_index: usize,
    pub char_count: usize,
    pub token_count: usize,
    pub token_limit: usize,
}

impl UsageRecord {
    /// Fraction of the model context window consumed by this prompt
    pub fn utilization(&self) -> f64 {
        if self.token_limit == 0 {
            return 0.0;
        }
        self.token_count as f64 / self.token_limit as f64
    }
}

/// Outcome of one full translation run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Reassembled translated document
    pub translation: String,
    /// ISO 639-1 code of the source language (detected or overridden)
    pub source_language: String,
    /// Per-chunk outcomes, in input order
    pub results: Vec<ChunkResult>,
    /// Per-chunk usage rows, in dispatch order
    pub usage: Vec<UsageRecord>,
}

impl RunReport {
    pub fn failed_chunks(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }
}

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_unit_parse() {
        assert_eq!("word".parse::<BudgetUnit>().unwrap(), BudgetUnit::Word);
        assert_eq!("Tokens".parse::<BudgetUnit>().unwrap(), BudgetUnit::Token);
        assert!("bytes".parse::<BudgetUnit>().is_err());
    }

    #[test]
    fn test_chunk_paragraph_round_trip() {
        let chunk = Chunk::new(&["First paragraph.", "Second paragraph."], 4);
        assert_eq!(
            chunk.paragraphs(),
            vec!["First paragraph.", "Second paragraph."]
        );
    }

    #[test]
    fn test_failed_result_renders_sentinel() {
        let failed = ChunkResult::Failed;
        assert_eq!(failed.text(), FAILURE_SENTINEL);
        assert!(failed.is_failed());

        let ok = ChunkResult::Translated("Hello".to_string());
        assert_eq!(ok.text(), "Hello");
    }

    #[test]
    fn test_usage_utilization() {
        let record = UsageRecord {
            chunk_index: 0,
            char_count: 100,
            token_count: 2048,
            token_limit: 8192,
        };
        assert!((record.utilization() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one two  three\nfour"), 4);
        assert_eq!(word_count("   "), 0);
    }
}
