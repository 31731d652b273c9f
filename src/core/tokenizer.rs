//! Token counting for model context budgeting

use tiktoken_rs::CoreBPE;
use tracing::warn;

use crate::core::models::word_count;

/// Token counter bound to one model's BPE encoding.
///
/// When the encoding for a model cannot be resolved the counter degrades to
/// whitespace word counting instead of failing the run; budgets then behave
/// as word budgets.
pub struct TokenCounter {
    bpe: Option<CoreBPE>,
}

impl TokenCounter {
    /// Resolve the encoding for `model_name`, degrading on failure
    pub fn for_model(model_name: &str) -> Self {
        match tiktoken_rs::get_bpe_from_model(model_name) {
            Ok(bpe) => Self { bpe: Some(bpe) },
            Err(e) => {
                warn!(
                    "No tokenizer for model '{}' ({}), degrading to word counts",
                    model_name, e
                );
                Self { bpe: None }
            }
        }
    }

    /// Counter that only ever counts words, never loads an encoding
    pub fn word_only() -> Self {
        Self { bpe: None }
    }

    /// Whether exact BPE counting is available
    pub fn is_exact(&self) -> bool {
        self.bpe.is_some()
    }

    /// Number of tokens in `text`, or its word count when degraded
    pub fn count(&self, text: &str) -> usize {
        match &self.bpe {
            Some(bpe) => bpe.encode_with_special_tokens(text).len(),
            None => word_count(text),
        }
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("exact", &self.is_exact())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_counts_tokens() {
        let counter = TokenCounter::for_model("gpt-3.5-turbo");
        assert!(counter.is_exact());

        let count = counter.count("Hello world, this is a test.");
        assert!(count > 0);
        // A short sentence never explodes into hundreds of tokens
        assert!(count < 20);
    }

    #[test]
    fn test_unknown_model_degrades_to_words() {
        let counter = TokenCounter::for_model("not-a-real-model-xyz");
        assert!(!counter.is_exact());
        assert_eq!(counter.count("one two three"), 3);
    }

    #[test]
    fn test_word_only_counter() {
        let counter = TokenCounter::word_only();
        assert_eq!(counter.count("alpha beta"), 2);
        assert_eq!(counter.count(""), 0);
    }
}
