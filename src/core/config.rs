//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::core::models::BudgetUnit;

/// Context window sizes per supported model
const MODEL_CONTEXT_LIMITS: &[(&str, usize)] = &[
    ("gpt-3.5-turbo", 4_096),
    ("gpt-3.5-turbo-16k", 16_384),
    ("gpt-4", 8_192),
    ("gpt-4-turbo", 128_000),
    ("gpt-4o", 128_000),
    ("gpt-4o-mini", 128_000),
];

/// USD per 1K tokens (input, output) per supported model
const MODEL_PRICES: &[(&str, f64, f64)] = &[
    ("gpt-3.5-turbo", 0.0015, 0.002),
    ("gpt-3.5-turbo-16k", 0.003, 0.004),
    ("gpt-4", 0.01, 0.03),
    ("gpt-4-turbo", 0.01, 0.03),
    ("gpt-4o", 0.005, 0.015),
    ("gpt-4o-mini", 0.00015, 0.0006),
];

/// Fallback context limit for models missing from the table
const DEFAULT_CONTEXT_LIMIT: usize = 4_096;

/// Configuration for one translation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub api_endpoint: String,
    pub model_name: String,
    pub max_chunk_budget: usize,
    pub budget_unit: BudgetUnit,
    pub custom_style: Option<String>,
    pub source_language_override: Option<String>,
    pub timeout_ms: u64,
    pub gender_sensitive_languages: Vec<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            api_endpoint: std::env::var("API_ENDPOINT")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            model_name: "gpt-3.5-turbo".to_string(),
            max_chunk_budget: 800,
            budget_unit: BudgetUnit::Word,
            custom_style: None,
            source_language_override: None,
            timeout_ms: 120_000,
            gender_sensitive_languages: default_gender_sensitive(),
        }
    }
}

/// Languages whose grammar implies gendered subjects the source text may
/// leave unstated
fn default_gender_sensitive() -> Vec<String> {
    ["es", "it", "pt", "fr"].iter().map(|s| s.to_string()).collect()
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY environment variable is required"))?;

        let api_endpoint = std::env::var("API_ENDPOINT")
            .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string());

        let model_name = std::env::var("MODEL_NAME")
            .unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let max_chunk_budget = std::env::var("MAX_CHUNK_BUDGET")
            .unwrap_or_else(|_| "800".to_string())
            .parse::<usize>()?;

        let budget_unit = std::env::var("BUDGET_UNIT")
            .unwrap_or_else(|_| "word".to_string())
            .parse::<BudgetUnit>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "120000".to_string())
            .parse::<u64>()?;

        Ok(Self {
            api_key,
            api_endpoint,
            model_name,
            max_chunk_budget,
            budget_unit,
            custom_style: None,
            source_language_override: None,
            timeout_ms,
            gender_sensitive_languages: default_gender_sensitive(),
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.max_chunk_budget == 0 {
            return Err(anyhow::anyhow!("max_chunk_budget must be greater than 0"));
        }

        if !MODEL_CONTEXT_LIMITS.iter().any(|(id, _)| *id == self.model_name) {
            warn!(
                "Unknown model '{}', assuming a {} token context window",
                self.model_name, DEFAULT_CONTEXT_LIMIT
            );
        }

        Ok(())
    }

    /// Hard context window limit for the configured model, in tokens
    pub fn context_limit(&self) -> usize {
        MODEL_CONTEXT_LIMITS
            .iter()
            .find(|(id, _)| *id == self.model_name)
            .map(|(_, limit)| *limit)
            .unwrap_or(DEFAULT_CONTEXT_LIMIT)
    }

    /// Estimated USD cost for translating `word_count` words with this model.
    /// Uses the rough two-tokens-per-word heuristic and assumes output is
    /// priced at the same token volume as input.
    pub fn estimate_cost(&self, word_count: usize) -> f64 {
        let estimated_tokens = word_count * 2;
        let (input_price, output_price) = MODEL_PRICES
            .iter()
            .find(|(id, _, _)| *id == self.model_name)
            .map(|(_, i, o)| (*i, *o))
            .unwrap_or((0.0015, 0.002));

        (estimated_tokens as f64 / 1000.0) * (input_price + output_price)
    }

    /// Whether `lang` needs the gender-disambiguation directive
    pub fn is_gender_sensitive(&self, lang: &str) -> bool {
        self.gender_sensitive_languages.iter().any(|l| l == lang)
    }
}
