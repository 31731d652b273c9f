//! Translation backend interface and the OpenAI chat-completions client

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};

/// Fully rendered prompt for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPrompt {
    /// System message establishing the translator persona
    pub system: String,
    /// User message carrying instructions, the chunk, and the translation cue
    pub user: String,
}

impl TranslationPrompt {
    /// Concatenated prompt text, used for token accounting
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.system, self.user)
    }
}

/// Abstract translation capability: one prompt in, translated text out.
///
/// The dispatcher only depends on this trait, so tests and alternative
/// backends can stand in for the HTTP client.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate one prompt, returning the raw translated text
    async fn translate(&self, prompt: &TranslationPrompt) -> Result<String>;
}

/// Chat-completions client for OpenAI-compatible endpoints
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    api_endpoint: String,
    model_name: String,
}

impl OpenAiBackend {
    /// Create a backend from validated configuration
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_endpoint: config.api_endpoint.clone(),
            model_name: config.model_name.clone(),
        })
    }
}

#[async_trait]
impl TranslationBackend for OpenAiBackend {
    async fn translate(&self, prompt: &TranslationPrompt) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model_name,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user }
            ]
        });

        debug!("Dispatching {} char prompt to {}", prompt.user.len(), self.model_name);

        let response = self
            .client
            .post(&self.api_endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::TimeoutError
                } else {
                    TranslationError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let json: serde_json::Value =
                response
                    .json()
                    .await
                    .map_err(|e| TranslationError::InvalidResponseError {
                        message: e.to_string(),
                    })?;

            let translation = json["choices"]
                .get(0)
                .and_then(|c| c["message"]["content"].as_str())
                .ok_or_else(|| TranslationError::InvalidResponseError {
                    message: "No translation in response".to_string(),
                })?
                .to_string();

            Ok(translation)
        } else {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();

            Err(TranslationError::ApiError {
                status: status_code,
                message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_creation() {
        let config = TranslatorConfig {
            api_key: "test_key".to_string(),
            ..Default::default()
        };
        assert!(OpenAiBackend::new(&config).is_ok());
    }

    #[test]
    fn test_backend_creation_rejects_empty_key() {
        let config = TranslatorConfig {
            api_key: "".to_string(),
            ..Default::default()
        };
        assert!(OpenAiBackend::new(&config).is_err());
    }

    #[test]
    fn test_prompt_full_text() {
        let prompt = TranslationPrompt {
            system: "You are a translator.".to_string(),
            user: "Translate this.".to_string(),
        };
        assert_eq!(prompt.full_text(), "You are a translator.\nTranslate this.");
    }
}
