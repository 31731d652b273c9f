//! Plain-text document adapter

use std::path::Path;
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::RunReport;
use crate::core::pipeline::Translator;
use crate::core::segmenter::split_paragraphs;

/// Reads paragraph text from .txt files, runs the pipeline, and writes the
/// translated document back out. Word-processor formats are handled by
/// external readers that feed `Translator::run_paragraphs` directly.
pub struct TextProcessor {
    translator: Translator,
}

impl TextProcessor {
    /// Create a processor around an existing pipeline
    pub fn new(translator: Translator) -> Self {
        Self { translator }
    }

    /// Create from environment configuration
    pub fn from_env() -> Result<Self> {
        let translator = Translator::from_env()?;
        Ok(Self::new(translator))
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Read a document as UTF-8 text. Undecodable bytes are an input error,
    /// reported before any chunking happens.
    pub async fn read_document(&self, input: &Path) -> Result<String> {
        let bytes = tokio::fs::read(input)
            .await
            .map_err(|e| TranslationError::FileError {
                path: input.display().to_string(),
                message: e.to_string(),
            })?;

        String::from_utf8(bytes).map_err(|_| TranslationError::InputError {
            message: format!("{} is not valid UTF-8 text", input.display()),
        })
    }

    /// Read a document and split it into its paragraph sequence
    pub async fn read_paragraphs(&self, input: &Path) -> Result<Vec<String>> {
        let content = self.read_document(input).await?;
        Ok(split_paragraphs(&content)
            .into_iter()
            .map(|p| p.to_string())
            .collect())
    }

    /// Translate one file and write the result to `output`
    pub async fn translate_file(
        &self,
        input: &Path,
        output: &Path,
        on_progress: impl FnMut(f64),
    ) -> Result<RunReport> {
        debug!("Translating: {}", input.display());

        let content = self.read_document(input).await?;
        let report = self.translator.run(&content, on_progress).await?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TranslationError::FileError {
                        path: parent.display().to_string(),
                        message: e.to_string(),
                    })?;
            }
        }

        let mut body = report.translation.clone();
        body.push('\n');
        tokio::fs::write(output, body)
            .await
            .map_err(|e| TranslationError::FileError {
                path: output.display().to_string(),
                message: e.to_string(),
            })?;

        info!("Translated: {} -> {}", input.display(), output.display());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::{TranslationBackend, TranslationPrompt};
    use crate::core::config::TranslatorConfig;
    use async_trait::async_trait;

    struct FixedBackend;

    #[async_trait]
    impl TranslationBackend for FixedBackend {
        async fn translate(&self, _prompt: &TranslationPrompt) -> Result<String> {
            Ok("Translated text.".to_string())
        }
    }

    fn processor() -> TextProcessor {
        let config = TranslatorConfig {
            api_key: "test_key".to_string(),
            source_language_override: Some("es".to_string()),
            ..Default::default()
        };
        TextProcessor::new(Translator::with_backend(config, Box::new(FixedBackend)))
    }

    #[tokio::test]
    async fn test_read_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.txt");
        tokio::fs::write(&path, "Primer párrafo.\n\nSegundo párrafo.\n")
            .await
            .unwrap();

        let paragraphs = processor().read_paragraphs(&path).await.unwrap();
        assert_eq!(paragraphs, vec!["Primer párrafo.", "Segundo párrafo."]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        tokio::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).await.unwrap();

        let err = processor().read_document(&path).await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_missing_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = processor().read_document(&path).await.unwrap_err();
        assert!(matches!(err, TranslationError::FileError { .. }));
    }

    #[tokio::test]
    async fn test_translate_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("book.txt");
        let output = dir.path().join("out/book_translated.txt");
        tokio::fs::write(&input, "Hola mundo desde el libro.\n")
            .await
            .unwrap();

        let report = processor()
            .translate_file(&input, &output, |_| {})
            .await
            .unwrap();

        assert_eq!(report.failed_chunks(), 0);
        let written = tokio::fs::read_to_string(&output).await.unwrap();
        assert!(written.contains("Translated text."));
    }
}
