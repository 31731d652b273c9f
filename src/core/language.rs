//! Source language detection

use tracing::debug;

/// Detects the dominant language of `text`.
/// Returns an ISO 639-1 code, or None if detection is unreliable.
pub fn detect_language(text: &str) -> Option<String> {
    let info = whatlang::detect(text)?;
    if !info.is_reliable() {
        debug!("Language detection unreliable (confidence {:.2})", info.confidence());
        return None;
    }
    Some(lang_to_code(info.lang()))
}

fn lang_to_code(lang: whatlang::Lang) -> String {
    use whatlang::Lang::*;
    match lang {
        Eng => "en",
        Spa => "es",
        Ita => "it",
        Por => "pt",
        Fra => "fr",
        Deu => "de",
        Nld => "nl",
        Rus => "ru",
        Ukr => "uk",
        Pol => "pl",
        Swe => "sv",
        Dan => "da",
        Fin => "fi",
        Cmn => "zh",
        Jpn => "ja",
        Kor => "ko",
        Ara => "ar",
        Hin => "hi",
        Tur => "tr",
        Vie => "vi",
        Tha => "th",
        Ell => "el",
        Heb => "he",
        _ => "other",
    }
    .to_string()
}

/// English display name for an ISO 639-1 code, used when naming the source
/// language inside the prompt. Unknown codes fall back to the code itself.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "fr" => "French",
        "de" => "German",
        "nl" => "Dutch",
        "ru" => "Russian",
        "uk" => "Ukrainian",
        "pl" => "Polish",
        "sv" => "Swedish",
        "da" => "Danish",
        "fi" => "Finnish",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "tr" => "Turkish",
        "vi" => "Vietnamese",
        "th" => "Thai",
        "el" => "Greek",
        "he" => "Hebrew",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_spanish() {
        let text = "María caminó al mercado esta mañana. Luego comió una manzana \
                    mientras hablaba con su hermana sobre el viaje a Barcelona.";
        assert_eq!(detect_language(text).as_deref(), Some("es"));
    }

    #[test]
    fn test_detect_english() {
        let text = "The quick brown fox jumps over the lazy dog while the farmer \
                    watches from the porch of his old wooden house.";
        assert_eq!(detect_language(text).as_deref(), Some("en"));
    }

    #[test]
    fn test_detect_empty_text() {
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn test_language_names() {
        assert_eq!(language_name("es"), "Spanish");
        assert_eq!(language_name("de"), "German");
        assert_eq!(language_name("xx"), "xx");
    }
}
