//! Style and consistency directives injected into every translation prompt

use crate::core::config::TranslatorConfig;

/// Gender disambiguation for languages with implied gendered subjects
const GENDER_DIRECTIVE: &str = "\
Pay close attention to gendered verb forms. Where the subject is implied by a \
verb (like \"comió\" in Spanish), infer from earlier context whether it is \
\"he\" or \"she\" and keep gender assignments consistent. Do not reverse \
genders to reduce ambiguity or repetition.

Example:
Spanish: María caminó al mercado. Luego comió una manzana.
English: María walked to the market. Then she ate an apple.

Spanish: Juan caminó al mercado. Luego comió una manzana.
English: Juan walked to the market. Then he ate an apple.";

/// Consistency and context tracking
const CONSISTENCY_DIRECTIVE: &str = "\
Maintain consistency in character names, key terms, and tone across all parts \
of the translation. Use earlier context to inform later translation choices. \
Avoid introducing new interpretations unless needed.";

/// Dialogue awareness
const DIALOGUE_DIRECTIVE: &str = "\
Clearly distinguish between dialogue and narration. Use consistent \
punctuation and formatting for dialogue. Preserve speaker tone and identity.";

/// Idiomatic and cultural adaptation
const IDIOM_DIRECTIVE: &str = "\
Translate idioms and cultural references into natural English equivalents \
that preserve the intended meaning and tone for English-speaking readers.";

/// Formatting and structure preservation
const FORMATTING_DIRECTIVE: &str = "\
Preserve the structure of the original text. Retain paragraph breaks, \
headings, and chapter titles. If a heading or chapter title appears in the \
original, reflect it clearly in the translation. Do not merge separate \
paragraphs into one block.";

/// Genre or style guidance built from the user's free-text request
fn style_directive(style: &str) -> String {
    let style = style.to_lowercase();
    format!(
        "Translate in the style of a {style}, preserving tone, pacing, and \
         atmosphere. Match language and phrasing to the expectations of \
         {style} readers."
    )
}

/// An ordered list of directives rendered into the prompt.
///
/// Ordering is a contract: the gender directive, when present, always comes
/// first; the custom style directive, when present, always comes last; the
/// base set keeps a fixed sequence in between. Identical inputs therefore
/// always produce an identical prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionSet {
    directives: Vec<String>,
}

impl InstructionSet {
    /// Directives in render order
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Prompt text: directives separated by blank lines
    pub fn render(&self) -> String {
        self.directives.join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// Compose the directive set for one run.
///
/// Base order is fixed: consistency, dialogue, idiom, formatting. For a
/// gender-sensitive source language a gender-disambiguation directive is
/// prepended; a non-empty custom style is appended.
pub fn compose(
    detected_language: &str,
    custom_style: Option<&str>,
    config: &TranslatorConfig,
) -> InstructionSet {
    let mut directives = vec![
        CONSISTENCY_DIRECTIVE.to_string(),
        DIALOGUE_DIRECTIVE.to_string(),
        IDIOM_DIRECTIVE.to_string(),
        FORMATTING_DIRECTIVE.to_string(),
    ];

    if config.is_gender_sensitive(detected_language) {
        directives.insert(0, GENDER_DIRECTIVE.to_string());
    }

    if let Some(style) = custom_style {
        let style = style.trim();
        if !style.is_empty() {
            directives.push(style_directive(style));
        }
    }

    InstructionSet { directives }
}
