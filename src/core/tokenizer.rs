// src/core/tokenizer.rs
use crate::core::types::Token;
use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s\-./]+").unwrap());

/// Splits free text on runs of whitespace, hyphens, periods and slashes.
/// Empty pieces are dropped; the surface form keeps its punctuation.
pub fn tokenize(text: &str) -> Vec<Token> {
    SEPARATORS
        .split(text)
        .filter(|piece| !piece.is_empty())
        .map(|piece| Token {
            surface: piece.to_string(),
            clean: clean_word(piece),
        })
        .collect()
}

/// Keeps ASCII word characters only (letters, digits, underscore).
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
