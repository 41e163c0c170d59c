//! Helpers for turning a token stream into completion words.

use crate::segmenter::Token;

/// Token texts to index for completion, in input order.
///
/// Whitespace tokens are always dropped; single punctuation tokens are
/// dropped unless `keep_punctuation` is set.
pub fn completion_words(tokens: &[Token], keep_punctuation: bool) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !t.is_whitespace())
        .filter(|t| keep_punctuation || !t.is_punctuation())
        .map(|t| t.text.clone())
        .collect()
}

/// True for words made only of full-width Latin letters (`ａ-ｚ`, `Ａ-Ｚ`).
///
/// Such words come from IME half-states and are never suggested. The empty
/// string is ignored as well.
pub fn should_ignore(word: &str) -> bool {
    word.chars()
        .all(|c| matches!(c, '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}'))
}

/// True once `word` is long enough, in scalars, to trigger completion.
pub fn meets_trigger(word: &str, threshold: usize) -> bool {
    word.chars().count() >= threshold
}
