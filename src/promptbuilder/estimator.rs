//! Text statistics for synthesized markdown.
//!
//! Counts are taken over Unicode scalar values, so a multi-byte character counts once.
//! The token figure is a rough heuristic: `ceil(characters / 4)`.

use serde::Serialize;

pub fn count_characters(text: &str) -> usize {
    text.chars().count()
}

/// Number of maximal non-whitespace runs.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn estimate_tokens(text: &str) -> usize {
    count_characters(text).div_ceil(4)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub tokens: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: count_characters(text),
            words: count_words(text),
            tokens: estimate_tokens(text),
        }
    }
}
