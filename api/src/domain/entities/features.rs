//! Lexical feature set
//!
//! Surface features extracted once per domain label.

use serde::Serialize;

/// Features derived from a label by the Lexical Analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureSet {
    /// Number of characters in the label
    pub length: usize,
    /// Share of `[aeiou]` among all label characters (0.0 for an empty label)
    pub vowel_ratio: f64,
    pub has_digit_or_hyphen: bool,
    /// Adjacent repeated character, or first and last vowel cluster rhyme
    pub has_repeated_char_pattern: bool,
    pub starts_with_consonant: bool,
    /// Any of the visually confusable characters `i`, `l`, `1`, `0`, `o`
    pub contains_ambiguous_chars: bool,
}
