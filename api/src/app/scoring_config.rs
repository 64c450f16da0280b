//! Scoring configuration
//!
//! Adjustment constants for the four sub-score calculators, and the keyword
//! tables they read. The tables live in an immutable [`Lexicon`] passed into
//! the calculators so tests can swap in fixtures.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Every calculator starts from this score before adjustments
pub const BASE_SCORE: i32 = 50;

// ---------------------------------------------------------------------------
// Brandability
// ---------------------------------------------------------------------------

/// Label lengths that get the full length bonus
pub const IDEAL_LENGTH: RangeInclusive<usize> = 4..=8;

/// Bonus for a label length in [`IDEAL_LENGTH`]
pub const BRAND_IDEAL_LENGTH: i32 = 20;

/// Label lengths that get the reduced bonus (when not ideal)
pub const ACCEPTABLE_LENGTH: RangeInclusive<usize> = 3..=12;

/// Bonus for a label length in [`ACCEPTABLE_LENGTH`] but not [`IDEAL_LENGTH`]
pub const BRAND_ACCEPTABLE_LENGTH: i32 = 10;

/// Labels longer than this are penalized
pub const TOO_LONG_THRESHOLD: usize = 15;

/// Penalty for labels longer than [`TOO_LONG_THRESHOLD`]
pub const BRAND_TOO_LONG: i32 = -20;

/// Vowel ratios that read as pronounceable
pub const BALANCED_VOWEL_RATIO: RangeInclusive<f64> = 0.2..=0.5;

/// Bonus for a vowel ratio in [`BALANCED_VOWEL_RATIO`]
pub const BRAND_BALANCED_VOWELS: i32 = 15;

/// Bonus for a label made only of letters
pub const BRAND_CLEAN_CHARSET: i32 = 15;

/// Penalty for digits or hyphens in the label
pub const BRAND_DIGIT_OR_HYPHEN: i32 = -10;

/// Bonus for containing a premium keyword (applied once)
pub const BRAND_PREMIUM_KEYWORD: i32 = 20;

/// Penalty for a label that is exactly a common word
pub const BRAND_COMMON_WORD: i32 = -15;

// ---------------------------------------------------------------------------
// Memorability
// ---------------------------------------------------------------------------

/// Labels up to this length count as short
pub const SHORT_LABEL_MAX: usize = 6;

/// Bonus for a short label
pub const MEMO_SHORT: i32 = 25;

/// Labels up to this length (and longer than short) count as medium
pub const MEDIUM_LABEL_MAX: usize = 10;

/// Bonus for a medium label
pub const MEMO_MEDIUM: i32 = 10;

/// Bonus for a repeated character or rhyme
pub const MEMO_PATTERN: i32 = 15;

/// Bonus for an exact dictionary word
pub const MEMO_DICTIONARY_WORD: i32 = 20;

/// Letters that are hard to spell out loud
pub const HARD_LETTERS: [char; 3] = ['q', 'x', 'z'];

/// Penalty for containing any of [`HARD_LETTERS`] (applied once)
pub const MEMO_HARD_LETTERS: i32 = -5;

// ---------------------------------------------------------------------------
// Linguistic
// ---------------------------------------------------------------------------

/// Minimum share of adjacent consonant/vowel switches
pub const ALTERNATION_THRESHOLD: f64 = 0.4;

/// Bonus for alternation at or above [`ALTERNATION_THRESHOLD`]
pub const LING_ALTERNATION: i32 = 20;

/// Characters easily confused with one another in print
pub const AMBIGUOUS_CHARS: [char; 5] = ['i', 'l', '1', '0', 'o'];

/// Bonus for a label free of [`AMBIGUOUS_CHARS`]
pub const LING_UNAMBIGUOUS: i32 = 10;

/// Bonus for a label starting with a consonant
pub const LING_CONSONANT_START: i32 = 10;

/// Bonus for a known compounding prefix or suffix (applied once)
pub const LING_AFFIX: i32 = 15;

// ---------------------------------------------------------------------------
// Market
// ---------------------------------------------------------------------------

/// Premium applied when the TLD is not in the market table
pub const UNKNOWN_TLD_PREMIUM: i32 = 5;

/// Bonus for containing a trending term (applied once)
pub const MARKET_TRENDING: i32 = 20;

/// Bonus for containing a commercial term (applied once)
pub const MARKET_COMMERCIAL: i32 = 15;

/// Vowels used by every lexical rule
pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

const PREMIUM_KEYWORDS: &[&str] = &[
    "crypto", "web3", "defi", "nft", "token", "chain", "coin", "dao", "meta", "ai", "bit", "pay",
];

const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "from", "your", "you", "are", "was", "have",
    "not", "but", "all", "any", "can", "our", "out", "get", "has", "its", "who", "why", "how",
    "what", "when", "where", "which", "will", "more", "some", "just", "about", "there",
];

const DICTIONARY_WORDS: &[&str] = &[
    "apple", "bloom", "bolt", "block", "chain", "cloud", "coin", "crypto", "data", "echo",
    "fire", "flux", "forge", "gold", "hub", "lab", "light", "market", "mint", "moon", "nexus",
    "nova", "orbit", "pixel", "pulse", "quest", "river", "rocket", "shop", "spark", "star",
    "stone", "store", "sun", "swift", "tiger", "token", "trade", "vault", "wave", "zen",
];

const PREFIXES: &[&str] = &[
    "get", "my", "go", "try", "super", "smart", "meta", "hyper", "open", "neo", "ultra", "omni",
];

const SUFFIXES: &[&str] = &[
    "ly", "ify", "io", "hub", "lab", "labs", "base", "verse", "able", "ful", "ster", "app",
];

/// Keyword tables for the lexical calculators.
///
/// `premium_keywords` keeps its order: when several match, the first listed
/// one is the factor that gets recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    pub premium_keywords: Vec<String>,
    pub common_words: BTreeSet<String>,
    pub dictionary_words: BTreeSet<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        let list = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        let set = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<BTreeSet<_>>();

        Self {
            premium_keywords: list(PREMIUM_KEYWORDS),
            common_words: set(COMMON_WORDS),
            dictionary_words: set(DICTIONARY_WORDS),
            prefixes: list(PREFIXES),
            suffixes: list(SUFFIXES),
        }
    }
}

impl Lexicon {
    /// An empty lexicon: only the structural rules fire.
    pub fn empty() -> Self {
        Self {
            premium_keywords: Vec::new(),
            common_words: BTreeSet::new(),
            dictionary_words: BTreeSet::new(),
            prefixes: Vec::new(),
            suffixes: Vec::new(),
        }
    }

    /// First premium keyword contained in `label`
    pub fn premium_match(&self, label: &str) -> Option<&str> {
        self.premium_keywords
            .iter()
            .find(|k| label.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn is_common_word(&self, label: &str) -> bool {
        self.common_words.contains(label)
    }

    pub fn is_dictionary_word(&self, label: &str) -> bool {
        self.dictionary_words.contains(label)
    }

    /// First prefix the label starts with, else first suffix it ends with
    pub fn affix_match(&self, label: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|p| label.len() > p.len() && label.starts_with(p.as_str()))
            .or_else(|| {
                self.suffixes
                    .iter()
                    .find(|s| label.len() > s.len() && label.ends_with(s.as_str()))
            })
            .map(String::as_str)
    }
}
