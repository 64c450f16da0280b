//! Lexical analyzer
//!
//! Splits a raw domain string into label and TLD and extracts the surface
//! features every calculator works from. Pure and deterministic.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::app::scoring_config::{AMBIGUOUS_CHARS, VOWELS};
use crate::domain::entities::{DomainName, FeatureSet};
use crate::error::ScoringError;

/// Longest label DNS allows
pub const MAX_LABEL_LENGTH: usize = 63;

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("label pattern is valid"))
}

fn tld_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\.[a-z0-9-]+)+$").expect("tld pattern is valid")
    })
}

/// A parsed domain together with its features
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub domain: DomainName,
    pub features: FeatureSet,
}

/// Parse and analyze a raw domain string.
pub fn analyze(raw: &str) -> Result<Analysis, ScoringError> {
    let domain = parse_domain(raw)?;
    let features = extract_features(domain.label());
    Ok(Analysis { domain, features })
}

/// Normalize a raw domain and split it at the first `.`.
///
/// Accepts things users paste, such as `https://www.Crypto.AI/`, and reduces
/// them to `crypto` + `.ai`.
pub fn parse_domain(raw: &str) -> Result<DomainName, ScoringError> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return Err(ScoringError::InvalidDomain(
            "domain is empty".to_string(),
        ));
    }

    let Some(dot) = normalized.find('.') else {
        return Err(ScoringError::InvalidDomain(format!(
            "'{}' has no TLD separator",
            raw.trim()
        )));
    };
    let (label, tld) = normalized.split_at(dot);

    if label.is_empty() {
        return Err(ScoringError::InvalidDomain(format!(
            "'{}' has an empty label",
            raw.trim()
        )));
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err(ScoringError::InvalidDomain(format!(
            "label is {} characters long (max {})",
            label.len(),
            MAX_LABEL_LENGTH
        )));
    }
    if !label_pattern().is_match(label) {
        return Err(ScoringError::InvalidDomain(format!(
            "label '{}' may only contain a-z, 0-9 and '-'",
            label
        )));
    }
    if !tld_pattern().is_match(tld) {
        return Err(ScoringError::InvalidDomain(format!(
            "'{}' is not a valid TLD",
            tld
        )));
    }

    Ok(DomainName::from_parts(label.to_string(), tld.to_string()))
}

fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('.');
    let host = match host.strip_prefix("www.") {
        Some(rest) if rest.contains('.') => rest,
        _ => host,
    };
    host.to_string()
}

pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// A letter that is not a vowel
pub fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Compute the feature set of an already-normalized label.
pub fn extract_features(label: &str) -> FeatureSet {
    let chars: Vec<char> = label.chars().collect();
    let length = chars.len();
    let vowels = chars.iter().filter(|c| is_vowel(**c)).count();
    let vowel_ratio = if length == 0 {
        0.0
    } else {
        vowels as f64 / length as f64
    };

    FeatureSet {
        length,
        vowel_ratio,
        has_digit_or_hyphen: chars.iter().any(|c| c.is_ascii_digit() || *c == '-'),
        has_repeated_char_pattern: has_adjacent_repeat(&chars) || has_rhyme(&chars),
        starts_with_consonant: chars.first().is_some_and(|c| is_consonant(*c)),
        contains_ambiguous_chars: chars.iter().any(|c| AMBIGUOUS_CHARS.contains(c)),
    }
}

fn has_adjacent_repeat(chars: &[char]) -> bool {
    chars.windows(2).any(|w| w[0] == w[1])
}

/// First and last vowel clusters match (`banana`, `yoyo`), needing at
/// least two clusters.
fn has_rhyme(chars: &[char]) -> bool {
    let clusters = vowel_clusters(chars);
    match (clusters.first(), clusters.last()) {
        (Some(first), Some(last)) if clusters.len() >= 2 => first == last,
        _ => false,
    }
}

fn vowel_clusters(chars: &[char]) -> Vec<String> {
    let mut clusters = Vec::new();
    let mut current = String::new();
    for c in chars {
        if is_vowel(*c) {
            current.push(*c);
        } else if !current.is_empty() {
            clusters.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        clusters.push(current);
    }
    clusters
}

/// Share of adjacent character pairs that switch between consonant and
/// vowel. Pairs involving a digit or hyphen never count as a switch.
pub fn alternation_ratio(label: &str) -> f64 {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() < 2 {
        return 0.0;
    }
    let switches = chars
        .windows(2)
        .filter(|w| {
            (is_vowel(w[0]) && is_consonant(w[1])) || (is_consonant(w[0]) && is_vowel(w[1]))
        })
        .count();
    switches as f64 / (chars.len() - 1) as f64
}
