//! Sub-score calculators
//!
//! Four independent scorers. Each starts from [`BASE_SCORE`], records every
//! adjustment it applies as a [`Factor`], and clamps the sum once at the end.
//!
//! Keyword rules award their bonus at most once per calculator, for the first
//! keyword that matches.

use crate::app::lexical::alternation_ratio;
use crate::app::scoring_config::*;
use crate::domain::entities::{
    Dimension, DomainName, Factor, FeatureSet, MarketContext, SubScore, TRENDING_FACTOR,
};

/// Length, charset, vowel balance and keyword appeal of the label.
pub fn brandability(label: &str, features: &FeatureSet, lexicon: &Lexicon) -> SubScore {
    let mut factors = Vec::new();

    // Length bands do not stack
    if IDEAL_LENGTH.contains(&features.length) {
        factors.push(Factor::new("ideal_length", BRAND_IDEAL_LENGTH));
    } else if ACCEPTABLE_LENGTH.contains(&features.length) {
        factors.push(Factor::new("acceptable_length", BRAND_ACCEPTABLE_LENGTH));
    }
    if features.length > TOO_LONG_THRESHOLD {
        factors.push(Factor::new("too_long", BRAND_TOO_LONG));
    }

    if BALANCED_VOWEL_RATIO.contains(&features.vowel_ratio) {
        factors.push(Factor::new("balanced_vowels", BRAND_BALANCED_VOWELS));
    }

    if features.has_digit_or_hyphen {
        factors.push(Factor::new("digit_or_hyphen", BRAND_DIGIT_OR_HYPHEN));
    } else {
        factors.push(Factor::new("letters_only", BRAND_CLEAN_CHARSET));
    }

    if let Some(keyword) = lexicon.premium_match(label) {
        factors.push(Factor::new(
            format!("premium_keyword({})", keyword),
            BRAND_PREMIUM_KEYWORD,
        ));
    }

    if lexicon.is_common_word(label) {
        factors.push(Factor::new("common_word", BRAND_COMMON_WORD));
    }

    SubScore::from_factors(Dimension::Brandability, BASE_SCORE, factors)
}

/// How easily the label sticks: brevity, patterns, real words.
pub fn memorability(label: &str, features: &FeatureSet, lexicon: &Lexicon) -> SubScore {
    let mut factors = Vec::new();

    if features.length <= SHORT_LABEL_MAX {
        factors.push(Factor::new("short", MEMO_SHORT));
    } else if features.length <= MEDIUM_LABEL_MAX {
        factors.push(Factor::new("medium_length", MEMO_MEDIUM));
    }

    if features.has_repeated_char_pattern {
        factors.push(Factor::new("repetition_or_rhyme", MEMO_PATTERN));
    }

    if lexicon.is_dictionary_word(label) {
        factors.push(Factor::new("dictionary_word", MEMO_DICTIONARY_WORD));
    }

    if let Some(letter) = label.chars().find(|c| HARD_LETTERS.contains(c)) {
        factors.push(Factor::new(
            format!("hard_letter({})", letter),
            MEMO_HARD_LETTERS,
        ));
    }

    SubScore::from_factors(Dimension::Memorability, BASE_SCORE, factors)
}

/// Pronounceability and legibility of the label.
pub fn linguistic(label: &str, features: &FeatureSet, lexicon: &Lexicon) -> SubScore {
    let mut factors = Vec::new();

    if alternation_ratio(label) >= ALTERNATION_THRESHOLD {
        factors.push(Factor::new("consonant_vowel_flow", LING_ALTERNATION));
    }

    if !features.contains_ambiguous_chars {
        factors.push(Factor::new("unambiguous_chars", LING_UNAMBIGUOUS));
    }

    if features.starts_with_consonant {
        factors.push(Factor::new("consonant_start", LING_CONSONANT_START));
    }

    if let Some(affix) = lexicon.affix_match(label) {
        factors.push(Factor::new(format!("known_affix({})", affix), LING_AFFIX));
    }

    SubScore::from_factors(Dimension::Linguistic, BASE_SCORE, factors)
}

/// TLD premium and keyword demand from the current market context.
pub fn market(domain: &DomainName, context: &MarketContext) -> SubScore {
    let mut factors = Vec::new();
    let label = domain.label();

    match context.tld_premium(domain.tld()) {
        Some(premium) => factors.push(Factor::new(
            format!("tld_premium({})", domain.tld()),
            premium,
        )),
        None => factors.push(Factor::new("unknown_tld", UNKNOWN_TLD_PREMIUM)),
    }

    if let Some(term) = context
        .trending_keywords
        .iter()
        .find(|k| label.contains(k.as_str()))
    {
        factors.push(Factor::new(
            format!("{}({})", TRENDING_FACTOR, term),
            MARKET_TRENDING,
        ));
    }

    if let Some(term) = context
        .commercial_keywords
        .iter()
        .find(|k| label.contains(k.as_str()))
    {
        factors.push(Factor::new(
            format!("commercial_term({})", term),
            MARKET_COMMERCIAL,
        ));
    }

    SubScore::from_factors(Dimension::Market, BASE_SCORE, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::lexical::{extract_features, parse_domain};
    use crate::test_utils::test_context;

    fn factor_names(score: &SubScore) -> Vec<&str> {
        score
            .contributing_factors
            .iter()
            .map(|f| f.factor.as_str())
            .collect()
    }

    fn brand(label: &str) -> SubScore {
        brandability(label, &extract_features(label), &Lexicon::default())
    }

    fn memo(label: &str) -> SubScore {
        memorability(label, &extract_features(label), &Lexicon::default())
    }

    fn ling(label: &str) -> SubScore {
        linguistic(label, &extract_features(label), &Lexicon::default())
    }

    // ==========================================================================
    // Brandability
    // ==========================================================================

    #[test]
    fn brandability_crypto_clamps_to_100() {
        // 50 +20 ideal length +15 letters only +20 premium = 105; "y" is no vowel,
        // so 1/6 misses the balanced vowel band
        let score = brand("crypto");
        assert_eq!(score.value, 100);
        assert_eq!(
            factor_names(&score),
            vec!["ideal_length", "letters_only", "premium_keyword(crypto)"]
        );
    }

    /// The scoring notes quote "the" at 45, which leaves out the vowel and
    /// charset bonuses the rules award. The rules win: 75.
    #[test]
    fn brandability_common_word_penalty() {
        // 50 +10 acceptable length +15 vowels (1/3) +15 letters only -15 common = 75
        let score = brand("the");
        assert_eq!(score.value, 75);
        assert!(score.has_factor("common_word"));
        assert!(score.has_factor("acceptable_length"));
        assert!(!score.has_factor("ideal_length"));
    }

    #[test]
    fn brandability_length_bands_do_not_stack() {
        let score = brand("brand");
        let length_factors = score
            .contributing_factors
            .iter()
            .filter(|f| f.factor.ends_with("length"))
            .count();
        assert_eq!(length_factors, 1);
    }

    #[test]
    fn brandability_penalizes_long_hyphenated_labels() {
        // 17 characters, 7 vowels: no length bonus, -20 too long, +15 vowels, -10 hyphen
        let label = "best-sneaker-deal";
        let score = brand(label);
        assert_eq!(
            factor_names(&score),
            vec!["too_long", "balanced_vowels", "digit_or_hyphen"]
        );
        assert_eq!(score.value, 35);
    }

    #[test]
    fn brandability_premium_bonus_applies_once() {
        // crypto, coin and ai are all premium keywords
        let score = brand("cryptocoinai");
        let premium = score
            .contributing_factors
            .iter()
            .filter(|f| f.factor.starts_with("premium_keyword"))
            .count();
        assert_eq!(premium, 1);
        assert!(score.has_factor("premium_keyword(crypto)"));
    }

    #[test]
    fn brandability_uses_injected_lexicon() {
        let mut lexicon = Lexicon::empty();
        lexicon.common_words.insert("x-1".to_string());
        let score = brandability("x-1", &extract_features("x-1"), &lexicon);
        // 50 +10 acceptable -10 hyphen -15 common; vowel ratio 0 gives nothing
        assert_eq!(score.value, 35);

        let label = "q".repeat(20);
        let score = brandability(&label, &extract_features(&label), &Lexicon::empty());
        // 50 -20 too long +15 letters only
        assert_eq!(score.value, 45);
    }

    // ==========================================================================
    // Memorability
    // ==========================================================================

    #[test]
    fn memorability_short_dictionary_word() {
        // 50 +25 short +20 dictionary
        let score = memo("tiger");
        assert_eq!(score.value, 95);
        assert_eq!(factor_names(&score), vec!["short", "dictionary_word"]);
    }

    #[test]
    fn memorability_rhyme_and_repeat() {
        // 50 +25 short +15 pattern
        assert_eq!(memo("yoyo").value, 90);
        // 50 +10 medium +15 pattern (adjacent "oo")
        assert_eq!(memo("bookmark").value, 75);
    }

    #[test]
    fn memorability_hard_letters_penalized_once() {
        // 50 +25 short -5 (q, x and z all present)
        let score = memo("qxz");
        assert_eq!(score.value, 70);
        assert_eq!(
            score
                .contributing_factors
                .iter()
                .filter(|f| f.factor.starts_with("hard_letter"))
                .count(),
            1
        );
    }

    #[test]
    fn memorability_long_label_gets_no_length_bonus() {
        let score = memo("extraordinarily");
        assert!(!score.has_factor("short"));
        assert!(!score.has_factor("medium_length"));
    }

    // ==========================================================================
    // Linguistic
    // ==========================================================================

    #[test]
    fn linguistic_full_marks() {
        // banana: alternation 1.0, no ambiguous chars, consonant start, no affix
        let score = ling("banana");
        assert_eq!(score.value, 90);
        assert_eq!(
            factor_names(&score),
            vec!["consonant_vowel_flow", "unambiguous_chars", "consonant_start"]
        );
    }

    #[test]
    fn linguistic_affix_bonus() {
        // getpaid: g-e, e-t, p-a, i-d switch -> 4/6 alternation
        // contains 'i' (ambiguous), consonant start, prefix "get"
        let score = ling("getpaid");
        assert_eq!(score.value, 95);
        assert!(score.has_factor("known_affix(get)"));
        assert!(!score.has_factor("unambiguous_chars"));
    }

    #[test]
    fn linguistic_numeric_label() {
        // no alternation, contains 0/1, digit start, no affix
        let score = ling("2010");
        assert_eq!(score.value, 50);
        assert!(score.contributing_factors.is_empty());
    }

    // ==========================================================================
    // Market
    // ==========================================================================

    #[test]
    fn market_uses_tld_premium_and_keyword_terms() {
        let context = test_context();
        let domain = parse_domain("aishop.com").unwrap();
        let score = market(&domain, &context);
        // 50 +20 .com +20 trending "ai" +15 commercial "shop"
        assert_eq!(score.value, 100);
        assert_eq!(
            factor_names(&score),
            vec!["tld_premium(.com)", "trending_term(ai)", "commercial_term(shop)"]
        );
    }

    #[test]
    fn market_unknown_tld_defaults_to_plus_five() {
        let context = test_context();
        let domain = parse_domain("garden.zzz").unwrap();
        let score = market(&domain, &context);
        assert_eq!(score.value, 55);
        assert_eq!(factor_names(&score), vec!["unknown_tld"]);
    }

    #[test]
    fn market_negative_premium_is_recorded() {
        let mut context = test_context();
        context.tld_premiums.insert(".biz".to_string(), -60);
        let domain = parse_domain("garden.biz").unwrap();
        let score = market(&domain, &context);
        assert_eq!(score.value, 0);
        assert_eq!(score.contributing_factors[0].delta, -60);
    }

    #[test]
    fn market_does_not_mutate_context() {
        let context = test_context();
        let before = context.clone();
        let domain = parse_domain("cryptoshop.io").unwrap();
        let _ = market(&domain, &context);
        assert_eq!(context, before);
    }

    #[test]
    fn every_sub_score_stays_in_range() {
        let context = test_context();
        let lexicon = Lexicon::default();
        for raw in [
            "a.com",
            "the.com",
            "crypto.ai",
            "x.y",
            "0-0-0-0-0-0-0-0-0-0.net",
            "supercalifragilisticexpialidocious.org",
            "qqqqqqqqqqqqqqqqqqqqqqqq.zzz",
        ] {
            let domain = parse_domain(raw).unwrap();
            let features = extract_features(domain.label());
            for score in [
                brandability(domain.label(), &features, &lexicon),
                memorability(domain.label(), &features, &lexicon),
                linguistic(domain.label(), &features, &lexicon),
                market(&domain, &context),
            ] {
                assert!(score.value <= 100, "{} out of range for {}", score.value, raw);
            }
        }
    }
}
