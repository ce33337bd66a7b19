//! Denylist matching over normalized text.
//!
//! Two complementary checks, either of which rejects: a fixed set of
//! denied terms tested as direct substrings, and stretch-tolerant
//! patterns in which every letter of a denied word may repeat. The
//! normalizer handles symbol substitution and separator stripping; the
//! patterns handle letter-stretching that survives the normalizer's
//! two-letter run cap. Both run on the output of
//! [`crate::normalize::normalize_for_denylist`], never on raw text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Terms rejected as direct substrings of the normalized text.
const DENIED_TERMS: &[&str] = &[
    "nigger",
    "nigga",
    "faggot",
    "cunt",
    "kike",
    "wetback",
    "beaner",
    "tranny",
    "dyke",
    "cocksucker",
    "whore",
    "slut",
    "retard",
];

/// Words also matched with every letter allowed to repeat, catching
/// stretches like `niiiggggeeerrr` that the run cap leaves partially
/// intact.
const STRETCH_WORDS: &[&str] = &[
    "nigger", "nigga", "faggot", "cunt", "kike", "whore", "slut", "retard",
];

static STRETCH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    STRETCH_WORDS
        .iter()
        .map(|word| {
            let body: String = word.chars().map(|c| format!("{c}+")).collect();
            Regex::new(&format!("(?i){body}")).expect("stretch pattern compiles")
        })
        .collect()
});

/// Returns true when `normalized` contains denied content.
///
/// `normalized` must already have been passed through
/// [`crate::normalize::normalize_for_denylist`].
pub fn contains_denied_content(normalized: &str) -> bool {
    if DENIED_TERMS.iter().any(|term| normalized.contains(term)) {
        return true;
    }
    STRETCH_PATTERNS.iter().any(|p| p.is_match(normalized))
}
