//! Mention extraction and canonicalization.
//!
//! A mention is `@` followed by one or more of `[A-Za-z0-9._-]`, matched
//! greedily and non-overlapping, left to right. One scan over the text
//! resolves every mention against the account directory, rewrites resolved
//! handles to their canonical casing, and records the first duplicate and
//! the first unresolved handle so the orchestrator can reject in its fixed
//! order without re-running the scan. Ordinary text is never altered.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::directory::{DirectoryError, UsernameDirectory};

/// The mention token grammar, shared with the display tokenizer.
pub(crate) static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[A-Za-z0-9._-]+").expect("mention pattern compiles"));

/// Result of one canonicalization scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionScan {
    /// Input text with every resolved `@handle` rewritten to canonical
    /// casing; unresolved handles pass through unchanged.
    pub text: String,
    /// Resolved canonical usernames, de-duplicated, in first-occurrence
    /// order.
    pub mentions: Vec<String>,
    /// First handle mentioned more than once (case-insensitive on the
    /// canonical name), if any.
    pub duplicate: Option<String>,
    /// First handle the directory does not know, if any.
    pub unresolved: Option<String>,
}

/// Scans `text` for mentions and canonicalizes them against `directory`.
///
/// Duplicate detection keys on the case-folded canonical name, so
/// `@HoldenBourg` followed by `@holdenbourg` is a duplicate even though
/// the raw spellings differ. Unresolved handles key on their own folded
/// spelling, so repeating a nonexistent handle still reports as a
/// duplicate rather than as two unknown mentions.
pub fn canonicalize_mentions<D: UsernameDirectory + ?Sized>(
    text: &str,
    directory: &D,
) -> Result<MentionScan, DirectoryError> {
    let mut out = String::with_capacity(text.len());
    let mut seen: Vec<String> = Vec::new();
    let mut mentions = Vec::new();
    let mut duplicate = None;
    let mut unresolved = None;
    let mut last = 0;

    for m in MENTION_RE.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let handle = &text[m.start() + 1..m.end()];

        let resolved = directory.resolve_canonical(handle)?;
        let display = match &resolved {
            Some(canonical) => canonical.clone(),
            None => handle.to_string(),
        };

        let key = display.to_lowercase();
        if seen.contains(&key) {
            if duplicate.is_none() {
                duplicate = Some(display.clone());
            }
        } else {
            seen.push(key);
            if resolved.is_some() {
                mentions.push(display.clone());
            } else if unresolved.is_none() {
                unresolved = Some(display.clone());
            }
        }

        out.push('@');
        out.push_str(&display);
        last = m.end();
    }
    out.push_str(&text[last..]);

    Ok(MentionScan {
        text: out,
        mentions,
        duplicate,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn directory() -> StaticDirectory {
        StaticDirectory::with_users(["HoldenBourg", "CalebHaralson", "Lukas_Gocke"])
    }

    #[test]
    fn rewrites_resolved_handles_to_canonical_casing() {
        let scan = canonicalize_mentions("hey @holdenbourg, nice review", &directory()).unwrap();
        assert_eq!(scan.text, "hey @HoldenBourg, nice review");
        assert_eq!(scan.mentions, vec!["HoldenBourg"]);
        assert_eq!(scan.duplicate, None);
        assert_eq!(scan.unresolved, None);
    }

    #[test]
    fn ordinary_text_is_never_altered() {
        let scan = canonicalize_mentions("No Mentions Here.", &directory()).unwrap();
        assert_eq!(scan.text, "No Mentions Here.");
        assert!(scan.mentions.is_empty());
    }

    #[test]
    fn unresolved_handles_pass_through_unchanged() {
        let scan = canonicalize_mentions("cc @Ghost99", &directory()).unwrap();
        assert_eq!(scan.text, "cc @Ghost99");
        assert!(scan.mentions.is_empty());
        assert_eq!(scan.unresolved, Some("Ghost99".to_string()));
    }

    #[test]
    fn duplicates_are_detected_across_casings() {
        let scan =
            canonicalize_mentions("@HoldenBourg agreed, @holdenbourg knows", &directory()).unwrap();
        assert_eq!(scan.duplicate, Some("HoldenBourg".to_string()));
        assert_eq!(scan.mentions, vec!["HoldenBourg"]);
    }

    #[test]
    fn repeated_unresolved_handles_count_as_duplicates() {
        let scan = canonicalize_mentions("@ghost and @Ghost", &directory()).unwrap();
        assert_eq!(scan.duplicate, Some("Ghost".to_string()));
        assert_eq!(scan.unresolved, Some("ghost".to_string()));
    }

    #[test]
    fn mention_grammar_accepts_dots_underscores_and_dashes() {
        let scan = canonicalize_mentions("ping @lukas_gocke", &directory()).unwrap();
        assert_eq!(scan.text, "ping @Lukas_Gocke");
        assert_eq!(scan.mentions, vec!["Lukas_Gocke"]);
    }

    #[test]
    fn bare_at_sign_is_not_a_mention() {
        let scan = canonicalize_mentions("3 @ 5pm? @ yes", &directory()).unwrap();
        assert_eq!(scan.text, "3 @ 5pm? @ yes");
        assert!(scan.mentions.is_empty());
    }

    #[test]
    fn multiple_distinct_mentions_keep_first_occurrence_order() {
        let scan =
            canonicalize_mentions("@calebharalson then @HOLDENBOURG", &directory()).unwrap();
        assert_eq!(scan.mentions, vec!["CalebHaralson", "HoldenBourg"]);
        assert_eq!(scan.text, "@CalebHaralson then @HoldenBourg");
    }
}
