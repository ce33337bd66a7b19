//! Character-level normalization used by the denylist matcher.
//!
//! The transform folds common leetspeak and symbol stand-ins back to
//! letters, caps stretched letter runs at two occurrences, and strips the
//! separator characters commonly used to split a slur (`n.i.g.g.e.r`).
//! Output is only ever fed to the denylist matcher; it is never persisted
//! or shown to users.

/// Separator characters removed entirely during normalization.
const STRIPPED_SEPARATORS: &[char] = &['.', '_', '-', '*'];

/// Folds one character through the leet/symbol substitution table.
/// Characters with no mapping pass through unchanged.
fn fold_char(c: char) -> char {
    match c {
        '0' | '\u{00B0}' => 'o',          // zero, degree sign
        '1' | '!' | '|' => 'i',
        '3' => 'e',
        '4' | '@' => 'a',
        '5' | '$' => 's',
        '7' => 't',
        '8' => 'b',
        '\u{00AE}' => 'r',                // registered sign
        other => other,
    }
}

/// Normalizes `s` for denylist matching. Pure, total, and idempotent.
///
/// Applies, in one pass per character: lowercasing, the substitution
/// table, removal of whitespace and separator characters, and run
/// collapsing. A run of the same character is capped at two occurrences,
/// so `looooool` shrinks toward a bounded form while legitimate doubled
/// letters ("committee") survive. Runs are measured after separator
/// removal, so `aa.aa` cannot smuggle a four-long run past the cap.
pub fn normalize_for_denylist(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run_char: Option<char> = None;
    let mut run_len = 0usize;

    for c in s.chars().flat_map(char::to_lowercase) {
        let c = fold_char(c);
        if c.is_whitespace() || STRIPPED_SEPARATORS.contains(&c) {
            continue;
        }
        if run_char == Some(c) {
            run_len += 1;
            if run_len > 2 {
                continue;
            }
        } else {
            run_char = Some(c);
            run_len = 1;
        }
        out.push(c);
    }

    out
}
