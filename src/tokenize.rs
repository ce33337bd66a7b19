//! Splitting stored text into literal and mention segments for display.
//!
//! Rendering-side counterpart to the validator's mention grammar. It runs
//! on whatever is already stored, including legacy text that would not
//! pass validation today, so it is pure and never fails. Concatenating the
//! `text` of every token reproduces the input exactly.

use serde::{Deserialize, Serialize};

use crate::mentions::MENTION_RE;

/// One segment of display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MentionToken {
    /// A run of non-mention text.
    Literal { text: String },
    /// An `@handle` occurrence. `text` keeps the leading `@`;
    /// `adjacent_to_previous_mention` is true only when this mention
    /// starts exactly where the previous mention ended, so renderers can
    /// keep back-to-back mentions visually separate.
    Mention {
        text: String,
        handle: String,
        adjacent_to_previous_mention: bool,
    },
}

impl MentionToken {
    /// The exact slice of input this token covers.
    pub fn text(&self) -> &str {
        match self {
            MentionToken::Literal { text } => text,
            MentionToken::Mention { text, .. } => text,
        }
    }
}

/// Splits `text` into literal and mention tokens, left to right.
pub fn tokenize(text: &str) -> Vec<MentionToken> {
    let mut tokens = Vec::new();
    let mut last = 0;
    let mut previous_mention_end = None;

    for m in MENTION_RE.find_iter(text) {
        if m.start() > last {
            tokens.push(MentionToken::Literal {
                text: text[last..m.start()].to_string(),
            });
        }
        tokens.push(MentionToken::Mention {
            text: m.as_str().to_string(),
            handle: text[m.start() + 1..m.end()].to_string(),
            adjacent_to_previous_mention: previous_mention_end == Some(m.start()),
        });
        previous_mention_end = Some(m.end());
        last = m.end();
    }
    if last < text.len() {
        tokens.push(MentionToken::Literal {
            text: text[last..].to_string(),
        });
    }

    tokens
}
