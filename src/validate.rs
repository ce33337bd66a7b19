//! The validation orchestrator: one ordered pass from raw text to a
//! publish/reject decision.
//!
//! Checks run in a fixed order and the first failure wins; its message is
//! the one shown to the user and nothing after it executes. The only
//! durable side effect is the cooldown timestamp write, which happens
//! exactly once, on the acceptance path, after every check has passed.
//! A rejection never burns the author's cooldown slot.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::denylist::contains_denied_content;
use crate::directory::{DirectoryError, UsernameDirectory};
use crate::mentions::canonicalize_mentions;
use crate::normalize::normalize_for_denylist;
use crate::rate_limit::{self, RateLimitError, RateLimitStore, TimestampMs};

/// Shortest publishable comment, in grapheme clusters of the trimmed text.
pub const MIN_LENGTH: usize = 2;
/// Longest publishable comment, in grapheme clusters of the trimmed text.
pub const MAX_LENGTH: usize = 150;
/// A single character repeated this many times consecutively is spam.
pub const MAX_CHAR_RUN: usize = 10;
/// Maximum number of `http(s)://` links per comment.
pub const MAX_LINKS: usize = 2;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://").expect("link pattern compiles"));

/// What kind of submission is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    Comment,
    Reply,
}

/// One comment currently visible on the post, as the caller last saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingComment {
    pub id: String,
    pub author_username: String,
    pub text: String,
}

/// Immutable per-call input. Built fresh by the caller for every
/// submission attempt; `now` is injected rather than read from a clock so
/// runs are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub post_id: String,
    pub author_username: String,
    pub kind: CommentKind,
    /// Required when `kind` is [`CommentKind::Reply`].
    pub parent_comment_id: Option<String>,
    /// Informational only; never validated.
    pub parent_author_username: Option<String>,
    /// Snapshot used solely to confirm a reply's parent still exists.
    pub existing: Vec<ExistingComment>,
    pub now: TimestampMs,
}

/// Why a submission was rejected. The `Display` string is the exact
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectReason {
    #[error("Comment cannot be empty")]
    Empty,
    #[error("Comment must be between {min} and {max} characters (currently {actual})")]
    Length {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("Comment contains invalid characters")]
    ControlCharacters,
    #[error("Comment contains too many repeated characters")]
    RepeatedCharacters,
    #[error("Comment cannot contain more than 2 links")]
    TooManyLinks,
    #[error("You cannot @ the same user twice")]
    DuplicateMention(String),
    #[error("@{0} does not exist")]
    UnknownMention(String),
    #[error("Could not verify mentions right now, please try again")]
    DirectoryUnavailable,
    #[error("Please remove profanity before posting")]
    Profanity,
    #[error("Please wait a moment before commenting again")]
    RateLimited,
    #[error("Missing reply target")]
    MissingReplyTarget,
    #[error("Reply target no longer exists")]
    StaleReplyTarget,
}

impl RejectReason {
    /// Only the directory-unreachable rejection is worth retrying with the
    /// same input; every other reason is definitive until the user edits
    /// the text or the context changes.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RejectReason::DirectoryUnavailable)
    }
}

impl From<DirectoryError> for RejectReason {
    fn from(_: DirectoryError) -> Self {
        RejectReason::DirectoryUnavailable
    }
}

impl From<RateLimitError> for RejectReason {
    fn from(_: RateLimitError) -> Self {
        RejectReason::RateLimited
    }
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    /// Publishable. `text` is the canonicalized, control-character-free,
    /// trimmed string to persist; `mentions` the de-duplicated canonical
    /// usernames it references, in first-occurrence order.
    Accepted { text: String, mentions: Vec<String> },
    /// Not publishable; `reason` renders the single user-facing message.
    Rejected { reason: RejectReason },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted { .. })
    }
}

/// The orchestrator. Owns its two collaborators; callers invoking
/// `validate` concurrently for the same author must serialize those calls
/// themselves.
#[derive(Debug)]
pub struct CommentPipeline<D, S> {
    directory: D,
    store: S,
}

impl<D: UsernameDirectory, S: RateLimitStore> CommentPipeline<D, S> {
    pub fn new(directory: D, store: S) -> Self {
        Self { directory, store }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decides whether `raw` may be published under `ctx`.
    pub fn validate(&mut self, raw: &str, ctx: &ValidationContext) -> ValidationResult {
        match self.run(raw, ctx) {
            Ok((text, mentions)) => ValidationResult::Accepted { text, mentions },
            Err(reason) => ValidationResult::Rejected { reason },
        }
    }

    fn run(
        &mut self,
        raw: &str,
        ctx: &ValidationContext,
    ) -> Result<(String, Vec<String>), RejectReason> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RejectReason::Empty);
        }

        // Length is counted on the pre-canonicalization text, in grapheme
        // clusters, so emoji count as one character.
        let actual = trimmed.graphemes(true).count();
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&actual) {
            return Err(RejectReason::Length {
                min: MIN_LENGTH,
                max: MAX_LENGTH,
                actual,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(RejectReason::ControlCharacters);
        }
        if longest_char_run(trimmed) >= MAX_CHAR_RUN {
            return Err(RejectReason::RepeatedCharacters);
        }
        if LINK_RE.find_iter(trimmed).count() > MAX_LINKS {
            return Err(RejectReason::TooManyLinks);
        }

        let scan = canonicalize_mentions(trimmed, &self.directory)?;
        if let Some(name) = scan.duplicate {
            return Err(RejectReason::DuplicateMention(name));
        }
        if let Some(handle) = scan.unresolved {
            return Err(RejectReason::UnknownMention(handle));
        }

        if contains_denied_content(&normalize_for_denylist(&scan.text)) {
            return Err(RejectReason::Profanity);
        }

        rate_limit::check(&self.store, &ctx.author_username, ctx.now)?;
        validate_reply_target(ctx)?;

        // Every check passed: this is the pipeline's only durable write.
        self.store.set(&ctx.author_username, ctx.now);

        // The control-character rejection above is authoritative; this
        // strip is a no-op kept as a second line of defense.
        let text = scan.text.chars().filter(|c| !c.is_control()).collect();
        Ok((text, scan.mentions))
    }
}

/// Length of the longest run of one character repeated consecutively.
fn longest_char_run(s: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for c in s.chars() {
        current = if previous == Some(c) { current + 1 } else { 1 };
        longest = longest.max(current);
        previous = Some(c);
    }
    longest
}

/// A reply must still have its parent in the caller's snapshot; plain
/// comments skip this unconditionally. A missing or stale parent is a
/// normal rejection, not a defect, because caller state can legitimately
/// go stale between render and submission.
fn validate_reply_target(ctx: &ValidationContext) -> Result<(), RejectReason> {
    if ctx.kind != CommentKind::Reply {
        return Ok(());
    }
    let parent_id = ctx
        .parent_comment_id
        .as_deref()
        .ok_or(RejectReason::MissingReplyTarget)?;
    if ctx.existing.iter().any(|c| c.id == parent_id) {
        Ok(())
    } else {
        Err(RejectReason::StaleReplyTarget)
    }
}
