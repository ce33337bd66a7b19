//! Reelgate: the moderation gate for Reel comments and replies.
//!
//! Every piece of user-submitted short text passes through one ordered
//! pipeline before it may be published: structural checks, mention
//! canonicalization against the account directory, denylist matching over
//! normalized text, a per-author cooldown, and (for replies) a check that
//! the parent comment still exists. The first failing check wins and its
//! message is the one shown to the user; the only durable side effect is
//! the cooldown timestamp write, and it happens only on acceptance.
//!
//! ```rust
//! use reelgate::{
//!     CommentKind, CommentPipeline, MemoryRateLimitStore, StaticDirectory,
//!     ValidationContext, ValidationResult,
//! };
//!
//! let directory = StaticDirectory::with_users(["HoldenBourg"]);
//! let mut pipeline = CommentPipeline::new(directory, MemoryRateLimitStore::new());
//!
//! let ctx = ValidationContext {
//!     post_id: "p-1".into(),
//!     author_username: "CalebHaralson".into(),
//!     kind: CommentKind::Comment,
//!     parent_comment_id: None,
//!     parent_author_username: None,
//!     existing: vec![],
//!     now: 0,
//! };
//!
//! match pipeline.validate("Loved this one, @holdenbourg!", &ctx) {
//!     ValidationResult::Accepted { text, mentions } => {
//!         assert_eq!(text, "Loved this one, @HoldenBourg!");
//!         assert_eq!(mentions, vec!["HoldenBourg"]);
//!     }
//!     ValidationResult::Rejected { reason } => panic!("rejected: {reason}"),
//! }
//! ```

pub use crate::directory::{DirectoryError, StaticDirectory, UsernameDirectory};
pub use crate::rate_limit::{MemoryRateLimitStore, RateLimitStore, TimestampMs, MIN_INTERVAL_MS};
pub use crate::tokenize::{tokenize, MentionToken};
pub use crate::validate::{
    CommentKind, CommentPipeline, ExistingComment, RejectReason, ValidationContext,
    ValidationResult,
};

pub mod denylist;
pub mod directory;
pub mod mentions;
pub mod normalize;
pub mod rate_limit;
pub mod tokenize;
pub mod validate;
