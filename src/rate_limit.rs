//! Per-author submission cooldown.
//!
//! The store holds one timestamp per author: the moment of their last
//! *accepted* submission. The orchestrator reads it early enough to
//! short-circuit, but writes it only after every other check has passed,
//! so a rejection never consumes the author's cooldown slot.
//!
//! Concurrent submissions by different authors need no coordination;
//! near-simultaneous submissions by the *same* author must be serialized
//! by the caller or by the backing store's compare-and-set.

use std::collections::HashMap;

use thiserror::Error;

/// Milliseconds since an arbitrary epoch. Supplied by the caller per
/// submission so the pipeline never reads an ambient clock.
pub type TimestampMs = u64;

/// Minimum interval between two accepted submissions by one author.
pub const MIN_INTERVAL_MS: TimestampMs = 2000;

/// Submitted before the cooldown elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("submitted {elapsed_ms}ms after the last accepted submission, minimum is 2000ms")]
pub struct RateLimitError {
    pub elapsed_ms: TimestampMs,
}

/// Durable per-author "last accepted at" storage.
pub trait RateLimitStore {
    fn get(&self, author: &str) -> Option<TimestampMs>;
    fn set(&mut self, author: &str, at: TimestampMs);
}

/// Read-only cooldown check. The matching `set` is the orchestrator's
/// final step on the acceptance path, not part of this call.
pub fn check<S: RateLimitStore + ?Sized>(
    store: &S,
    author: &str,
    now: TimestampMs,
) -> Result<(), RateLimitError> {
    match store.get(author) {
        Some(last) => {
            let elapsed_ms = now.saturating_sub(last);
            if elapsed_ms < MIN_INTERVAL_MS {
                Err(RateLimitError { elapsed_ms })
            } else {
                Ok(())
            }
        }
        None => Ok(()),
    }
}

/// HashMap-backed [`RateLimitStore`] for tests and single-process callers.
#[derive(Debug, Clone, Default)]
pub struct MemoryRateLimitStore {
    last_accepted: HashMap<String, TimestampMs>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    fn get(&self, author: &str) -> Option<TimestampMs> {
        self.last_accepted.get(author).copied()
    }

    fn set(&mut self, author: &str, at: TimestampMs) {
        self.last_accepted.insert(author.to_string(), at);
    }
}
