//! The account directory consumed by mention resolution.
//!
//! The pipeline never talks to a concrete backend; it sees only the
//! [`UsernameDirectory`] capability, so the same code runs against a
//! hosted account service in production and [`StaticDirectory`] in tests
//! or single-process deployments.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The directory could not be reached at all.
///
/// Distinct from "no such account" (`Ok(None)`): a caller may retry this
/// one, while a nonexistent account is definitive for the given input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("username directory unavailable: {0}")]
pub struct DirectoryError(pub String);

/// Case-insensitive lookup of account handles.
pub trait UsernameDirectory {
    /// Resolves `handle` to the stored canonical casing, or `Ok(None)` if
    /// no such account exists.
    fn resolve_canonical(&self, handle: &str) -> Result<Option<String>, DirectoryError>;
}

/// In-memory [`UsernameDirectory`] backed by a map from the case-folded
/// handle to its canonical casing.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    by_folded: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from canonical usernames.
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    /// Registers an account under its canonical casing.
    pub fn insert(&mut self, canonical: impl Into<String>) {
        let canonical = canonical.into();
        self.by_folded.insert(canonical.to_lowercase(), canonical);
    }
}

impl UsernameDirectory for StaticDirectory {
    fn resolve_canonical(&self, handle: &str) -> Result<Option<String>, DirectoryError> {
        Ok(self.by_folded.get(&handle.to_lowercase()).cloned())
    }
}
