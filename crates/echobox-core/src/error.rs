// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Echobox feedback bot.

use thiserror::Error;

/// Classifies store failures so callers can react differently to
/// connectivity problems, credential problems, and malformed payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// Network failure, timeout, or a transient (429/5xx) API response.
    Connectivity,
    /// The store rejected our credentials (401/403).
    Auth,
    /// The store answered, but the payload did not have the expected shape.
    DataShape,
}

impl std::fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorKind::Connectivity => write!(f, "connectivity"),
            StoreErrorKind::Auth => write!(f, "auth"),
            StoreErrorKind::DataShape => write!(f, "data-shape"),
        }
    }
}

/// The primary error type used across all Echobox traits and core operations.
#[derive(Debug, Error)]
pub enum EchoboxError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote tabular store errors, classified by [`StoreErrorKind`].
    #[error("store error ({kind}): {message}")]
    Store {
        kind: StoreErrorKind,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Channel errors (message delivery, malformed updates).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Contract violation: submit was called with an incomplete draft.
    ///
    /// Unreachable through the public state-machine path; surfaced loudly
    /// instead of persisting partial data.
    #[error("incomplete draft: missing {missing}")]
    IncompleteDraft { missing: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EchoboxError {
    /// Shorthand for a store error without an underlying source.
    pub fn store(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        EchoboxError::Store {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Returns the store error kind, if this is a store error.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            EchoboxError::Store { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_kind() {
        let err = EchoboxError::store(StoreErrorKind::Auth, "token rejected");
        assert_eq!(err.to_string(), "store error (auth): token rejected");
        assert_eq!(err.store_kind(), Some(StoreErrorKind::Auth));
    }

    #[test]
    fn non_store_errors_have_no_kind() {
        let err = EchoboxError::Config("bad".into());
        assert!(err.store_kind().is_none());
    }

    #[test]
    fn incomplete_draft_names_missing_fields() {
        let err = EchoboxError::IncompleteDraft {
            missing: "rating, comment".into(),
        };
        assert_eq!(err.to_string(), "incomplete draft: missing rating, comment");
    }
}
