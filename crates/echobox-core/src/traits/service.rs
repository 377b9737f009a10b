// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain-level feedback service trait, combining write and read paths.

use async_trait::async_trait;

use crate::error::EchoboxError;
use crate::types::{FeedbackDraft, RecordRef, StatisticsSnapshot, UserIdentity};

/// Single domain-level interface over the store: submit a completed draft,
/// read aggregate statistics.
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Validates draft completeness and persists it as one record.
    ///
    /// An incomplete draft is a contract violation
    /// ([`EchoboxError::IncompleteDraft`]); the state machine's guards make
    /// it unreachable through the public event path.
    async fn submit(
        &self,
        user: &UserIdentity,
        draft: FeedbackDraft,
    ) -> Result<RecordRef, EchoboxError>;

    /// Returns the statistics snapshot, recomputing when `force_refresh`
    /// is set or the cached snapshot has expired.
    ///
    /// Read-only and best-effort: an unreadable store yields the zeroed
    /// default snapshot instead of an error.
    async fn statistics(&self, force_refresh: bool) -> StatisticsSnapshot;
}
