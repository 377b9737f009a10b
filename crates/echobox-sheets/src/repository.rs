// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The feedback repository: single domain-level interface combining the
//! store client (writes) and the statistics cache (reads).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use echobox_config::model::FeedbackConfig;
use echobox_core::{
    AdminNotifier, EchoboxError, FeedbackDraft, FeedbackRecord, FeedbackService, RecordRef,
    StatisticsSnapshot, StoreClient, UserIdentity, STATUS_NEW,
};

use crate::stats::{self, StatsCache};

/// Length of the comment preview included in admin notifications.
const NOTIFY_PREVIEW_LEN: usize = 100;

/// Combines store writes and cached statistics reads behind
/// [`FeedbackService`].
///
/// Successful writes invalidate the cache so a submission is visible on
/// the very next statistics read. Write failures are returned to the
/// caller without retry (the store client already retries once
/// internally) and leave the cache untouched.
pub struct FeedbackRepository {
    store: Arc<dyn StoreClient>,
    cache: StatsCache,
    notifier: Option<Arc<dyn AdminNotifier>>,
    max_comment_len: usize,
}

impl FeedbackRepository {
    pub fn new(
        store: Arc<dyn StoreClient>,
        config: &FeedbackConfig,
        notifier: Option<Arc<dyn AdminNotifier>>,
    ) -> Self {
        Self {
            store,
            cache: StatsCache::new(Duration::from_secs(config.stats_cache_ttl_secs)),
            notifier,
            max_comment_len: config.max_comment_len,
        }
    }

    fn build_record(
        &self,
        user: &UserIdentity,
        draft: FeedbackDraft,
    ) -> Result<FeedbackRecord, EchoboxError> {
        if !draft.is_complete() {
            let missing = draft.missing_fields().join(", ");
            error!(
                user_id = user.id,
                missing = %missing,
                "submit called with an incomplete draft"
            );
            return Err(EchoboxError::IncompleteDraft { missing });
        }

        let (Some(rating), Some(category), Some(comment)) =
            (draft.rating, draft.category, draft.comment)
        else {
            return Err(EchoboxError::Internal(
                "draft completeness check disagreed with its fields".into(),
            ));
        };

        let comment = truncate_chars(comment, self.max_comment_len);

        Ok(FeedbackRecord {
            submitted_at: Utc::now(),
            user: user.clone(),
            rating,
            category,
            comment,
            status: STATUS_NEW.to_string(),
        })
    }
}

#[async_trait]
impl FeedbackService for FeedbackRepository {
    async fn submit(
        &self,
        user: &UserIdentity,
        draft: FeedbackDraft,
    ) -> Result<RecordRef, EchoboxError> {
        let record = self.build_record(user, draft)?;
        let record_ref = self.store.append(&record).await?;

        // The new record must be visible on the next statistics read.
        self.cache.invalidate().await;

        info!(
            user_id = user.id,
            row = record_ref.0,
            rating = record.rating.value(),
            category = %record.category,
            "feedback record appended"
        );

        if let Some(ref notifier) = self.notifier {
            notifier.notify_admin(&notification_text(&record)).await;
        }

        Ok(record_ref)
    }

    async fn statistics(&self, force_refresh: bool) -> StatisticsSnapshot {
        if !force_refresh
            && let Some(snapshot) = self.cache.get().await
        {
            return snapshot;
        }

        match self.store.read_all().await {
            Ok(records) => {
                let snapshot = stats::compute_snapshot(&records, Utc::now());
                self.cache.put(snapshot.clone()).await;
                snapshot
            }
            Err(err) => {
                // Statistics are read-only and best-effort.
                warn!(error = %err, "statistics read failed, returning empty snapshot");
                StatisticsSnapshot::default()
            }
        }
    }
}

/// Truncates to a maximum number of characters, respecting char boundaries.
fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}

fn notification_text(record: &FeedbackRecord) -> String {
    let preview = truncate_chars(record.comment.clone(), NOTIFY_PREVIEW_LEN);
    format!(
        "New feedback from {} (id {}): rating {}/5, category {}\n{}",
        record.user.display_name(),
        record.user.id,
        record.rating,
        record.category,
        if preview.is_empty() {
            "(no comment)"
        } else {
            preview.as_str()
        }
    )
}
