// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statistics computation and the time-boxed snapshot cache.
//!
//! The cache holds a single global `(snapshot, computed_at)` pair behind
//! one mutex, so readers never observe a torn update. Records with a
//! corrupt rating cell count toward the total but are excluded from the
//! average and the rating distribution.

use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDateTime, Utc};
use tokio::sync::Mutex;

use echobox_core::{Rating, StatisticsSnapshot, StoredRecord};

use crate::row::TIMESTAMP_FORMAT;

/// Label used when a historical row has an empty category or status cell.
const UNSPECIFIED: &str = "Unspecified";

/// Computes a fresh snapshot over all records, in append order.
pub fn compute_snapshot(records: &[StoredRecord], now: DateTime<Utc>) -> StatisticsSnapshot {
    let mut snapshot = StatisticsSnapshot::default();
    snapshot.total = records.len() as u64;

    let today = now.date_naive();
    let mut rating_sum: u64 = 0;
    let mut rating_count: u64 = 0;

    for record in records {
        if let Some(rating) = record.rating {
            rating_sum += u64::from(rating.value());
            rating_count += 1;
            *snapshot
                .rating_distribution
                .entry(rating.value())
                .or_insert(0) += 1;
        }

        let category = non_empty_or(&record.category, UNSPECIFIED);
        *snapshot.category_distribution.entry(category).or_insert(0) += 1;

        let status = non_empty_or(&record.status, UNSPECIFIED);
        *snapshot.status_distribution.entry(status).or_insert(0) += 1;

        if !record.comment.trim().is_empty() {
            snapshot.with_comments += 1;
        }

        if let Ok(ts) = NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT) {
            let days_ago = (today - ts.date()).num_days();
            if days_ago == 0 {
                snapshot.today += 1;
            }
            if (0..=7).contains(&days_ago) {
                snapshot.last_week += 1;
            }
        }
    }

    if rating_count > 0 {
        let average = rating_sum as f64 / rating_count as f64;
        snapshot.average_rating = (average * 100.0).round() / 100.0;
    }

    snapshot.last_submission = records
        .last()
        .map(|r| r.timestamp.clone())
        .filter(|ts| !ts.is_empty());

    snapshot
}

struct CachedSnapshot {
    snapshot: StatisticsSnapshot,
    computed_at: Instant,
}

/// Time-boxed cache for the single global statistics snapshot.
pub struct StatsCache {
    ttl: Duration,
    inner: Mutex<Option<CachedSnapshot>>,
}

impl StatsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot if one exists and is still fresh.
    pub async fn get(&self) -> Option<StatisticsSnapshot> {
        let guard = self.inner.lock().await;
        guard
            .as_ref()
            .filter(|cached| cached.computed_at.elapsed() < self.ttl)
            .map(|cached| cached.snapshot.clone())
    }

    /// Stores a freshly computed snapshot, stamping it now.
    pub async fn put(&self, snapshot: StatisticsSnapshot) {
        let mut guard = self.inner.lock().await;
        *guard = Some(CachedSnapshot {
            snapshot,
            computed_at: Instant::now(),
        });
    }

    /// Clears the cached snapshot, forcing recomputation on the next read.
    pub async fn invalidate(&self) {
        let mut guard = self.inner.lock().await;
        *guard = None;
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str, rating: Option<u8>, category: &str, comment: &str) -> StoredRecord {
        StoredRecord {
            timestamp: timestamp.to_string(),
            user_id: "1".into(),
            username: "u".into(),
            first_name: "U".into(),
            last_name: String::new(),
            rating: rating.and_then(Rating::new),
            category: category.to_string(),
            comment: comment.to_string(),
            status: "new".into(),
        }
    }

    #[test]
    fn average_of_five_four_three_is_four() {
        let records = vec![
            record("2026-01-01 10:00:00", Some(5), "Thanks", "a"),
            record("2026-01-02 10:00:00", Some(4), "Bug", ""),
            record("2026-01-03 10:00:00", Some(3), "Idea", "c"),
        ];
        let snap = compute_snapshot(&records, Utc::now());
        assert_eq!(snap.average_rating, 4.0);
        assert_eq!(snap.total, 3);
        assert_eq!(snap.with_comments, 2);
    }

    #[test]
    fn empty_set_has_zero_average() {
        let snap = compute_snapshot(&[], Utc::now());
        assert_eq!(snap.total, 0);
        assert_eq!(snap.average_rating, 0.0);
        assert!(snap.last_submission.is_none());
    }

    #[test]
    fn corrupt_rating_counts_in_total_but_not_average() {
        let records = vec![
            record("2026-01-01 10:00:00", Some(5), "Thanks", ""),
            record("2026-01-01 11:00:00", None, "Bug", ""),
        ];
        let snap = compute_snapshot(&records, Utc::now());
        assert_eq!(snap.total, 2);
        assert_eq!(snap.average_rating, 5.0);
        let parseable: u64 = snap.rating_distribution.values().sum();
        assert_eq!(parseable, 1);
    }

    #[test]
    fn rating_distribution_keeps_all_keys() {
        let records = vec![record("2026-01-01 10:00:00", Some(2), "Idea", "")];
        let snap = compute_snapshot(&records, Utc::now());
        assert_eq!(snap.rating_distribution.len(), 5);
        assert_eq!(snap.rating_distribution[&2], 1);
        assert_eq!(snap.rating_distribution[&5], 0);
    }

    #[test]
    fn recency_counters_use_timestamp_windows() {
        let now = Utc::now();
        let today = now.format(TIMESTAMP_FORMAT).to_string();
        let three_days = (now - chrono::Duration::days(3))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        let last_month = (now - chrono::Duration::days(30))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        let records = vec![
            record(&today, Some(5), "Thanks", ""),
            record(&three_days, Some(4), "Bug", ""),
            record(&last_month, Some(3), "Idea", ""),
            record("not-a-timestamp", Some(1), "Bug", ""),
        ];
        let snap = compute_snapshot(&records, now);
        assert_eq!(snap.today, 1);
        assert_eq!(snap.last_week, 2);
        assert_eq!(snap.total, 4);
    }

    #[test]
    fn empty_category_and_status_fall_back_to_unspecified() {
        let records = vec![record("2026-01-01 10:00:00", Some(4), "  ", "")];
        let snap = compute_snapshot(&records, Utc::now());
        assert_eq!(snap.category_distribution["Unspecified"], 1);
    }

    #[test]
    fn last_submission_is_the_final_row() {
        let records = vec![
            record("2026-01-01 10:00:00", Some(5), "Thanks", ""),
            record("2026-01-02 10:00:00", Some(4), "Bug", ""),
        ];
        let snap = compute_snapshot(&records, Utc::now());
        assert_eq!(snap.last_submission.as_deref(), Some("2026-01-02 10:00:00"));
    }

    #[tokio::test]
    async fn cache_returns_fresh_snapshot_within_ttl() {
        let cache = StatsCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());

        let snap = compute_snapshot(&[], Utc::now());
        cache.put(snap.clone()).await;
        assert_eq!(cache.get().await, Some(snap));
    }

    #[tokio::test]
    async fn cache_expires_after_ttl() {
        let cache = StatsCache::new(Duration::from_millis(10));
        cache.put(StatisticsSnapshot::default()).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn invalidate_clears_cached_snapshot() {
        let cache = StatsCache::new(Duration::from_secs(60));
        cache.put(StatisticsSnapshot::default()).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
