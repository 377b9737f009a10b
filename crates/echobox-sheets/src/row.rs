// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-order row codec for the feedback sheet.
//!
//! Column order is part of the store contract: Timestamp, User ID,
//! Username, First Name, Last Name, Rating, Category, Comment, Status.
//! Writers always emit all nine columns; readers tolerate short rows and
//! ignore extension columns beyond the ninth.

use echobox_core::{FeedbackRecord, Rating, StoredRecord};

/// Header row written by sheet provisioning, skipped by readers.
pub const HEADER: [&str; 9] = [
    "Timestamp",
    "User ID",
    "Username",
    "First Name",
    "Last Name",
    "Rating",
    "Category",
    "Comment",
    "Status",
];

/// Timestamp format used in the Timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializes a record into a sheet row, in fixed column order.
pub fn to_row(record: &FeedbackRecord) -> Vec<String> {
    vec![
        record.submitted_at.format(TIMESTAMP_FORMAT).to_string(),
        record.user.id.to_string(),
        record.user.username.clone(),
        record.user.first_name.clone(),
        record.user.last_name.clone(),
        record.rating.to_string(),
        record.category.to_string(),
        record.comment.clone(),
        record.status.clone(),
    ]
}

/// Parses one sheet row into a [`StoredRecord`].
///
/// Missing trailing cells become empty strings; a rating cell that is not
/// a parseable 1..=5 integer becomes `None`.
pub fn parse_row(row: &[String]) -> StoredRecord {
    let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();

    StoredRecord {
        timestamp: cell(0),
        user_id: cell(1),
        username: cell(2),
        first_name: cell(3),
        last_name: cell(4),
        rating: cell(5).trim().parse::<u8>().ok().and_then(Rating::new),
        category: cell(6),
        comment: cell(7),
        status: cell(8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use echobox_core::{Category, UserIdentity, STATUS_NEW};

    fn sample_record() -> FeedbackRecord {
        FeedbackRecord {
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap(),
            user: UserIdentity {
                id: 123456789,
                username: "alice".into(),
                first_name: "Alice".into(),
                last_name: "Smith".into(),
            },
            rating: Rating::new(5).unwrap(),
            category: Category::Thanks,
            comment: "Great!".into(),
            status: STATUS_NEW.into(),
        }
    }

    #[test]
    fn to_row_emits_all_columns_in_order() {
        let row = to_row(&sample_record());
        assert_eq!(
            row,
            vec![
                "2026-03-14 15:09:26",
                "123456789",
                "alice",
                "Alice",
                "Smith",
                "5",
                "Thanks",
                "Great!",
                "new",
            ]
        );
    }

    #[test]
    fn round_trip_preserves_rating_category_comment() {
        let record = sample_record();
        let parsed = parse_row(&to_row(&record));
        assert_eq!(parsed.rating, Some(record.rating));
        assert_eq!(parsed.category, record.category.to_string());
        assert_eq!(parsed.comment, record.comment);
        assert_eq!(parsed.status, STATUS_NEW);
    }

    #[test]
    fn short_row_pads_missing_trailing_fields() {
        let row: Vec<String> = vec!["2026-01-01 00:00:00".into(), "42".into()];
        let parsed = parse_row(&row);
        assert_eq!(parsed.user_id, "42");
        assert_eq!(parsed.username, "");
        assert_eq!(parsed.comment, "");
        assert_eq!(parsed.status, "");
        assert!(parsed.rating.is_none());
    }

    #[test]
    fn corrupt_rating_parses_to_none() {
        for bad in ["", "abc", "0", "6", "4.5"] {
            let mut row = vec![String::new(); 9];
            row[5] = bad.to_string();
            assert!(parse_row(&row).rating.is_none(), "rating {bad:?} should not parse");
        }
        let mut row = vec![String::new(); 9];
        row[5] = " 3 ".to_string();
        assert_eq!(parse_row(&row).rating.map(Rating::value), Some(3));
    }

    #[test]
    fn extension_columns_are_ignored() {
        let mut row = to_row(&sample_record());
        row.push("extra-1".into());
        row.push("extra-2".into());
        let parsed = parse_row(&row);
        assert_eq!(parsed.status, "new");
    }
}
