// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Echobox workspace.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A feedback rating, constrained to 1..=5.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: u8 = 1;
    /// Highest accepted rating.
    pub const MAX: u8 = 5;

    /// Creates a rating, returning `None` for values outside 1..=5.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Returns the numeric value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {value} is outside 1..=5"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of feedback categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Category {
    Suggestion,
    Bug,
    Idea,
    Thanks,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Suggestion,
        Category::Bug,
        Category::Idea,
        Category::Thanks,
    ];
}

/// Identity snapshot of a submitting user.
///
/// Optional Telegram profile parts are normalized to empty strings so the
/// persisted row never carries absent fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserIdentity {
    /// Best available human-readable name for notifications.
    pub fn display_name(&self) -> &str {
        if !self.username.is_empty() {
            &self.username
        } else if !self.first_name.is_empty() {
            &self.first_name
        } else {
            "unknown"
        }
    }
}

/// The in-progress, possibly incomplete answer set for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub rating: Option<Rating>,
    pub category: Option<Category>,
    pub comment: Option<String>,
}

impl FeedbackDraft {
    /// True once all three answers are present.
    pub fn is_complete(&self) -> bool {
        self.rating.is_some() && self.category.is_some() && self.comment.is_some()
    }

    /// Names of the fields still missing, in answer order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.rating.is_none() {
            missing.push("rating");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.comment.is_none() {
            missing.push("comment");
        }
        missing
    }
}

/// One finalized feedback submission, ready to be appended to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    pub submitted_at: DateTime<Utc>,
    pub user: UserIdentity,
    pub rating: Rating,
    pub category: Category,
    pub comment: String,
    /// Downstream triage field; initialized to `"new"` and never read or
    /// transitioned by the core.
    pub status: String,
}

/// Initial status written with every record.
pub const STATUS_NEW: &str = "new";

/// One row read back from the store.
///
/// Read-side parsing is tolerant: historical rows may be short or carry
/// corrupt cells, so every field is a plain string except the rating,
/// which is `None` when the cell is not a parseable 1..=5 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub timestamp: String,
    pub user_id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub rating: Option<Rating>,
    pub category: String,
    pub comment: String,
    pub status: String,
}

/// Reference to an appended record: its 1-based row index in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRef(pub u64);

/// Computed aggregate view over all persisted records.
///
/// `rating_distribution` always carries all five keys; corrupt ratings
/// count toward `total` but not toward the distribution or the average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSnapshot {
    pub total: u64,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<u8, u64>,
    pub category_distribution: BTreeMap<String, u64>,
    pub status_distribution: BTreeMap<String, u64>,
    pub with_comments: u64,
    pub today: u64,
    pub last_week: u64,
    pub last_submission: Option<String>,
}

impl Default for StatisticsSnapshot {
    fn default() -> Self {
        Self {
            total: 0,
            average_rating: 0.0,
            rating_distribution: (Rating::MIN..=Rating::MAX).map(|r| (r, 0)).collect(),
            category_distribution: BTreeMap::new(),
            status_distribution: BTreeMap::new(),
            with_comments: 0,
            today: 0,
            last_week: 0,
            last_submission: None,
        }
    }
}

/// One choice button in a prompt menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// A menu of choices, laid out as button rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceMenu {
    pub rows: Vec<Vec<Choice>>,
}

impl ChoiceMenu {
    /// Appends a row of choices; chainable for menu construction.
    pub fn row(mut self, choices: Vec<Choice>) -> Self {
        self.rows.push(choices);
        self
    }
}

/// An outbound message: text with an optional choice menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub menu: Option<ChoiceMenu>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
        }
    }

    pub fn with_menu(text: impl Into<String>, menu: ChoiceMenu) -> Self {
        Self {
            text: text.into(),
            menu: Some(menu),
        }
    }
}

/// An inbound user event, already normalized by the channel adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// `/start` command: show the welcome message and main menu.
    Start,
    /// `/stats` command or the statistics menu button.
    Stats,
    /// `/cancel` command: abort the current flow, if any.
    Cancel,
    /// A discrete choice selection (inline button callback data).
    Select(String),
    /// Free text.
    Text(String),
}
