// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Echobox feedback bot.
//!
//! Provides the domain types (ratings, categories, drafts, records,
//! statistics), the shared error type, and the adapter traits implemented
//! by the store, chat, and notification layers.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EchoboxError, StoreErrorKind};
pub use traits::{AdminNotifier, FeedbackService, Messenger, StoreClient};
pub use types::{
    Category, Choice, ChoiceMenu, FeedbackDraft, FeedbackRecord, Prompt, Rating, RecordRef,
    StatisticsSnapshot, StoredRecord, UserEvent, UserIdentity, STATUS_NEW,
};
