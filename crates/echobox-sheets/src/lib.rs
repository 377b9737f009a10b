// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Sheets persistence for Echobox.
//!
//! [`SheetsClient`] talks to the Sheets v4 values API and implements the
//! store contract; [`FeedbackRepository`] layers validation, the TTL
//! statistics cache, and admin notification on top of any store.

pub mod client;
pub mod repository;
pub mod row;
pub mod stats;

pub use client::{AccessTokenProvider, SheetsClient, StaticTokenProvider};
pub use repository::FeedbackRepository;
pub use stats::StatsCache;
