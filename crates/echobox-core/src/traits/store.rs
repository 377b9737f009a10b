// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store client trait for the remote tabular store.

use async_trait::async_trait;

use crate::error::EchoboxError;
use crate::types::{FeedbackRecord, RecordRef, StoredRecord};

/// Append and bulk-read operations against the remote tabular store.
///
/// Implementations serialize records to the fixed column order, never
/// overwrite existing rows, and classify failures via
/// [`StoreErrorKind`](crate::error::StoreErrorKind).
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Appends one record; returns a reference to the new row.
    async fn append(&self, record: &FeedbackRecord) -> Result<RecordRef, EchoboxError>;

    /// Reads all records in append order, header row excluded.
    ///
    /// Rows shorter than the expected column count are padded with empty
    /// trailing fields; extension columns are ignored.
    async fn read_all(&self) -> Result<Vec<StoredRecord>, EchoboxError>;
}
