// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Google Sheets v4 values API.
//!
//! Provides [`SheetsClient`], the [`StoreClient`] implementation: lazy
//! readiness verification, append and bulk-read operations, HTTP status
//! classification into [`StoreErrorKind`], and a single retry per
//! operation on transient failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use echobox_config::model::SheetsConfig;
use echobox_core::{EchoboxError, FeedbackRecord, RecordRef, StoreClient, StoreErrorKind, StoredRecord};

use crate::row;

/// Supplies a bearer token for Sheets API calls.
///
/// Credential loading and refresh stay outside the core; the client only
/// consumes whatever token this trait yields per operation.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, EchoboxError>;
}

/// Token provider backed by a fixed token from configuration.
pub struct StaticTokenProvider(String);

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, EchoboxError> {
        Ok(self.0.clone())
    }
}

/// Sheets API response for `values.append`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: AppendUpdates,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: String,
}

/// Sheets API response for `values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Spreadsheet metadata, fetched once to verify access.
#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    properties: SpreadsheetProperties,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

/// Google Sheets store client.
///
/// Connection establishment is lazy: the first operation verifies access
/// by fetching spreadsheet metadata. Each operation retries exactly once
/// on a transient failure (re-running the readiness check if it never
/// succeeded), then surfaces the classified error.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    tokens: Arc<dyn AccessTokenProvider>,
    title: OnceCell<String>,
}

impl SheetsClient {
    /// Creates a client from configuration. Requires `sheets.spreadsheet_id`.
    pub fn new(
        config: &SheetsConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, EchoboxError> {
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .ok_or_else(|| EchoboxError::Config("sheets.spreadsheet_id is required".into()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EchoboxError::Store {
                kind: StoreErrorKind::Connectivity,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            worksheet: config.worksheet.clone(),
            tokens,
            title: OnceCell::new(),
        })
    }

    /// Verifies spreadsheet access and provisions the header row once;
    /// subsequent calls are free.
    ///
    /// A failed verification leaves the cell unset, so the per-operation
    /// retry re-attempts the connection.
    async fn ensure_ready(&self) -> Result<(), EchoboxError> {
        self.title
            .get_or_try_init(|| async {
                let token = self.tokens.access_token().await?;
                let url = format!(
                    "{}/v4/spreadsheets/{}?fields=properties.title",
                    self.base_url, self.spreadsheet_id
                );
                let response = self
                    .http
                    .get(&url)
                    .bearer_auth(&token)
                    .send()
                    .await
                    .map_err(transport_error)?;
                let meta: SpreadsheetMeta = read_json(response).await?;
                self.ensure_header(&token).await?;
                debug!(title = %meta.properties.title, "connected to spreadsheet");
                Ok::<_, EchoboxError>(meta.properties.title)
            })
            .await?;
        Ok(())
    }

    /// Writes the header row when the worksheet is empty.
    ///
    /// Readers skip row 1 unconditionally, so an empty sheet must get its
    /// header before the first record is appended — otherwise that record
    /// would land in row 1 and be misread as the header forever.
    async fn ensure_header(&self, token: &str) -> Result<(), EchoboxError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1:I1",
            self.base_url, self.spreadsheet_id, self.worksheet
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;
        let range: ValueRange = read_json(response).await?;
        if !range.values.is_empty() {
            return Ok(());
        }

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A1",
            self.base_url, self.spreadsheet_id, self.worksheet
        );
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&serde_json::json!({ "values": [row::HEADER] }))
            .send()
            .await
            .map_err(transport_error)?;
        read_json::<serde_json::Value>(response).await?;
        info!(worksheet = %self.worksheet, "header row written to empty worksheet");
        Ok(())
    }

    async fn try_append(&self, values: &[String]) -> Result<RecordRef, EchoboxError> {
        self.ensure_ready().await?;
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url, self.spreadsheet_id, self.worksheet
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .query(&[("valueInputOption", "RAW")])
            .json(&serde_json::json!({ "values": [values] }))
            .send()
            .await
            .map_err(transport_error)?;

        let appended: AppendResponse = read_json(response).await?;
        parse_row_index(&appended.updates.updated_range).ok_or_else(|| {
            EchoboxError::store(
                StoreErrorKind::DataShape,
                format!(
                    "could not locate row index in updated range {:?}",
                    appended.updates.updated_range
                ),
            )
        })
    }

    async fn try_read_all(&self) -> Result<Vec<StoredRecord>, EchoboxError> {
        self.ensure_ready().await?;
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, self.worksheet
        );
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(transport_error)?;

        let range: ValueRange = read_json(response).await?;

        // Row 1 is the header; everything after is a record, in append order.
        let records = range
            .values
            .into_iter()
            .skip(1)
            .map(|cells| {
                let cells: Vec<String> = cells.into_iter().map(cell_to_string).collect();
                row::parse_row(&cells)
            })
            .collect();
        Ok(records)
    }
}

#[async_trait]
impl StoreClient for SheetsClient {
    async fn append(&self, record: &FeedbackRecord) -> Result<RecordRef, EchoboxError> {
        let values = row::to_row(record);
        retry_once("append", || self.try_append(&values)).await
    }

    async fn read_all(&self) -> Result<Vec<StoredRecord>, EchoboxError> {
        retry_once("read_all", || self.try_read_all()).await
    }
}

/// Runs an operation, retrying exactly once after a short pause if the
/// first attempt failed with a connectivity-class error.
async fn retry_once<T, F, Fut>(op: &str, mut attempt_fn: F) -> Result<T, EchoboxError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, EchoboxError>>,
{
    match attempt_fn().await {
        Ok(value) => Ok(value),
        Err(err) if err.store_kind() == Some(StoreErrorKind::Connectivity) => {
            warn!(op, error = %err, "transient store failure, retrying once");
            tokio::time::sleep(Duration::from_millis(500)).await;
            attempt_fn().await
        }
        Err(err) => Err(err),
    }
}

/// Maps a reqwest transport failure to a connectivity store error.
fn transport_error(err: reqwest::Error) -> EchoboxError {
    EchoboxError::Store {
        kind: StoreErrorKind::Connectivity,
        message: format!("HTTP request failed: {err}"),
        source: Some(Box::new(err)),
    }
}

/// Checks the response status, classifies failures, and parses the body.
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, EchoboxError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let kind = classify_status(status);
        return Err(EchoboxError::store(
            kind,
            format!("Sheets API returned {status}: {body}"),
        ));
    }

    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|e| {
        EchoboxError::store(
            StoreErrorKind::DataShape,
            format!("unexpected Sheets API payload: {e}"),
        )
    })
}

/// HTTP status → error kind: 401/403 are auth, 429/5xx are transient,
/// anything else unsuccessful means we sent or received a malformed shape.
fn classify_status(status: StatusCode) -> StoreErrorKind {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        StoreErrorKind::Auth
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StoreErrorKind::Connectivity
    } else {
        StoreErrorKind::DataShape
    }
}

/// Extracts the 1-based row index from an A1 range like `Feedback!A42:I42`.
fn parse_row_index(range: &str) -> Option<RecordRef> {
    let cell = range.split('!').nth(1)?.split(':').next()?;
    let digits: String = cell.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok().map(RecordRef)
}

/// Formatted sheet values are strings, but be tolerant of raw numbers.
fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
