// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Echobox feedback bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Echobox configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EchoboxConfig {
    /// Bot identity and logging settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Telegram transport settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Google Sheets store settings.
    #[serde(default)]
    pub sheets: SheetsConfig,

    /// Feedback collection and caching settings.
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

/// Bot identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_bot_name() -> String {
    "echobox".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telegram transport configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Telegram Bot API token. Required to run `serve`.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Chat ID that receives new-submission notifications.
    /// `None` disables admin notifications.
    #[serde(default)]
    pub admin_chat_id: Option<i64>,
}

/// Google Sheets store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SheetsConfig {
    /// ID of the spreadsheet that stores feedback rows.
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// Worksheet (tab) name inside the spreadsheet.
    #[serde(default = "default_worksheet")]
    pub worksheet: String,

    /// OAuth access token for the Sheets API. Credential acquisition and
    /// refresh are external concerns; Echobox only consumes a token.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Sheets API base URL. Overridable for testing.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            worksheet: default_worksheet(),
            access_token: None,
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_worksheet() -> String {
    "Feedback".to_string()
}

fn default_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

/// Feedback collection and caching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Maximum accepted comment length; longer comments are truncated.
    #[serde(default = "default_max_comment_len")]
    pub max_comment_len: usize,

    /// Statistics cache time-to-live, in seconds.
    #[serde(default = "default_stats_cache_ttl_secs")]
    pub stats_cache_ttl_secs: u64,

    /// Idle sessions older than this are evicted, in seconds.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            max_comment_len: default_max_comment_len(),
            stats_cache_ttl_secs: default_stats_cache_ttl_secs(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_max_comment_len() -> usize {
    10_000
}

fn default_stats_cache_ttl_secs() -> u64 {
    60
}

fn default_session_ttl_secs() -> u64 {
    1800
}
