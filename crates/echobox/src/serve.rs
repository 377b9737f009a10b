// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `echobox serve` command implementation.
//!
//! Wires the Sheets store into the feedback repository, attaches the
//! session dispatcher to the Telegram channel, and runs long polling
//! with a background sweep of abandoned sessions.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use echobox_config::model::EchoboxConfig;
use echobox_core::{AdminNotifier, EchoboxError, Messenger};
use echobox_session::Dispatcher;
use echobox_sheets::{FeedbackRepository, SheetsClient, StaticTokenProvider};
use echobox_telegram::TelegramChannel;

/// How often abandoned sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the `echobox serve` command.
///
/// Blocks on Telegram long polling until the process is interrupted.
pub async fn run_serve(config: EchoboxConfig) -> Result<(), EchoboxError> {
    init_tracing(&config.bot.log_level);
    info!(bot = %config.bot.name, "starting echobox");

    let access_token = config.sheets.access_token.clone().ok_or_else(|| {
        EchoboxError::Config("sheets.access_token is required to serve".into())
    })?;
    let tokens = Arc::new(StaticTokenProvider::new(access_token));
    let store = Arc::new(SheetsClient::new(&config.sheets, tokens)?);

    let channel = Arc::new(TelegramChannel::new(&config.telegram)?);
    let notifier: Option<Arc<dyn AdminNotifier>> = config
        .telegram
        .admin_chat_id
        .map(|_| channel.clone() as Arc<dyn AdminNotifier>);

    let service = Arc::new(FeedbackRepository::new(store, &config.feedback, notifier));

    let sheet_url = config
        .sheets
        .spreadsheet_id
        .as_ref()
        .map(|id| format!("https://docs.google.com/spreadsheets/d/{id}"));

    let dispatcher = Arc::new(Dispatcher::new(
        service,
        channel.clone() as Arc<dyn Messenger>,
        sheet_url,
    ));

    let session_ttl = Duration::from_secs(config.feedback.session_ttl_secs);
    let sweeper = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            interval.tick().await; // first tick fires immediately
            loop {
                interval.tick().await;
                dispatcher.registry().evict_idle(session_ttl);
            }
        })
    };

    channel.run(dispatcher).await;
    sweeper.abort();

    info!("echobox stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
