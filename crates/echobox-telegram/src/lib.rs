// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram channel adapter for the Echobox feedback bot.
//!
//! Connects via teloxide long polling, normalizes updates into
//! [`UserEvent`](echobox_core::UserEvent)s for the session dispatcher,
//! and implements outbound delivery ([`Messenger`]) plus best-effort
//! admin notification ([`AdminNotifier`]).

pub mod handler;

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Recipient};
use tracing::{debug, error, info, warn};

use echobox_config::model::TelegramConfig;
use echobox_core::{AdminNotifier, ChoiceMenu, EchoboxError, Messenger, Prompt};
use echobox_session::Dispatcher as EventDispatcher;

/// Telegram transport: one bot connection shared by the outbound
/// messenger, the admin notifier, and the polling loop.
pub struct TelegramChannel {
    bot: Bot,
    admin_chat_id: Option<i64>,
}

impl TelegramChannel {
    /// Creates the channel. Requires `telegram.bot_token`.
    pub fn new(config: &TelegramConfig) -> Result<Self, EchoboxError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            EchoboxError::Config("telegram.bot_token is required".into())
        })?;

        if token.is_empty() {
            return Err(EchoboxError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        Ok(Self {
            bot: Bot::new(token),
            admin_chat_id: config.admin_chat_id,
        })
    }

    /// Runs long polling until the process is interrupted.
    ///
    /// Group and channel updates are ignored; the bot only talks in DMs,
    /// so a callback query's chat id is its sender's user id.
    pub async fn run(&self, events: Arc<EventDispatcher>) {
        info!("starting Telegram long polling");

        let message_events = events.clone();
        let message_branch = Update::filter_message().endpoint(move |msg: Message| {
            let events = message_events.clone();
            async move {
                if !handler::is_dm(&msg) {
                    debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                    return respond(());
                }
                let (Some(user), Some(event)) = (msg.from.as_ref(), handler::message_event(&msg))
                else {
                    return respond(());
                };

                let identity = handler::identity_from_user(user);
                if let Err(e) = events.dispatch(msg.chat.id.0, identity, event).await {
                    error!(error = %e, chat_id = msg.chat.id.0, "failed to handle message");
                }
                respond(())
            }
        });

        let callback_branch =
            Update::filter_callback_query().endpoint(move |bot: Bot, query: CallbackQuery| {
                let events = events.clone();
                async move {
                    // Stop the button spinner; failures here are cosmetic.
                    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
                        debug!(error = %e, "failed to answer callback query");
                    }

                    let Some(event) = handler::callback_event(&query) else {
                        return respond(());
                    };
                    let identity = handler::identity_from_user(&query.from);
                    let chat_id = identity.id;
                    if let Err(e) = events.dispatch(chat_id, identity, event).await {
                        error!(error = %e, chat_id, "failed to handle callback");
                    }
                    respond(())
                }
            });

        Dispatcher::builder(
            self.bot.clone(),
            dptree::entry()
                .branch(message_branch)
                .branch(callback_branch),
        )
        .default_handler(|_| async {}) // Silently ignore other update kinds
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    }
}

/// Converts a choice menu into a Telegram inline keyboard.
fn markup(menu: ChoiceMenu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.rows.into_iter().map(|row| {
        row.into_iter()
            .map(|choice| InlineKeyboardButton::callback(choice.label, choice.data))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl Messenger for TelegramChannel {
    async fn send(&self, chat_id: i64, prompt: Prompt) -> Result<(), EchoboxError> {
        let mut request = self
            .bot
            .send_message(Recipient::Id(ChatId(chat_id)), prompt.text);
        if let Some(menu) = prompt.menu {
            request = request.reply_markup(markup(menu));
        }

        request.await.map_err(|e| EchoboxError::Channel {
            message: format!("failed to send message: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(())
    }
}

#[async_trait]
impl AdminNotifier for TelegramChannel {
    async fn notify_admin(&self, text: &str) {
        let Some(chat_id) = self.admin_chat_id else {
            return;
        };

        if let Err(e) = self
            .bot
            .send_message(Recipient::Id(ChatId(chat_id)), text)
            .await
        {
            warn!(error = %e, "failed to notify admin");
        }
    }
}
