// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routes normalized user events to global commands or the per-chat flow.
//!
//! Global events (/start, /stats, menu buttons) are handled here; flow
//! events are forwarded to the chat's [`Session`](crate::flow::Session),
//! which is created on `start_feedback` and dropped when its reply says
//! the flow is done.

use std::sync::Arc;

use tracing::debug;

use echobox_core::{EchoboxError, FeedbackService, Messenger, Prompt, UserEvent, UserIdentity};

use crate::prompts::{self, codes};
use crate::registry::SessionRegistry;

pub struct Dispatcher {
    registry: SessionRegistry,
    service: Arc<dyn FeedbackService>,
    messenger: Arc<dyn Messenger>,
    /// Human-viewable URL of the backing sheet, shown with statistics.
    sheet_url: Option<String>,
}

impl Dispatcher {
    pub fn new(
        service: Arc<dyn FeedbackService>,
        messenger: Arc<dyn Messenger>,
        sheet_url: Option<String>,
    ) -> Self {
        Self {
            registry: SessionRegistry::new(),
            service,
            messenger,
            sheet_url,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Handles one inbound event for one chat.
    pub async fn dispatch(
        &self,
        chat_id: i64,
        user: UserIdentity,
        event: UserEvent,
    ) -> Result<(), EchoboxError> {
        match &event {
            UserEvent::Start => {
                // /start always resets: any in-flight flow is abandoned.
                self.registry.remove(chat_id);
                self.send(chat_id, prompts::welcome()).await
            }
            UserEvent::Stats => self.send_statistics(chat_id).await,
            UserEvent::Select(data) if data == codes::SHOW_STATS => {
                self.send_statistics(chat_id).await
            }
            UserEvent::Select(data) if data == codes::ABOUT => {
                self.send(chat_id, prompts::about()).await
            }
            UserEvent::Select(data) if data == codes::START_FEEDBACK => {
                let session = self
                    .registry
                    .start(chat_id, user, self.sheet_url.clone());
                let prompt = session.lock().await.opening_prompt();
                self.send(chat_id, prompt).await
            }
            _ => self.dispatch_to_flow(chat_id, event).await,
        }
    }

    async fn dispatch_to_flow(
        &self,
        chat_id: i64,
        event: UserEvent,
    ) -> Result<(), EchoboxError> {
        let Some(session) = self.registry.get(chat_id) else {
            return match event {
                UserEvent::Cancel => self.send(chat_id, prompts::nothing_to_cancel()).await,
                UserEvent::Text(_) => self.send(chat_id, prompts::unknown_text()).await,
                // A button press from a stale keyboard; nothing to do.
                other => {
                    debug!(chat_id, event = ?other, "ignoring event without a session");
                    Ok(())
                }
            };
        };

        let reply = {
            let mut session = session.lock().await;
            session.handle(&event, self.service.as_ref()).await
        };

        if reply.done {
            self.registry.remove(chat_id);
        }
        for prompt in reply.prompts {
            self.send(chat_id, prompt).await?;
        }
        Ok(())
    }

    async fn send_statistics(&self, chat_id: i64) -> Result<(), EchoboxError> {
        let snapshot = self.service.statistics(false).await;
        self.send(chat_id, prompts::statistics(&snapshot, self.sheet_url.as_deref()))
            .await
    }

    async fn send(&self, chat_id: i64, prompt: Prompt) -> Result<(), EchoboxError> {
        self.messenger.send(chat_id, prompt).await
    }
}
