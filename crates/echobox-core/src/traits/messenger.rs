// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messenger trait: the "send message with optional choice menu"
//! capability the core requires from the chat transport.

use async_trait::async_trait;

use crate::error::EchoboxError;
use crate::types::Prompt;

/// Outbound message delivery to one chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a prompt (text plus optional choice menu) to a chat.
    async fn send(&self, chat_id: i64, prompt: Prompt) -> Result<(), EchoboxError>;
}
