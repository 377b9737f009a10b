// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps raw Telegram updates to normalized [`UserEvent`]s and identities.
//!
//! Pure functions, separated from the polling loop so they can be tested
//! against mock updates.

use teloxide::types::{CallbackQuery, ChatKind, Message, User};

use echobox_core::{UserEvent, UserIdentity};

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

/// Maps a Telegram message to a user event.
///
/// Commands become their dedicated events; any other text is free text.
/// Non-text messages (stickers, photos, voice) return `None`.
pub fn message_event(msg: &Message) -> Option<UserEvent> {
    let text = msg.text()?;
    let event = match text.trim() {
        "/start" => UserEvent::Start,
        "/stats" => UserEvent::Stats,
        "/cancel" => UserEvent::Cancel,
        other => UserEvent::Text(other.to_string()),
    };
    Some(event)
}

/// Maps a callback query to a selection event; `None` when the query
/// carries no data.
pub fn callback_event(query: &CallbackQuery) -> Option<UserEvent> {
    query.data.clone().map(UserEvent::Select)
}

/// Snapshots a Telegram user into the domain identity.
///
/// Absent profile parts are normalized to empty strings.
pub fn identity_from_user(user: &User) -> UserIdentity {
    UserIdentity {
        id: user.id.0 as i64,
        username: user.username.clone().unwrap_or_default(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone().unwrap_or_default(),
    }
}
