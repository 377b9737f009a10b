// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory registry of active sessions, keyed by chat id.
//!
//! Sessions are created when a flow starts and removed when it ends.
//! Abandoned flows are reclaimed by [`SessionRegistry::evict_idle`],
//! driven by a periodic task in the binary.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use echobox_core::UserIdentity;

use crate::flow::Session;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<i64, Arc<Mutex<Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active session for a chat, if any.
    pub fn get(&self, chat_id: i64) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(&chat_id).map(|entry| entry.clone())
    }

    /// Starts a fresh flow for a chat, replacing any session already there.
    pub fn start(
        &self,
        chat_id: i64,
        user: UserIdentity,
        sheet_url: Option<String>,
    ) -> Arc<Mutex<Session>> {
        let session = Arc::new(Mutex::new(Session::new(user, sheet_url)));
        self.sessions.insert(chat_id, session.clone());
        debug!(chat_id, "session started");
        session
    }

    pub fn remove(&self, chat_id: i64) {
        if self.sessions.remove(&chat_id).is_some() {
            debug!(chat_id, "session removed");
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops sessions that have been idle longer than `ttl`.
    ///
    /// A session whose mutex is held is being handled right now, so it is
    /// not idle and is skipped. Removals are counted inside the closure:
    /// new sessions can be inserted concurrently while `retain` runs, so
    /// a before/after length difference is not a valid count.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut evicted = 0;
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => {
                let stale = guard.idle_for() > ttl;
                if stale {
                    evicted += 1;
                }
                !stale
            }
            Err(_) => true,
        });
        if evicted > 0 {
            info!(evicted, "evicted idle sessions");
        }
        evicted
    }
}
