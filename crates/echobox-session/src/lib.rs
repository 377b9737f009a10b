// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation layer for the Echobox feedback bot.
//!
//! Holds the per-chat collection state machine ([`flow::Session`]), the
//! session registry with idle eviction, the prompt catalog, and the
//! [`Dispatcher`] that routes normalized user events.

pub mod dispatch;
pub mod flow;
pub mod prompts;
pub mod registry;

pub use dispatch::Dispatcher;
pub use flow::{FlowReply, FlowState, Session};
pub use registry::SessionRegistry;
