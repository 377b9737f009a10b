// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits that define the seams between the core and its
//! external collaborators (remote store, chat transport, admin channel).

pub mod messenger;
pub mod notify;
pub mod service;
pub mod store;

pub use messenger::Messenger;
pub use notify::AdminNotifier;
pub use service::FeedbackService;
pub use store::StoreClient;
