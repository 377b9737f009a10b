// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort admin notification trait.

use async_trait::async_trait;

/// Fire-and-forget notification to the configured admin.
///
/// Invoked after a successful submit. Delivery failures are logged and
/// swallowed by implementations; they never affect the submit outcome.
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    async fn notify_admin(&self, text: &str);
}
