// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./echobox.toml` > `~/.config/echobox/echobox.toml`
//! > `/etc/echobox/echobox.toml` with environment variable overrides via the
//! `ECHOBOX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::EchoboxConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/echobox/echobox.toml` (system-wide)
/// 3. `~/.config/echobox/echobox.toml` (user XDG config)
/// 4. `./echobox.toml` (local directory)
/// 5. `ECHOBOX_*` environment variables
pub fn load_config() -> Result<EchoboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EchoboxConfig::default()))
        .merge(Toml::file("/etc/echobox/echobox.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("echobox/echobox.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("echobox.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<EchoboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EchoboxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EchoboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EchoboxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `ECHOBOX_TELEGRAM_BOT_TOKEN` must map
/// to `telegram.bot_token`, not `telegram.bot.token`.
fn env_provider() -> Env {
    Env::prefixed("ECHOBOX_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("bot_", "bot.", 1)
            .replacen("telegram_", "telegram.", 1)
            .replacen("sheets_", "sheets.", 1)
            .replacen("feedback_", "feedback.", 1);
        mapped.into()
    })
}
