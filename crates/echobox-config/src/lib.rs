// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Echobox feedback bot.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.

pub mod error;
pub mod loader;
pub mod model;
pub mod validation;

pub use error::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::EchoboxConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `EchoboxConfig` or the list of collected errors.
pub fn load_and_validate() -> Result<EchoboxConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<EchoboxConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}
