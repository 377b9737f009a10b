// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty identifiers and positive time windows.

use crate::error::ConfigError;
use crate::model::EchoboxConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &EchoboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(ref token) = config.telegram.bot_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "telegram.bot_token must not be empty when set".to_string(),
        });
    }

    if let Some(ref id) = config.sheets.spreadsheet_id
        && id.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "sheets.spreadsheet_id must not be empty when set".to_string(),
        });
    }

    if config.sheets.worksheet.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "sheets.worksheet must not be empty".to_string(),
        });
    } else if !config
        .sheets
        .worksheet
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        // The worksheet name is interpolated into API request paths, so
        // characters like spaces or '!' would produce malformed URLs.
        errors.push(ConfigError::Validation {
            message: "sheets.worksheet must contain only letters, digits, hyphens, or underscores"
                .to_string(),
        });
    }

    if config.sheets.api_base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "sheets.api_base_url must not be empty".to_string(),
        });
    }

    if config.feedback.max_comment_len == 0 {
        errors.push(ConfigError::Validation {
            message: "feedback.max_comment_len must be at least 1".to_string(),
        });
    }

    if config.feedback.stats_cache_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "feedback.stats_cache_ttl_secs must be at least 1".to_string(),
        });
    }

    if config.feedback.session_ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "feedback.session_ttl_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = EchoboxConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_bot_token_fails_validation() {
        let mut config = EchoboxConfig::default();
        config.telegram.bot_token = Some("   ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("bot_token"))));
    }

    #[test]
    fn zero_ttls_fail_validation() {
        let mut config = EchoboxConfig::default();
        config.feedback.stats_cache_ttl_secs = 0;
        config.feedback.session_ttl_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_worksheet_fails_validation() {
        let mut config = EchoboxConfig::default();
        config.sheets.worksheet = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("worksheet"))));
    }

    #[test]
    fn worksheet_with_url_breaking_characters_fails_validation() {
        for name in ["My Tab", "Tab!", "Лист1", "a/b"] {
            let mut config = EchoboxConfig::default();
            config.sheets.worksheet = name.to_string();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                errors.iter().any(|e| matches!(
                    e,
                    ConfigError::Validation { message } if message.contains("worksheet")
                )),
                "expected {name:?} to be rejected"
            );
        }

        let mut config = EchoboxConfig::default();
        config.sheets.worksheet = "Team_Feedback-2026".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn toml_round_trip_validates() {
        let toml_str = r#"
[telegram]
bot_token = "123456:ABC"

[sheets]
spreadsheet_id = "1aBcD"
"#;
        let config: EchoboxConfig = toml::from_str(toml_str).unwrap();
        assert!(validate_config(&config).is_ok());
    }
}
