// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type and terminal rendering.

use thiserror::Error;

/// A configuration loading or validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML/env layer could not be parsed or merged.
    #[error("{0}")]
    Parse(#[from] figment::Error),

    /// A semantic constraint was violated after deserialization.
    #[error("{message}")]
    Validation { message: String },
}

/// Print all collected configuration errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprintln!(
        "echobox: {} configuration error{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
    for err in errors {
        eprintln!("  - {err}");
    }
}
