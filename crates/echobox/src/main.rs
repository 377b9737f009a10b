// SPDX-FileCopyrightText: 2026 Echobox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Echobox - a Telegram feedback bot backed by Google Sheets.
//!
//! This is the binary entry point for the bot.

use clap::{Parser, Subcommand};

mod serve;

/// Echobox - a Telegram feedback bot backed by Google Sheets.
#[derive(Parser, Debug)]
#[command(name = "echobox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the feedback bot.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match echobox_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            echobox_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("echobox serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            let mut printable = config.clone();
            // Secrets never reach stdout.
            if printable.telegram.bot_token.is_some() {
                printable.telegram.bot_token = Some("<redacted>".into());
            }
            if printable.sheets.access_token.is_some() {
                printable.sheets.access_token = Some("<redacted>".into());
            }
            match toml::to_string_pretty(&printable) {
                Ok(rendered) => print!("{rendered}"),
                Err(e) => {
                    eprintln!("echobox config: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("echobox: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed)
        let config =
            echobox_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.bot.name, "echobox");
    }
}
