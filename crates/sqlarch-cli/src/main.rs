//! SQL Architect CLI application
//!
//! Optimizes SQL or converts it between dialects using Gemini models.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/sqlarch-cli
//! ```
//!
//! # Commands
//!
//! - `sqlarch optimize [SQL] --dialect <d> [--schema <text> | --schema-file <path>]`
//! - `sqlarch convert [SQL] --from <d> --to <d>`
//! - `sqlarch models`
//! - `sqlarch config show | init | set-model | set-dialects | set-language`
//!
//! SQL is read from the argument, `--file`, or stdin. See `sqlarch --help`.

mod args;
mod commands;
mod console;
mod logging;
mod render;
mod router;

use args::Cli;
use clap::Parser;
use console::CliConsole;
use sqlarch_core::{UnifiedError, UserFriendlyError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match router::route(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(code = error.error_code(), "Command failed: {:?}", error);
            CliConsole::new(false).error(&UserFriendlyError::from(&error).format_display());
            ExitCode::FAILURE
        }
    }
}
