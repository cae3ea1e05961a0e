//! CLI commands

pub mod config;
pub mod models;
pub mod process;

pub use process::{ProcessArgs, execute as process_execute};
