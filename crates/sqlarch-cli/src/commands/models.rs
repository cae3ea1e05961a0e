//! Models listing command

use crate::console::CliConsole;
use colored::*;
use serde_json::json;
use sqlarch_core::SqlArchResult;
use sqlarch_core::config::model_catalog::{find_model, known_models};
use sqlarch_core::config::ModelProfile;

/// List the catalogued models and mark the selected one
pub async fn list(selected: &str, json: bool) -> SqlArchResult<()> {
    if json {
        let output = json!({
            "selected": selected,
            "models": known_models(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let console = CliConsole::new(false);
    console.print_header("Available Models");

    for profile in known_models() {
        println!("{}", model_line(profile, profile.id == selected.trim()));
        println!("      {}", profile.description.dimmed());
    }

    if find_model(selected).is_none() {
        console.print_separator();
        console.warn(&format!(
            "Selected model '{}' is not in the catalog; it will be sent as-is",
            selected
        ));
    }

    console.print_separator();
    console.info("Tip: Use `sqlarch config set-model <id>` to change the default");
    Ok(())
}

fn model_line(profile: &ModelProfile, selected: bool) -> String {
    let marker = if selected { "*".green().bold() } else { " ".normal() };
    let id = if selected {
        profile.id.green().bold()
    } else {
        profile.id.normal()
    };
    format!(
        "  {} {:<24} [{}] {}",
        marker,
        id,
        profile.tier.engine_label().cyan(),
        profile.display_name
    )
}
