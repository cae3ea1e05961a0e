//! Rendering of processing results

use colored::*;
use sqlarch_core::{Mode, ProcessingResult};
use std::fmt::Write;

/// Heading of the mode-relevant list
pub fn notes_heading(mode: Mode) -> &'static str {
    match mode {
        Mode::Optimize => "Optimization tips",
        Mode::Convert => "Conversion notes",
    }
}

/// Human-readable rendering; the irrelevant list and empty lists are left out
pub fn format_result(result: &ProcessingResult, mode: Mode) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Processed SQL".bold().underline());
    let _ = writeln!(out, "{}", result.processed_sql.trim_end().cyan());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Explanation".bold().underline());
    let _ = writeln!(out, "{}", result.explanation.trim_end());

    let notes = result.relevant_notes(mode);
    if !notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", notes_heading(mode).bold().underline());
        for note in notes {
            let _ = writeln!(out, "  {} {}", "•".yellow(), note);
        }
    }

    out
}

/// Pretty JSON rendering for `--json`
pub fn format_result_json(result: &ProcessingResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
