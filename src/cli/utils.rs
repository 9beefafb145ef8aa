//! Shared utilities for CLI commands

use std::collections::HashMap;

use tabled::{Table, settings::Style};

use crate::db::Label;

/// Truncate a string with ellipsis if it exceeds max length
pub fn truncate_with_ellipsis(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Format a list of tags for display
pub fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

/// Replace label ids with label names where known
pub fn label_names(ids: &[String], labels: &HashMap<String, Label>) -> Vec<String> {
    ids.iter()
        .map(|id| labels.get(id).map_or_else(|| id.clone(), |l| l.name.clone()))
        .collect()
}

/// Show an empty string as "-"
pub fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".to_string() } else { s.to_string() }
}

/// Apply consistent table styling
pub fn apply_table_style(table: &mut Table) {
    table.with(Style::rounded());
}
