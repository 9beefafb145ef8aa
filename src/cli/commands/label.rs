use crate::cli::error::{CliError, CliResult};
use crate::db::{LabelColor, Store, Workspace};

/// Create a label. Without a color, the palette is cycled by label count.
pub async fn add_label<S: Store>(
    workspace: &Workspace<S>,
    name: &str,
    color: Option<&str>,
) -> CliResult<String> {
    let color = match color {
        Some(c) => c
            .parse::<LabelColor>()
            .map_err(|message| CliError::InvalidInput { message })?,
        None => {
            let existing = workspace
                .store()
                .count(crate::db::Collection::Labels)
                .await?;
            LabelColor::PALETTE[existing % LabelColor::PALETTE.len()]
        }
    };

    let label = workspace.add_label(name, color).await?;
    Ok(format!(
        "✓ Created label: {} ({}, {})",
        label.name, label.id, label.color
    ))
}

/// Delete a label and strip it from every card, project, note and doc
pub async fn delete_label<S: Store>(workspace: &Workspace<S>, id: &str) -> CliResult<String> {
    let summary = workspace.delete_label(id).await?;
    Ok(format!("✓ Deleted label: {} ({})", id, summary))
}
