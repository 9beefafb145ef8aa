use crate::cli::error::CliResult;
use crate::db::{Store, Workspace};

/// Append a column to a board
pub async fn add_column<S: Store>(
    workspace: &Workspace<S>,
    board_id: &str,
    name: &str,
) -> CliResult<String> {
    let column = workspace.add_column(board_id, name).await?;
    Ok(format!(
        "✓ Created column: {} ({}) at position {}",
        column.name, column.id, column.order
    ))
}

/// Delete a column and its cards
pub async fn delete_column<S: Store>(workspace: &Workspace<S>, id: &str) -> CliResult<String> {
    let summary = workspace.delete_column(id).await?;
    Ok(format!("✓ Deleted column: {} ({})", id, summary))
}
