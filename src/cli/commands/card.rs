use crate::cli::error::CliResult;
use crate::db::{Store, Workspace};

/// Add a card to the end of a column
pub async fn add_card<S: Store>(
    workspace: &Workspace<S>,
    column_id: &str,
    title: &str,
) -> CliResult<String> {
    let card = workspace.add_card(column_id, title).await?;
    Ok(format!("✓ Created card: {} ({})", card.title, card.id))
}

/// Move a card to the end of another column
pub async fn move_card<S: Store>(
    workspace: &Workspace<S>,
    id: &str,
    column_id: &str,
) -> CliResult<String> {
    let card = workspace.move_card(id, column_id).await?;
    Ok(format!(
        "✓ Moved card: {} ({}) to {} at position {}",
        card.title, card.id, card.column_id, card.order
    ))
}

/// Attach or detach a label
pub async fn toggle_label<S: Store>(
    workspace: &Workspace<S>,
    id: &str,
    label_id: &str,
) -> CliResult<String> {
    let card = workspace.toggle_card_label(id, label_id).await?;
    let verb = if card.label_ids.iter().any(|l| l == label_id) {
        "Attached"
    } else {
        "Detached"
    };
    Ok(format!("✓ {} label {} on card: {}", verb, label_id, card.id))
}

/// Delete a card
pub async fn delete_card<S: Store>(workspace: &Workspace<S>, id: &str) -> CliResult<String> {
    workspace.delete_card(id).await?;
    Ok(format!("✓ Deleted card: {}", id))
}
