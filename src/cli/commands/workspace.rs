use crate::cli::error::CliResult;
use crate::db::{Store, Workspace};

/// Write the default workspace if there are no boards yet
pub async fn seed<S: Store>(workspace: &Workspace<S>) -> CliResult<String> {
    if workspace.seed_if_needed().await? {
        Ok("✓ Seeded default workspace".to_string())
    } else {
        Ok("Workspace already has boards; nothing to seed.".to_string())
    }
}

/// Replace everything with the default workspace (requires --force flag)
pub async fn reset<S: Store>(workspace: &Workspace<S>, force: bool) -> CliResult<String> {
    if !force {
        return Err(crate::cli::error::CliError::InvalidInput {
            message: "Reset deletes every board, card, project, note, doc and label. Pass --force to confirm.".to_string(),
        });
    }

    workspace.reset().await?;
    Ok("✓ Workspace reset to default data".to_string())
}
