use std::collections::HashMap;

use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{
    apply_table_style, format_tags, label_names, or_dash, truncate_with_ellipsis,
};
use crate::db::{Board, BoardView, DbError, Label, Store, Workspace};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub(crate) struct BoardDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Name")]
    pub(crate) name: String,
    #[tabled(rename = "Columns")]
    pub(crate) columns: usize,
    #[tabled(rename = "Updated")]
    pub(crate) updated_at: String,
}

impl From<&Board> for BoardDisplay {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            name: truncate_with_ellipsis(&board.name, 40),
            columns: board.column_order.len(),
            updated_at: board.updated_at.clone(),
        }
    }
}

/// List all boards
pub async fn list_boards<S: Store>(workspace: &Workspace<S>, format: &str) -> CliResult<String> {
    let boards: Vec<Board> = workspace.store().get_all().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&boards)?),
        _ => Ok(format_table(&boards)),
    }
}

pub(crate) fn format_table(boards: &[Board]) -> String {
    if boards.is_empty() {
        return "No boards found.".to_string();
    }

    let display: Vec<BoardDisplay> = boards.iter().map(|b| b.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a new board
pub async fn add_board<S: Store>(workspace: &Workspace<S>, name: &str) -> CliResult<String> {
    let board = workspace.add_board(name).await?;
    Ok(format!("✓ Created board: {} ({})", board.name, board.id))
}

/// Delete a board with its columns and cards (requires --force flag)
pub async fn delete_board<S: Store>(
    workspace: &Workspace<S>,
    id: &str,
    force: bool,
) -> CliResult<String> {
    if !force {
        return Err(CliError::InvalidInput {
            message: "Deleting a board also deletes its columns and cards. Pass --force to confirm."
                .to_string(),
        });
    }

    let summary = workspace.delete_board(id).await?;
    Ok(format!("✓ Deleted board: {} ({})", id, summary))
}

/// Show a board with its columns and cards
pub async fn show_board<S: Store>(
    workspace: &Workspace<S>,
    id: &str,
    format: &str,
) -> CliResult<String> {
    let Some(view) = workspace.board_view(id).await? else {
        return Err(DbError::not_found("Board", id).into());
    };

    match format {
        "json" => Ok(serde_json::to_string_pretty(&view)?),
        _ => {
            let labels: HashMap<String, Label> = workspace
                .store()
                .get_all::<Label>()
                .await?
                .into_iter()
                .map(|l| (l.id.clone(), l))
                .collect();
            Ok(format_board(&view, &labels))
        }
    }
}

#[derive(Tabled)]
pub(crate) struct CardRow {
    #[tabled(rename = "Column")]
    pub(crate) column: String,
    #[tabled(rename = "#")]
    pub(crate) order: i64,
    #[tabled(rename = "ID")]
    pub(crate) id: String,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Labels")]
    pub(crate) labels: String,
    #[tabled(rename = "Owner")]
    pub(crate) owner: String,
    #[tabled(rename = "Due")]
    pub(crate) due: String,
}

pub(crate) fn format_board(view: &BoardView, labels: &HashMap<String, Label>) -> String {
    let mut rows = Vec::new();
    for column in &view.columns {
        if column.cards.is_empty() {
            rows.push(CardRow {
                column: column.column.name.clone(),
                order: 0,
                id: "-".to_string(),
                title: "(empty)".to_string(),
                labels: "-".to_string(),
                owner: "-".to_string(),
                due: "-".to_string(),
            });
        }
        for card in &column.cards {
            rows.push(CardRow {
                column: column.column.name.clone(),
                order: card.order,
                id: card.id.clone(),
                title: truncate_with_ellipsis(&card.title, 40),
                labels: format_tags(&label_names(&card.label_ids, labels)),
                owner: or_dash(&card.owner),
                due: or_dash(&card.due),
            });
        }
    }

    let header = format!("{} ({})", view.board.name, view.board.id);
    if rows.is_empty() {
        return format!("{}\nNo columns yet.", header);
    }

    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    format!("{}\n{}", header, table)
}
