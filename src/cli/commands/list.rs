use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, format_tags, or_dash, truncate_with_ellipsis};
use crate::db::{
    Board, Card, Collection, Column, Doc, Label, Note, Project, Record, Store, Workspace,
};
use serde::Serialize;
use tabled::builder::Builder;

/// One row of a generic listing: id plus a few display columns.
pub(crate) trait ListRow {
    const HEADERS: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl ListRow for Board {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Column order", "Updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_with_ellipsis(&self.name, 40),
            format_tags(&self.column_order),
            self.updated_at.clone(),
        ]
    }
}

impl ListRow for Column {
    const HEADERS: &'static [&'static str] = &["ID", "Board", "Name", "Order"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.board_id.clone(),
            self.name.clone(),
            self.order.to_string(),
        ]
    }
}

impl ListRow for Card {
    const HEADERS: &'static [&'static str] = &["ID", "Column", "Order", "Title", "Labels"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.column_id.clone(),
            self.order.to_string(),
            truncate_with_ellipsis(&self.title, 40),
            format_tags(&self.label_ids),
        ]
    }
}

impl ListRow for Project {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Status", "Board", "Tags"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_with_ellipsis(&self.name, 40),
            self.status.to_string(),
            or_dash(self.board_id.as_deref().unwrap_or_default()),
            format_tags(&self.tag_ids),
        ]
    }
}

impl ListRow for Note {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Tags", "Updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_with_ellipsis(&self.title, 50),
            format_tags(&self.tag_ids),
            self.updated_at.clone(),
        ]
    }
}

impl ListRow for Doc {
    const HEADERS: &'static [&'static str] = &["ID", "Title", "Tags", "Updated"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            truncate_with_ellipsis(&self.title, 50),
            format_tags(&self.tag_ids),
            self.updated_at.clone(),
        ]
    }
}

impl ListRow for Label {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Color"];

    fn row(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.color.to_string()]
    }
}

/// List every record of a collection
pub async fn list_collection<S: Store>(
    workspace: &Workspace<S>,
    collection: &str,
    format: &str,
) -> CliResult<String> {
    let collection: Collection = collection
        .parse()
        .map_err(|message| CliError::InvalidInput { message })?;

    match collection {
        Collection::Boards => render::<S, Board>(workspace, format).await,
        Collection::Columns => render::<S, Column>(workspace, format).await,
        Collection::Cards => render::<S, Card>(workspace, format).await,
        Collection::Projects => render::<S, Project>(workspace, format).await,
        Collection::Notes => render::<S, Note>(workspace, format).await,
        Collection::Docs => render::<S, Doc>(workspace, format).await,
        Collection::Labels => render::<S, Label>(workspace, format).await,
    }
}

async fn render<S: Store, R: Record + ListRow + Serialize>(
    workspace: &Workspace<S>,
    format: &str,
) -> CliResult<String> {
    let records: Vec<R> = workspace.store().get_all().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&records)?),
        _ => Ok(format_table(&records)),
    }
}

pub(crate) fn format_table<R: Record + ListRow>(records: &[R]) -> String {
    if records.is_empty() {
        return format!("No {} found.", R::COLLECTION);
    }

    let mut builder = Builder::default();
    builder.push_record(R::HEADERS.iter().copied());
    for record in records {
        builder.push_record(record.row());
    }

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}
