//! Entity lifecycle operations.
//!
//! [`Workspace`] wraps an injected [`Store`] and provides add / update /
//! delete per entity while keeping the relationships consistent:
//!
//! - cards always sit in an existing column and carry that column's board id;
//! - deleting a board removes its columns and cards and unlinks projects;
//! - deleting a column removes its cards and its entry in the board order;
//! - deleting a label strips it from every card, project, note and doc.
//!
//! Cross-entity deletes read the affected records first, build a
//! [`CascadePlan`](crate::db::cascade::CascadePlan), and apply it as a single
//! unit of work.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::db::cascade::{
    CascadeSummary, plan_board_delete, plan_column_delete, plan_label_delete,
};
use crate::db::ordering::{cards_by_column, next_order, resolve_columns};
use crate::db::patch::{
    BoardPatch, CardPatch, ColumnPatch, LabelPatch, PagePatch, ProjectPatch, toggle_tag,
};
use crate::db::seed;
use crate::db::utils::{current_timestamp, make_id, non_blank};
use crate::db::{
    Board, BoardView, Card, Collection, Column, ColumnView, DbError, DbResult, Doc, Index, Label,
    LabelColor, Note, Project, ProjectStatus, Store, WorkspaceSnapshot, WriteBatch,
};

const NEW_CARD_TITLE: &str = "New task";
const NEW_NOTE_TITLE: &str = "Untitled note";
const NEW_DOC_TITLE: &str = "Untitled doc";

/// Lifecycle operations over an injected store.
pub struct Workspace<S> {
    store: S,
}

impl<S: Store> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Seeding and bulk reads
    // =========================================================================

    /// See [`seed::seed_if_needed`].
    pub async fn seed_if_needed(&self) -> DbResult<bool> {
        seed::seed_if_needed(&self.store).await
    }

    /// See [`seed::reset_seed`].
    pub async fn reset(&self) -> DbResult<()> {
        seed::reset_seed(&self.store).await
    }

    /// Load every collection concurrently.
    pub async fn snapshot(&self) -> DbResult<WorkspaceSnapshot> {
        let (boards, columns, cards, projects, notes, docs, labels) = tokio::try_join!(
            self.store.get_all::<Board>(),
            self.store.get_all::<Column>(),
            self.store.get_all::<Card>(),
            self.store.get_all::<Project>(),
            self.store.get_all::<Note>(),
            self.store.get_all::<Doc>(),
            self.store.get_all::<Label>(),
        )?;
        Ok(WorkspaceSnapshot {
            boards,
            columns,
            cards,
            projects,
            notes,
            docs,
            labels,
        })
    }

    /// A board with its columns resolved and each column's cards sorted.
    pub async fn board_view(&self, board_id: &str) -> DbResult<Option<BoardView>> {
        let Some(board) = self.store.get_by_id::<Board>(board_id).await? else {
            return Ok(None);
        };
        let (columns, cards) = tokio::try_join!(
            self.store.get_by_index::<Column>(Index::BoardId, board_id),
            self.store.get_by_index::<Card>(Index::BoardId, board_id),
        )?;

        let mut grouped = cards_by_column(cards);
        let columns = resolve_columns(&board, &columns)
            .into_iter()
            .map(|column| {
                let cards = grouped.remove(&column.id).unwrap_or_default();
                ColumnView { column, cards }
            })
            .collect();

        Ok(Some(BoardView { board, columns }))
    }

    // =========================================================================
    // Boards
    // =========================================================================

    /// Create a board. A blank name becomes `Board {n}`.
    #[instrument(skip(self))]
    pub async fn add_board(&self, name: &str) -> DbResult<Board> {
        let name = match non_blank(name) {
            Some(name) => name,
            None => format!("Board {}", self.store.count(Collection::Boards).await? + 1),
        };
        let now = current_timestamp();
        let board = Board {
            id: make_id("board"),
            name,
            column_order: vec![],
            created_at: now.clone(),
            updated_at: now,
        };
        self.store.put(&board).await?;
        info!(board_id = %board.id, "added board");
        Ok(board)
    }

    pub async fn update_board(&self, board_id: &str, mut patch: BoardPatch) -> DbResult<Board> {
        patch.name = checked_name(patch.name, "board")?;
        let mut board = self.require::<Board>(board_id, "Board").await?;
        patch.apply(&mut board);
        board.updated_at = current_timestamp();
        self.store.put(&board).await?;
        Ok(board)
    }

    /// Delete a board with its columns and cards; projects are unlinked.
    #[instrument(skip(self))]
    pub async fn delete_board(&self, board_id: &str) -> DbResult<CascadeSummary> {
        let (board, columns, board_cards, projects) = tokio::try_join!(
            self.store.get_by_id::<Board>(board_id),
            self.store.get_by_index::<Column>(Index::BoardId, board_id),
            self.store.get_by_index::<Card>(Index::BoardId, board_id),
            self.store.get_by_index::<Project>(Index::BoardId, board_id),
        )?;

        // Cards whose board id drifted still go with their column.
        let mut cards: BTreeMap<String, Card> =
            board_cards.into_iter().map(|c| (c.id.clone(), c)).collect();
        for column in &columns {
            for card in self
                .store
                .get_by_index::<Card>(Index::ColumnId, &column.id)
                .await?
            {
                cards.entry(card.id.clone()).or_insert(card);
            }
        }
        let cards: Vec<Card> = cards.into_values().collect();

        let plan = plan_board_delete(
            board_id,
            board.is_some(),
            &columns,
            &cards,
            &projects,
            &current_timestamp(),
        )?;
        self.store.apply(plan.batch).await?;

        info!(board_id, summary = %plan.summary, "deleted board");
        Ok(plan.summary)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column to a board, at the end of its column order.
    #[instrument(skip(self))]
    pub async fn add_column(&self, board_id: &str, name: &str) -> DbResult<Column> {
        let name = non_blank(name).ok_or_else(|| DbError::validation("column name cannot be empty"))?;
        let mut board = self.require::<Board>(board_id, "Board").await?;
        let siblings = self
            .store
            .get_by_index::<Column>(Index::BoardId, board_id)
            .await?;

        let column = Column {
            id: make_id("col"),
            board_id: board.id.clone(),
            name,
            order: next_order(siblings.len()),
        };
        board.column_order.push(column.id.clone());
        board.updated_at = current_timestamp();

        let mut batch = WriteBatch::new();
        batch.put(&column)?;
        batch.put(&board)?;
        self.store.apply(batch).await?;

        info!(column_id = %column.id, order = column.order, "added column");
        Ok(column)
    }

    pub async fn update_column(
        &self,
        column_id: &str,
        mut patch: ColumnPatch,
    ) -> DbResult<Column> {
        patch.name = checked_name(patch.name, "column")?;
        let mut column = self.require::<Column>(column_id, "Column").await?;
        patch.apply(&mut column);
        self.store.put(&column).await?;
        Ok(column)
    }

    /// Delete a column and its cards, and drop it from the board order.
    #[instrument(skip(self))]
    pub async fn delete_column(&self, column_id: &str) -> DbResult<CascadeSummary> {
        let column = self.store.get_by_id::<Column>(column_id).await?;
        let board = match &column {
            Some(column) => self.store.get_by_id::<Board>(&column.board_id).await?,
            None => None,
        };
        let cards = self
            .store
            .get_by_index::<Card>(Index::ColumnId, column_id)
            .await?;

        let plan = plan_column_delete(
            column_id,
            column.is_some(),
            board.as_ref(),
            &cards,
            &current_timestamp(),
        )?;
        self.store.apply(plan.batch).await?;

        info!(column_id, summary = %plan.summary, "deleted column");
        Ok(plan.summary)
    }

    // =========================================================================
    // Cards
    // =========================================================================

    /// Append a card to a column. The board id comes from the column.
    #[instrument(skip(self))]
    pub async fn add_card(&self, column_id: &str, title: &str) -> DbResult<Card> {
        let column = self.require::<Column>(column_id, "Column").await?;
        let siblings = self
            .store
            .get_by_index::<Card>(Index::ColumnId, column_id)
            .await?;

        let now = current_timestamp();
        let card = Card {
            id: make_id("card"),
            board_id: column.board_id,
            column_id: column.id,
            title: non_blank(title).unwrap_or_else(|| NEW_CARD_TITLE.to_string()),
            description: String::new(),
            label_ids: vec![],
            owner: String::new(),
            due: String::new(),
            order: next_order(siblings.len()),
            created_at: now.clone(),
            updated_at: now,
        };
        self.store.put(&card).await?;

        info!(card_id = %card.id, order = card.order, "added card");
        Ok(card)
    }

    pub async fn update_card(&self, card_id: &str, patch: CardPatch) -> DbResult<Card> {
        let mut card = self.require::<Card>(card_id, "Card").await?;
        patch.apply(&mut card);
        card.updated_at = current_timestamp();
        self.store.put(&card).await?;
        Ok(card)
    }

    /// Move a card to the end of `column_id`, adopting that column's board.
    #[instrument(skip(self))]
    pub async fn move_card(&self, card_id: &str, column_id: &str) -> DbResult<Card> {
        let mut card = self.require::<Card>(card_id, "Card").await?;
        let column = self.require::<Column>(column_id, "Column").await?;
        let siblings = self
            .store
            .get_by_index::<Card>(Index::ColumnId, column_id)
            .await?;
        let others = siblings.iter().filter(|k| k.id != card.id).count();

        card.column_id = column.id;
        card.board_id = column.board_id;
        card.order = next_order(others);
        card.updated_at = current_timestamp();
        self.store.put(&card).await?;

        info!(card_id, column_id, order = card.order, "moved card");
        Ok(card)
    }

    /// Attach `label_id` to the card, or detach it if already attached.
    pub async fn toggle_card_label(&self, card_id: &str, label_id: &str) -> DbResult<Card> {
        self.require::<Label>(label_id, "Label").await?;
        let card = self.require::<Card>(card_id, "Card").await?;
        let patch = CardPatch {
            label_ids: Some(toggle_tag(&card.label_ids, label_id)),
            ..Default::default()
        };
        self.update_card(card_id, patch).await
    }

    pub async fn delete_card(&self, card_id: &str) -> DbResult<()> {
        self.store.delete_by_id(Collection::Cards, card_id).await
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// Create a project, optionally linked to an existing board.
    #[instrument(skip(self))]
    pub async fn add_project(
        &self,
        name: &str,
        summary: &str,
        board_id: Option<&str>,
    ) -> DbResult<Project> {
        let name =
            non_blank(name).ok_or_else(|| DbError::validation("project name cannot be empty"))?;
        if let Some(board_id) = board_id {
            self.require::<Board>(board_id, "Board").await?;
        }

        let project = Project {
            id: make_id("project"),
            name,
            summary: summary.trim().to_string(),
            board_id: board_id.map(str::to_string),
            status: ProjectStatus::Planning,
            tag_ids: vec![],
            updated_at: current_timestamp(),
        };
        self.store.put(&project).await?;

        info!(project_id = %project.id, "added project");
        Ok(project)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        mut patch: ProjectPatch,
    ) -> DbResult<Project> {
        patch.name = checked_name(patch.name, "project")?;
        if let Some(Some(board_id)) = &patch.board_id {
            self.require::<Board>(board_id, "Board").await?;
        }
        let mut project = self.require::<Project>(project_id, "Project").await?;
        patch.apply(&mut project);
        project.updated_at = current_timestamp();
        self.store.put(&project).await?;
        Ok(project)
    }

    pub async fn delete_project(&self, project_id: &str) -> DbResult<()> {
        self.store
            .delete_by_id(Collection::Projects, project_id)
            .await
    }

    // =========================================================================
    // Notes and docs
    // =========================================================================

    pub async fn add_note(&self) -> DbResult<Note> {
        let note = Note {
            id: make_id("note"),
            title: NEW_NOTE_TITLE.to_string(),
            body: String::new(),
            tag_ids: vec![],
            updated_at: current_timestamp(),
        };
        self.store.put(&note).await?;
        Ok(note)
    }

    pub async fn update_note(&self, note_id: &str, patch: PagePatch) -> DbResult<Note> {
        let mut note = self.require::<Note>(note_id, "Note").await?;
        patch.apply_to_note(&mut note);
        note.updated_at = current_timestamp();
        self.store.put(&note).await?;
        Ok(note)
    }

    pub async fn delete_note(&self, note_id: &str) -> DbResult<()> {
        self.store.delete_by_id(Collection::Notes, note_id).await
    }

    pub async fn add_doc(&self) -> DbResult<Doc> {
        let doc = Doc {
            id: make_id("doc"),
            title: NEW_DOC_TITLE.to_string(),
            body: String::new(),
            tag_ids: vec![],
            updated_at: current_timestamp(),
        };
        self.store.put(&doc).await?;
        Ok(doc)
    }

    pub async fn update_doc(&self, doc_id: &str, patch: PagePatch) -> DbResult<Doc> {
        let mut doc = self.require::<Doc>(doc_id, "Doc").await?;
        patch.apply_to_doc(&mut doc);
        doc.updated_at = current_timestamp();
        self.store.put(&doc).await?;
        Ok(doc)
    }

    pub async fn delete_doc(&self, doc_id: &str) -> DbResult<()> {
        self.store.delete_by_id(Collection::Docs, doc_id).await
    }

    // =========================================================================
    // Labels
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn add_label(&self, name: &str, color: LabelColor) -> DbResult<Label> {
        let name =
            non_blank(name).ok_or_else(|| DbError::validation("label name cannot be empty"))?;
        let label = Label {
            id: make_id("label"),
            name,
            color,
        };
        self.store.put(&label).await?;
        info!(label_id = %label.id, "added label");
        Ok(label)
    }

    pub async fn update_label(&self, label_id: &str, mut patch: LabelPatch) -> DbResult<Label> {
        patch.name = checked_name(patch.name, "label")?;
        let mut label = self.require::<Label>(label_id, "Label").await?;
        patch.apply(&mut label);
        self.store.put(&label).await?;
        Ok(label)
    }

    /// Delete a label and strip it from every record that references it.
    #[instrument(skip(self))]
    pub async fn delete_label(&self, label_id: &str) -> DbResult<CascadeSummary> {
        let (label, cards, projects, notes, docs) = tokio::try_join!(
            self.store.get_by_id::<Label>(label_id),
            self.store.get_all::<Card>(),
            self.store.get_all::<Project>(),
            self.store.get_all::<Note>(),
            self.store.get_all::<Doc>(),
        )?;

        let plan = plan_label_delete(label_id, label.is_some(), &cards, &projects, &notes, &docs)?;
        self.store.apply(plan.batch).await?;

        info!(label_id, summary = %plan.summary, "deleted label");
        Ok(plan.summary)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn require<R: crate::db::Record>(&self, id: &str, entity_type: &str) -> DbResult<R> {
        self.store
            .get_by_id::<R>(id)
            .await?
            .ok_or_else(|| DbError::not_found(entity_type, id))
    }
}

/// A patched name must not be blank; it is stored trimmed.
fn checked_name(name: Option<String>, entity: &str) -> DbResult<Option<String>> {
    name.map(|name| {
        non_blank(&name)
            .ok_or_else(|| DbError::validation(format!("{} name cannot be empty", entity)))
    })
    .transpose()
}
