//! Cascade plans for cross-entity deletes.
//!
//! A plan is computed from already-loaded records before anything is written,
//! then applied as one [`WriteBatch`]. Readers therefore see either the state
//! before the delete or the fully cascaded state, never a mix.

use std::collections::BTreeMap;

use crate::db::{Board, Card, Collection, Column, DbResult, Doc, Note, Project, WriteBatch};

/// What a cascade removed and rewrote, per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub removed: BTreeMap<Collection, usize>,
    pub rewritten: BTreeMap<Collection, usize>,
}

impl CascadeSummary {
    pub fn removed(&self, collection: Collection) -> usize {
        self.removed.get(&collection).copied().unwrap_or(0)
    }

    pub fn rewritten(&self, collection: Collection) -> usize {
        self.rewritten.get(&collection).copied().unwrap_or(0)
    }

    fn note_removed(&mut self, collection: Collection) {
        *self.removed.entry(collection).or_default() += 1;
    }

    fn note_rewritten(&mut self, collection: Collection) {
        *self.rewritten.entry(collection).or_default() += 1;
    }
}

impl std::fmt::Display for CascadeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let removed: Vec<String> = self
            .removed
            .iter()
            .map(|(c, n)| format!("{} {}", n, c))
            .collect();
        let rewritten: Vec<String> = self
            .rewritten
            .iter()
            .map(|(c, n)| format!("{} {}", n, c))
            .collect();
        match (removed.is_empty(), rewritten.is_empty()) {
            (true, true) => write!(f, "nothing changed"),
            (false, true) => write!(f, "removed {}", removed.join(", ")),
            (true, false) => write!(f, "updated {}", rewritten.join(", ")),
            (false, false) => write!(
                f,
                "removed {}; updated {}",
                removed.join(", "),
                rewritten.join(", ")
            ),
        }
    }
}

/// A batch of writes plus its summary.
#[derive(Debug, Default)]
pub struct CascadePlan {
    pub batch: WriteBatch,
    pub summary: CascadeSummary,
}

impl CascadePlan {
    fn remove(&mut self, collection: Collection, id: &str) {
        self.batch.delete(collection, id);
        self.summary.note_removed(collection);
    }

    fn rewrite<R: crate::db::Record>(&mut self, record: &R) -> DbResult<()> {
        self.batch.put(record)?;
        self.summary.note_rewritten(R::COLLECTION);
        Ok(())
    }
}

/// Delete a board, its columns and cards; unlink projects pointing at it.
///
/// `columns`, `cards` and `projects` may contain unrelated records; only the
/// ones that belong to `board_id` are touched. The board itself is only
/// queued (and counted) when `board_exists`; dependents are cleaned up either
/// way.
pub fn plan_board_delete(
    board_id: &str,
    board_exists: bool,
    columns: &[Column],
    cards: &[Card],
    projects: &[Project],
    now: &str,
) -> DbResult<CascadePlan> {
    let mut plan = CascadePlan::default();
    if board_exists {
        plan.remove(Collection::Boards, board_id);
    }

    let doomed_columns: Vec<&str> = columns
        .iter()
        .filter(|c| c.board_id == board_id)
        .map(|c| c.id.as_str())
        .collect();

    for column_id in &doomed_columns {
        plan.remove(Collection::Columns, column_id);
    }

    for card in cards
        .iter()
        .filter(|k| k.board_id == board_id || doomed_columns.contains(&k.column_id.as_str()))
    {
        plan.remove(Collection::Cards, &card.id);
    }

    for project in projects
        .iter()
        .filter(|p| p.board_id.as_deref() == Some(board_id))
    {
        let mut unlinked = project.clone();
        unlinked.board_id = None;
        unlinked.updated_at = now.to_string();
        plan.rewrite(&unlinked)?;
    }

    Ok(plan)
}

/// Delete a column and its cards, and drop it from the board's column order.
pub fn plan_column_delete(
    column_id: &str,
    column_exists: bool,
    board: Option<&Board>,
    cards: &[Card],
    now: &str,
) -> DbResult<CascadePlan> {
    let mut plan = CascadePlan::default();
    if column_exists {
        plan.remove(Collection::Columns, column_id);
    }

    for card in cards.iter().filter(|k| k.column_id == column_id) {
        plan.remove(Collection::Cards, &card.id);
    }

    if let Some(board) = board.filter(|b| b.column_order.iter().any(|id| id == column_id)) {
        let mut updated = board.clone();
        updated.column_order.retain(|id| id != column_id);
        updated.updated_at = now.to_string();
        plan.rewrite(&updated)?;
    }

    Ok(plan)
}

/// Delete a label and strip its id from every record that references it.
///
/// Records that do not reference the label are left alone. Stripping a label
/// does not count as an edit, so `updated_at` is kept.
pub fn plan_label_delete(
    label_id: &str,
    label_exists: bool,
    cards: &[Card],
    projects: &[Project],
    notes: &[Note],
    docs: &[Doc],
) -> DbResult<CascadePlan> {
    let mut plan = CascadePlan::default();
    if label_exists {
        plan.remove(Collection::Labels, label_id);
    }

    for card in cards.iter().filter(|k| references(&k.label_ids, label_id)) {
        let mut updated = card.clone();
        updated.label_ids.retain(|id| id != label_id);
        plan.rewrite(&updated)?;
    }
    for project in projects.iter().filter(|p| references(&p.tag_ids, label_id)) {
        let mut updated = project.clone();
        updated.tag_ids.retain(|id| id != label_id);
        plan.rewrite(&updated)?;
    }
    for note in notes.iter().filter(|n| references(&n.tag_ids, label_id)) {
        let mut updated = note.clone();
        updated.tag_ids.retain(|id| id != label_id);
        plan.rewrite(&updated)?;
    }
    for doc in docs.iter().filter(|d| references(&d.tag_ids, label_id)) {
        let mut updated = doc.clone();
        updated.tag_ids.retain(|id| id != label_id);
        plan.rewrite(&updated)?;
    }

    Ok(plan)
}

fn references(ids: &[String], label_id: &str) -> bool {
    ids.iter().any(|id| id == label_id)
}
