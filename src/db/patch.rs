//! Typed partial updates.
//!
//! Each patch names the fields a caller may change; `None` leaves the field
//! as it is. Timestamps are not part of any patch: the lifecycle operations
//! refresh `updated_at` themselves.

use crate::db::{Board, Card, Column, Doc, Id, Label, LabelColor, Note, Project, ProjectStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub column_order: Option<Vec<Id>>,
}

impl BoardPatch {
    pub fn apply(self, board: &mut Board) {
        if let Some(name) = self.name {
            board.name = name;
        }
        if let Some(column_order) = self.column_order {
            board.column_order = column_order;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub order: Option<i64>,
}

impl ColumnPatch {
    pub fn apply(self, column: &mut Column) {
        if let Some(name) = self.name {
            column.name = name;
        }
        if let Some(order) = self.order {
            column.order = order;
        }
    }
}

/// Card fields editable in place. Moving between columns goes through
/// `Workspace::move_card` so the board link stays consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub label_ids: Option<Vec<Id>>,
    pub owner: Option<String>,
    pub due: Option<String>,
    pub order: Option<i64>,
}

impl CardPatch {
    pub fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(label_ids) = self.label_ids {
            card.label_ids = label_ids;
        }
        if let Some(owner) = self.owner {
            card.owner = owner;
        }
        if let Some(due) = self.due {
            card.due = due;
        }
        if let Some(order) = self.order {
            card.order = order;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub summary: Option<String>,
    /// `Some(None)` unlinks the project from its board.
    pub board_id: Option<Option<Id>>,
    pub status: Option<ProjectStatus>,
    pub tag_ids: Option<Vec<Id>>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(summary) = self.summary {
            project.summary = summary;
        }
        if let Some(board_id) = self.board_id {
            project.board_id = board_id;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(tag_ids) = self.tag_ids {
            project.tag_ids = tag_ids;
        }
    }
}

/// Shared by notes and docs, which have the same editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tag_ids: Option<Vec<Id>>,
}

impl PagePatch {
    pub fn apply_to_note(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(body) = self.body {
            note.body = body;
        }
        if let Some(tag_ids) = self.tag_ids {
            note.tag_ids = tag_ids;
        }
    }

    pub fn apply_to_doc(self, doc: &mut Doc) {
        if let Some(title) = self.title {
            doc.title = title;
        }
        if let Some(body) = self.body {
            doc.body = body;
        }
        if let Some(tag_ids) = self.tag_ids {
            doc.tag_ids = tag_ids;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub color: Option<LabelColor>,
}

impl LabelPatch {
    pub fn apply(self, label: &mut Label) {
        if let Some(name) = self.name {
            label.name = name;
        }
        if let Some(color) = self.color {
            label.color = color;
        }
    }
}

/// Add `tag_id` to `ids` if missing, remove it if present.
pub fn toggle_tag(ids: &[Id], tag_id: &str) -> Vec<Id> {
    if ids.iter().any(|id| id == tag_id) {
        ids.iter().filter(|id| *id != tag_id).cloned().collect()
    } else {
        let mut toggled = ids.to_vec();
        toggled.push(tag_id.to_string());
        toggled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project {
            id: "project-1".to_string(),
            name: "Intel".to_string(),
            summary: "Daily scan".to_string(),
            board_id: Some("board-1".to_string()),
            status: ProjectStatus::Planning,
            tag_ids: vec!["label-a".to_string()],
            updated_at: "2025-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut p = project();
        ProjectPatch::default().apply(&mut p);
        assert_eq!(p, project());
    }

    #[test]
    fn patch_overwrites_only_named_fields() {
        let mut p = project();
        ProjectPatch {
            status: Some(ProjectStatus::Done),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.status, ProjectStatus::Done);
        assert_eq!(p.name, "Intel");
        assert_eq!(p.board_id.as_deref(), Some("board-1"));
    }

    #[test]
    fn nested_none_unlinks_board() {
        let mut p = project();
        ProjectPatch {
            board_id: Some(None),
            ..Default::default()
        }
        .apply(&mut p);
        assert_eq!(p.board_id, None);
    }

    #[test]
    fn toggle_tag_adds_then_removes() {
        let ids = vec!["label-a".to_string()];
        let added = toggle_tag(&ids, "label-b");
        assert_eq!(added, vec!["label-a", "label-b"]);
        let removed = toggle_tag(&added, "label-a");
        assert_eq!(removed, vec!["label-b"]);
    }
}
