//! Domain models for the workspace store.
//!
//! Every entity is stored as one JSON document keyed by `id`. Field names are
//! camelCase on disk (`boardId`, `columnOrder`, `tagIds`, ...).

use serde::{Deserialize, Serialize};

use crate::db::repository::Record;
use crate::db::schema::Collection;

/// Prefix-tagged id, see [`crate::db::utils::make_id`].
pub type Id = String;

/// A kanban board. `column_order` lists column ids in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub column_order: Vec<Id>,
    pub created_at: String,
    pub updated_at: String,
}

/// A column on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Id,
    pub board_id: Id,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

/// A card inside a column. `board_id` mirrors the column's board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Id,
    pub board_id: Id,
    pub column_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub label_ids: Vec<Id>,
    #[serde(default)]
    pub owner: String,
    /// Free text: "Today", "Daily", a date.
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    /// Linked board, cleared when that board is deleted.
    #[serde(default)]
    pub board_id: Option<Id>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub tag_ids: Vec<Id>,
    pub updated_at: String,
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In progress")]
    InProgress,
    Paused,
    Done,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "Planning"),
            ProjectStatus::InProgress => write!(f, "In progress"),
            ProjectStatus::Paused => write!(f, "Paused"),
            ProjectStatus::Done => write!(f, "Done"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "in progress" | "in_progress" => Ok(ProjectStatus::InProgress),
            "paused" => Ok(ProjectStatus::Paused),
            "done" => Ok(ProjectStatus::Done),
            _ => Err(format!("Invalid project status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tag_ids: Vec<Id>,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tag_ids: Vec<Id>,
    pub updated_at: String,
}

/// A label, shared by cards (as `labelIds`) and projects/notes/docs (as `tagIds`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: Id,
    pub name: String,
    pub color: LabelColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    #[default]
    Cyan,
    Purple,
    Blue,
    Green,
    Rose,
    Amber,
    Teal,
    Pink,
    Slate,
}

impl LabelColor {
    /// Colors offered for new labels. `Slate` is the neutral fallback only.
    pub const PALETTE: [LabelColor; 8] = [
        LabelColor::Cyan,
        LabelColor::Purple,
        LabelColor::Blue,
        LabelColor::Green,
        LabelColor::Rose,
        LabelColor::Amber,
        LabelColor::Teal,
        LabelColor::Pink,
    ];
}

impl std::fmt::Display for LabelColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LabelColor::Cyan => "cyan",
            LabelColor::Purple => "purple",
            LabelColor::Blue => "blue",
            LabelColor::Green => "green",
            LabelColor::Rose => "rose",
            LabelColor::Amber => "amber",
            LabelColor::Teal => "teal",
            LabelColor::Pink => "pink",
            LabelColor::Slate => "slate",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for LabelColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cyan" => Ok(LabelColor::Cyan),
            "purple" => Ok(LabelColor::Purple),
            "blue" => Ok(LabelColor::Blue),
            "green" => Ok(LabelColor::Green),
            "rose" => Ok(LabelColor::Rose),
            "amber" => Ok(LabelColor::Amber),
            "teal" => Ok(LabelColor::Teal),
            "pink" => Ok(LabelColor::Pink),
            "slate" => Ok(LabelColor::Slate),
            _ => Err(format!("Invalid label color: {}", s)),
        }
    }
}

// =============================================================================
// Record bindings
// =============================================================================

macro_rules! impl_record {
    ($($ty:ty => $collection:expr),+ $(,)?) => {
        $(
            impl Record for $ty {
                const COLLECTION: Collection = $collection;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record! {
    Board => Collection::Boards,
    Column => Collection::Columns,
    Card => Collection::Cards,
    Project => Collection::Projects,
    Note => Collection::Notes,
    Doc => Collection::Docs,
    Label => Collection::Labels,
}

/// Every record in the store, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub boards: Vec<Board>,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
    pub projects: Vec<Project>,
    pub notes: Vec<Note>,
    pub docs: Vec<Doc>,
    pub labels: Vec<Label>,
}

/// A board with its columns resolved into display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub board: Board,
    pub columns: Vec<ColumnView>,
}

/// A column and its cards sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub column: Column,
    pub cards: Vec<Card>,
}
