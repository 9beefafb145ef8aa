//! Default workspace written on first run.
//!
//! The seed dataset is one coherent workspace: a board with four ordered
//! columns, a matching label set, cards spread over the columns, a project
//! linked to the board, a note and a doc. It is only written when the boards
//! collection is empty, so user data is never overwritten.

use tracing::{debug, info, instrument};

use crate::db::utils::current_timestamp;
use crate::db::{
    Board, Card, Collection, Column, DbResult, Doc, Label, LabelColor, Note, Project,
    ProjectStatus, Store, WriteBatch,
};

pub const SEED_BOARD_ID: &str = "board-ai-intel";
pub const SEED_BOARD_NAME: &str = "Daily AI Subreddit Intel";

/// The default dataset, stamped with `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub boards: Vec<Board>,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
    pub projects: Vec<Project>,
    pub notes: Vec<Note>,
    pub docs: Vec<Doc>,
    pub labels: Vec<Label>,
}

impl SeedData {
    pub fn new(now: &str) -> Self {
        let board_id = SEED_BOARD_ID.to_string();

        let columns: Vec<Column> = [
            ("col-backlog", "Backlog"),
            ("col-today", "Today"),
            ("col-review", "Review"),
            ("col-published", "Published"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, name))| Column {
            id: id.to_string(),
            board_id: board_id.clone(),
            name: name.to_string(),
            order: i as i64 + 1,
        })
        .collect();

        let labels = [
            ("label-sources", "Sources", LabelColor::Blue),
            ("label-scan", "Scan", LabelColor::Cyan),
            ("label-extract", "Extract", LabelColor::Purple),
            ("label-summary", "Summary", LabelColor::Green),
            ("label-publish", "Publish", LabelColor::Amber),
        ]
        .into_iter()
        .map(|(id, name, color)| Label {
            id: id.to_string(),
            name: name.to_string(),
            color,
        })
        .collect();

        let card = |id: &str,
                    column_id: &str,
                    title: &str,
                    description: &str,
                    label: &str,
                    owner: &str,
                    due: &str,
                    order: i64| Card {
            id: id.to_string(),
            board_id: board_id.clone(),
            column_id: column_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            label_ids: vec![label.to_string()],
            owner: owner.to_string(),
            due: due.to_string(),
            order,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        };

        let cards = vec![
            card(
                "card-intel-1",
                "col-backlog",
                "Define target subreddits",
                "Lock in the core AI/business/workflow subreddits and filters.",
                "label-sources",
                "Damian",
                "Today",
                1,
            ),
            card(
                "card-intel-2",
                "col-today",
                "Daily scan + shortlist",
                "Review top posts, shortlist 5–10 with high signal.",
                "label-scan",
                "Ex-Machina",
                "Daily",
                1,
            ),
            card(
                "card-intel-3",
                "col-today",
                "Extract insights + takeaways",
                "Summarize key insights and actionable takeaways.",
                "label-extract",
                "Ex-Machina",
                "Daily",
                2,
            ),
            card(
                "card-intel-4",
                "col-review",
                "Draft daily summary",
                "Write the final summary in Notes/Docs for review.",
                "label-summary",
                "Damian",
                "Daily",
                1,
            ),
            card(
                "card-intel-5",
                "col-published",
                "Share to Damian",
                "Send the daily intel summary once approved.",
                "label-publish",
                "Ex-Machina",
                "Daily",
                1,
            ),
        ];

        let boards = vec![Board {
            id: board_id.clone(),
            name: SEED_BOARD_NAME.to_string(),
            column_order: columns.iter().map(|c| c.id.clone()).collect(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }];

        let projects = vec![Project {
            id: "project-ai-intel".to_string(),
            name: SEED_BOARD_NAME.to_string(),
            summary: "Scan key AI subreddits daily, extract high-signal insights, \
                      and deliver a concise brief."
                .to_string(),
            board_id: Some(board_id.clone()),
            status: ProjectStatus::InProgress,
            tag_ids: vec!["label-scan".to_string(), "label-summary".to_string()],
            updated_at: now.to_string(),
        }];

        let notes = vec![Note {
            id: "note-daily-intel".to_string(),
            title: "Daily Findings (Today)".to_string(),
            body: "Drop today’s top insights here. Replace with date-stamped entries.".to_string(),
            tag_ids: vec!["label-summary".to_string()],
            updated_at: now.to_string(),
        }];

        let docs = vec![Doc {
            id: "doc-sources".to_string(),
            title: "Subreddit Sources & Filters".to_string(),
            body: "List target subreddits, filters, and ranking criteria here.".to_string(),
            tag_ids: vec!["label-sources".to_string()],
            updated_at: now.to_string(),
        }];

        Self {
            boards,
            columns,
            cards,
            projects,
            notes,
            docs,
            labels,
        }
    }

    /// Queue every seed record into `batch`.
    pub fn write_into(&self, batch: &mut WriteBatch) -> DbResult<()> {
        batch.put_all(&self.labels)?;
        batch.put_all(&self.boards)?;
        batch.put_all(&self.columns)?;
        batch.put_all(&self.cards)?;
        batch.put_all(&self.projects)?;
        batch.put_all(&self.notes)?;
        batch.put_all(&self.docs)?;
        Ok(())
    }
}

/// Write the seed dataset if, and only if, there are no boards yet.
///
/// Returns `true` when the dataset was written.
#[instrument(skip(store))]
pub async fn seed_if_needed<S: Store>(store: &S) -> DbResult<bool> {
    if store.count(Collection::Boards).await? > 0 {
        debug!("workspace already has boards, skipping seed");
        return Ok(false);
    }

    let mut batch = WriteBatch::new();
    SeedData::new(&current_timestamp()).write_into(&mut batch)?;
    store.apply(batch).await?;

    info!(board = SEED_BOARD_ID, "seeded default workspace");
    Ok(true)
}

/// Clear every collection and write the seed dataset, in one unit of work.
#[instrument(skip(store))]
pub async fn reset_seed<S: Store>(store: &S) -> DbResult<()> {
    let mut batch = WriteBatch::new();
    for collection in Collection::ALL {
        batch.clear(collection);
    }
    SeedData::new(&current_timestamp()).write_into(&mut batch)?;
    store.apply(batch).await?;

    info!("workspace reset to seed data");
    Ok(())
}
