//! Tests for the lifecycle operations.

use crate::db::seed::SEED_BOARD_ID;
use crate::db::{
    Board, BoardPatch, Card, CardPatch, CascadeSummary, Collection, Column, ColumnPatch, DbError,
    Doc, Index, Label, LabelColor, LabelPatch, Note, PagePatch, Project, ProjectPatch,
    ProjectStatus, SqliteStore, Store, Workspace,
};

const LONG_AGO: &str = "2000-01-01T00:00:00.000Z";

async fn seeded() -> Workspace<SqliteStore> {
    let workspace = Workspace::new(SqliteStore::in_memory());
    workspace
        .seed_if_needed()
        .await
        .expect("Seed should succeed");
    workspace
}

fn empty() -> Workspace<SqliteStore> {
    Workspace::new(SqliteStore::in_memory())
}

#[tokio::test(flavor = "multi_thread")]
async fn add_board_defaults_blank_name_to_next_number() {
    let ws = seeded().await;

    let board = ws.add_board("   ").await.expect("Add board should succeed");
    assert_eq!(board.name, "Board 2");
    assert!(board.id.starts_with("board-"));
    assert!(board.column_order.is_empty());
    assert_eq!(board.created_at, board.updated_at);

    let named = ws.add_board(" Sprint 9 ").await.unwrap();
    assert_eq!(named.name, "Sprint 9");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_board_refreshes_updated_at() {
    let ws = empty();
    let board = ws.add_board("Old").await.unwrap();

    let updated = ws
        .update_board(
            &board.id,
            BoardPatch {
                name: Some("New".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(updated.name, "New");
    assert_eq!(updated.created_at, board.created_at);
    assert!(updated.updated_at >= board.updated_at);

    let stored: Board = ws.store().get_by_id(&board.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_record_is_not_found() {
    let ws = empty();
    let result = ws.update_board("board-nope", BoardPatch::default()).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let result = ws.update_label("label-nope", LabelPatch::default()).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_column_appends_to_board_order() {
    let ws = empty();
    let board = ws.add_board("Sprint").await.unwrap();

    let first = ws.add_column(&board.id, "Todo").await.unwrap();
    let second = ws.add_column(&board.id, "Done").await.unwrap();

    assert_eq!(first.order, 1);
    assert_eq!(second.order, 2);
    assert_eq!(second.board_id, board.id);

    let stored: Board = ws.store().get_by_id(&board.id).await.unwrap().unwrap();
    assert_eq!(stored.column_order, vec![first.id, second.id]);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_column_rejects_blank_name_and_missing_board() {
    let ws = empty();
    let board = ws.add_board("Sprint").await.unwrap();

    let blank = ws.add_column(&board.id, "  ").await;
    assert!(matches!(blank, Err(DbError::Validation { .. })));

    let orphan = ws.add_column("board-missing", "Todo").await;
    assert!(matches!(orphan, Err(DbError::NotFound { .. })));
    assert_eq!(ws.store().count(Collection::Columns).await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn card_added_to_column_with_two_cards_gets_order_three() {
    let ws = seeded().await;

    let card = ws
        .add_card("col-today", "Third")
        .await
        .expect("Add card should succeed");

    assert_eq!(card.order, 3);
    assert_eq!(card.board_id, SEED_BOARD_ID);
    assert_eq!(card.column_id, "col-today");
}

#[tokio::test(flavor = "multi_thread")]
async fn add_card_defaults_blank_title() {
    let ws = seeded().await;
    let card = ws.add_card("col-backlog", "").await.unwrap();
    assert_eq!(card.title, "New task");
    assert!(card.label_ids.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn add_card_to_missing_column_is_not_found() {
    let ws = empty();
    let result = ws.add_card("col-missing", "Orphan").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_card_keeps_placement() {
    let ws = seeded().await;
    let updated = ws
        .update_card(
            "card-intel-2",
            CardPatch {
                owner: Some("Rin".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.owner, "Rin");
    assert_eq!(updated.column_id, "col-today");
    assert_eq!(updated.title, "Daily scan + shortlist");
}

#[tokio::test(flavor = "multi_thread")]
async fn toggle_card_label_attaches_then_detaches() {
    let ws = seeded().await;

    let tagged = ws
        .toggle_card_label("card-intel-1", "label-publish")
        .await
        .unwrap();
    assert_eq!(tagged.label_ids, vec!["label-sources", "label-publish"]);

    let untagged = ws
        .toggle_card_label("card-intel-1", "label-sources")
        .await
        .unwrap();
    assert_eq!(untagged.label_ids, vec!["label-publish"]);

    let unknown = ws.toggle_card_label("card-intel-1", "label-missing").await;
    assert!(matches!(unknown, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn move_card_goes_to_end_of_target_and_adopts_board() {
    let ws = seeded().await;
    let other = ws.add_board("Other").await.unwrap();
    let target = ws.add_column(&other.id, "Inbox").await.unwrap();
    ws.add_card(&target.id, "Existing").await.unwrap();

    let moved = ws
        .move_card("card-intel-1", &target.id)
        .await
        .expect("Move should succeed");

    assert_eq!(moved.column_id, target.id);
    assert_eq!(moved.board_id, other.id);
    assert_eq!(moved.order, 2);

    let backlog: Vec<Card> = ws
        .store()
        .get_by_index(Index::ColumnId, "col-backlog")
        .await
        .unwrap();
    assert!(backlog.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn move_card_within_same_column_does_not_count_itself() {
    let ws = seeded().await;
    let moved = ws.move_card("card-intel-2", "col-today").await.unwrap();
    assert_eq!(moved.order, 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn add_project_validates_name_and_board() {
    let ws = seeded().await;

    let blank = ws.add_project(" ", "", None).await;
    assert!(matches!(blank, Err(DbError::Validation { .. })));

    let dangling = ws.add_project("Intel", "", Some("board-missing")).await;
    assert!(matches!(dangling, Err(DbError::NotFound { .. })));

    let project = ws
        .add_project("Intel 2", "Second pass", Some(SEED_BOARD_ID))
        .await
        .expect("Add project should succeed");
    assert_eq!(project.status, ProjectStatus::Planning);
    assert_eq!(project.board_id.as_deref(), Some(SEED_BOARD_ID));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_project_can_unlink_but_not_dangle() {
    let ws = seeded().await;

    let dangling = ws
        .update_project(
            "project-ai-intel",
            ProjectPatch {
                board_id: Some(Some("board-missing".to_string())),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(dangling, Err(DbError::NotFound { .. })));

    let unlinked = ws
        .update_project(
            "project-ai-intel",
            ProjectPatch {
                board_id: Some(None),
                status: Some(ProjectStatus::Paused),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unlinked.board_id, None);
    assert_eq!(unlinked.status, ProjectStatus::Paused);
}

#[tokio::test(flavor = "multi_thread")]
async fn notes_and_docs_start_untitled() {
    let ws = empty();

    let note = ws.add_note().await.unwrap();
    assert_eq!(note.title, "Untitled note");
    let doc = ws.add_doc().await.unwrap();
    assert_eq!(doc.title, "Untitled doc");

    let edited = ws
        .update_note(
            &note.id,
            PagePatch {
                body: Some("Findings".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.body, "Findings");
    assert_eq!(edited.title, "Untitled note");

    ws.delete_doc(&doc.id).await.unwrap();
    let gone: Option<Doc> = ws.store().get_by_id(&doc.id).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn add_label_requires_name() {
    let ws = empty();
    let blank = ws.add_label("", LabelColor::Rose).await;
    assert!(matches!(blank, Err(DbError::Validation { .. })));

    let label = ws.add_label("Urgent", LabelColor::Rose).await.unwrap();
    assert!(label.id.starts_with("label-"));
    assert_eq!(label.color, LabelColor::Rose);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_board_cascades_and_unlinks_project() {
    let ws = seeded().await;

    let summary = ws
        .delete_board(SEED_BOARD_ID)
        .await
        .expect("Delete board should succeed");

    assert_eq!(summary.removed(Collection::Boards), 1);
    assert_eq!(summary.removed(Collection::Columns), 4);
    assert_eq!(summary.removed(Collection::Cards), 5);
    assert_eq!(summary.rewritten(Collection::Projects), 1);

    let store = ws.store();
    let columns: Vec<Column> = store
        .get_by_index(Index::BoardId, SEED_BOARD_ID)
        .await
        .unwrap();
    assert!(columns.is_empty());
    let cards: Vec<Card> = store.get_all().await.unwrap();
    assert!(cards.is_empty());

    let project: Project = store
        .get_by_id("project-ai-intel")
        .await
        .unwrap()
        .expect("Project should survive");
    assert_eq!(project.board_id, None);

    // Unrelated collections are untouched.
    assert_eq!(store.count(Collection::Labels).await.unwrap(), 5);
    assert_eq!(store.count(Collection::Notes).await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_board_removes_cards_whose_board_id_drifted() {
    let ws = empty();
    let board = ws.add_board("Sprint").await.unwrap();
    let column = ws.add_column(&board.id, "Todo").await.unwrap();
    let mut card = ws.add_card(&column.id, "Stale").await.unwrap();
    card.board_id = "board-elsewhere".to_string();
    ws.store().put(&card).await.unwrap();

    ws.delete_board(&board.id).await.unwrap();

    let left: Option<Card> = ws.store().get_by_id(&card.id).await.unwrap();
    assert!(left.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_column_removes_cards_and_order_entry() {
    let ws = seeded().await;

    let summary = ws.delete_column("col-today").await.unwrap();
    assert_eq!(summary.removed(Collection::Cards), 2);

    let board: Board = ws
        .store()
        .get_by_id(SEED_BOARD_ID)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        board.column_order,
        vec!["col-backlog", "col-review", "col-published"]
    );

    let today: Vec<Card> = ws
        .store()
        .get_by_index(Index::ColumnId, "col-today")
        .await
        .unwrap();
    assert!(today.is_empty());
    assert_eq!(ws.store().count(Collection::Cards).await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_label_strips_references_everywhere() {
    let ws = seeded().await;

    let summary = ws.delete_label("label-summary").await.unwrap();
    assert_eq!(summary.removed(Collection::Labels), 1);
    assert_eq!(summary.rewritten(Collection::Cards), 1);
    assert_eq!(summary.rewritten(Collection::Projects), 1);
    assert_eq!(summary.rewritten(Collection::Notes), 1);
    assert_eq!(summary.rewritten(Collection::Docs), 0);

    let store = ws.store();
    let card: Card = store.get_by_id("card-intel-4").await.unwrap().unwrap();
    assert!(card.label_ids.is_empty());

    let project: Project = store.get_by_id("project-ai-intel").await.unwrap().unwrap();
    assert_eq!(project.tag_ids, vec!["label-scan"]);

    let note: Note = store.get_by_id("note-daily-intel").await.unwrap().unwrap();
    assert!(note.tag_ids.is_empty());

    let doc: Doc = store.get_by_id("doc-sources").await.unwrap().unwrap();
    assert_eq!(doc.tag_ids, vec!["label-sources"]);

    let label: Option<Label> = store.get_by_id("label-summary").await.unwrap();
    assert!(label.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn deletes_of_absent_entities_are_no_ops() {
    let ws = seeded().await;
    let before = ws.snapshot().await.unwrap();

    let board = ws.delete_board("board-missing").await.unwrap();
    let column = ws.delete_column("col-missing").await.unwrap();
    let label = ws.delete_label("label-missing").await.unwrap();
    assert_eq!(board, CascadeSummary::default());
    assert_eq!(column, CascadeSummary::default());
    assert_eq!(label, CascadeSummary::default());

    ws.delete_card("card-missing").await.unwrap();
    ws.delete_project("project-missing").await.unwrap();
    ws.delete_note("note-missing").await.unwrap();

    assert_eq!(ws.snapshot().await.unwrap(), before);
}

#[tokio::test(flavor = "multi_thread")]
async fn board_view_resolves_columns_and_sorts_cards() {
    let ws = seeded().await;
    ws.update_board(
        SEED_BOARD_ID,
        BoardPatch {
            column_order: Some(vec!["col-review".to_string(), "col-backlog".to_string()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    ws.update_card(
        "card-intel-2",
        CardPatch {
            order: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let view = ws
        .board_view(SEED_BOARD_ID)
        .await
        .unwrap()
        .expect("Board should exist");

    let names: Vec<&str> = view.columns.iter().map(|c| c.column.name.as_str()).collect();
    assert_eq!(names, vec!["Review", "Backlog", "Today", "Published"]);

    let today = &view.columns[2];
    let ids: Vec<&str> = today.cards.iter().map(|k| k.id.as_str()).collect();
    assert_eq!(ids, vec!["card-intel-3", "card-intel-2"]);

    assert!(ws.board_view("board-missing").await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn snapshot_loads_every_collection() {
    let ws = seeded().await;
    let snapshot = ws.snapshot().await.unwrap();
    assert_eq!(snapshot.boards.len(), 1);
    assert_eq!(snapshot.columns.len(), 4);
    assert_eq!(snapshot.cards.len(), 5);
    assert_eq!(snapshot.projects.len(), 1);
    assert_eq!(snapshot.notes.len(), 1);
    assert_eq!(snapshot.docs.len(), 1);
    assert_eq!(snapshot.labels.len(), 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn sprint_board_survives_deleting_seed_board() {
    let ws = seeded().await;
    let boards: Vec<Board> = ws.store().get_all().await.unwrap();
    assert_eq!(boards.len(), 1);

    let sprint = ws.add_board("Sprint 9").await.unwrap();
    let boards: Vec<Board> = ws.store().get_all().await.unwrap();
    assert_eq!(boards.len(), 2);

    ws.delete_board(SEED_BOARD_ID).await.unwrap();

    let boards: Vec<Board> = ws.store().get_all().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, sprint.id);
    assert_eq!(boards[0].name, "Sprint 9");

    let columns: Vec<Column> = ws.store().get_all().await.unwrap();
    assert!(columns.iter().all(|c| c.board_id != SEED_BOARD_ID));
    let cards: Vec<Card> = ws.store().get_all().await.unwrap();
    assert!(cards.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn reset_restores_seed_after_edits() {
    let ws = seeded().await;
    ws.delete_board(SEED_BOARD_ID).await.unwrap();
    ws.add_board("Scratch").await.unwrap();

    ws.reset().await.expect("Reset should succeed");

    let boards: Vec<Board> = ws.store().get_all().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, SEED_BOARD_ID);
    assert_eq!(ws.store().count(Collection::Cards).await.unwrap(), 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_column_renames_and_reorders() {
    let ws = seeded().await;

    let column = ws
        .update_column(
            "col-review",
            ColumnPatch {
                name: Some("  In review ".to_string()),
                order: Some(9),
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(column.name, "In review");
    assert_eq!(column.order, 9);
    assert_eq!(column.board_id, SEED_BOARD_ID);

    let stored: Column = ws.store().get_by_id("col-review").await.unwrap().unwrap();
    assert_eq!(stored, column);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_label_changes_name_and_color() {
    let ws = seeded().await;

    let label = ws
        .update_label(
            "label-scan",
            LabelPatch {
                name: Some("Scanning".to_string()),
                color: Some(LabelColor::Teal),
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(label.name, "Scanning");
    assert_eq!(label.color, LabelColor::Teal);
    let stored: Label = ws.store().get_by_id("label-scan").await.unwrap().unwrap();
    assert_eq!(stored, label);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_doc_merges_patch() {
    let ws = seeded().await;

    let doc = ws
        .update_doc(
            "doc-sources",
            PagePatch {
                title: Some("Sources".to_string()),
                tag_ids: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .expect("Update should succeed");

    assert_eq!(doc.title, "Sources");
    assert!(doc.tag_ids.is_empty());
    assert_eq!(
        doc.body,
        "List target subreddits, filters, and ranking criteria here."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn updates_refresh_updated_at() {
    let ws = seeded().await;
    let store = ws.store();

    let mut card: Card = store.get_by_id("card-intel-1").await.unwrap().unwrap();
    card.updated_at = LONG_AGO.to_string();
    store.put(&card).await.unwrap();
    let mut project: Project = store.get_by_id("project-ai-intel").await.unwrap().unwrap();
    project.updated_at = LONG_AGO.to_string();
    store.put(&project).await.unwrap();
    let mut note: Note = store.get_by_id("note-daily-intel").await.unwrap().unwrap();
    note.updated_at = LONG_AGO.to_string();
    store.put(&note).await.unwrap();
    let mut doc: Doc = store.get_by_id("doc-sources").await.unwrap().unwrap();
    doc.updated_at = LONG_AGO.to_string();
    store.put(&doc).await.unwrap();

    let card = ws
        .update_card("card-intel-1", CardPatch::default())
        .await
        .unwrap();
    let project = ws
        .update_project("project-ai-intel", ProjectPatch::default())
        .await
        .unwrap();
    let note = ws
        .update_note("note-daily-intel", PagePatch::default())
        .await
        .unwrap();
    let doc = ws
        .update_doc("doc-sources", PagePatch::default())
        .await
        .unwrap();

    for updated_at in [
        &card.updated_at,
        &project.updated_at,
        &note.updated_at,
        &doc.updated_at,
    ] {
        assert!(updated_at.as_str() > LONG_AGO, "{} was not refreshed", updated_at);
    }

    let stored: Card = store.get_by_id("card-intel-1").await.unwrap().unwrap();
    assert_eq!(stored.updated_at, card.updated_at);
    assert_eq!(stored.created_at, card.created_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn updates_reject_blank_names() {
    let ws = seeded().await;

    let column = ws
        .update_column(
            "col-today",
            ColumnPatch {
                name: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(column, Err(DbError::Validation { .. })));

    let project = ws
        .update_project(
            "project-ai-intel",
            ProjectPatch {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(project, Err(DbError::Validation { .. })));

    let label = ws
        .update_label(
            "label-scan",
            LabelPatch {
                name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(label, Err(DbError::Validation { .. })));

    let board = ws
        .update_board(
            SEED_BOARD_ID,
            BoardPatch {
                name: Some("".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(board, Err(DbError::Validation { .. })));

    let stored: Column = ws.store().get_by_id("col-today").await.unwrap().unwrap();
    assert_eq!(stored.name, "Today");
}
