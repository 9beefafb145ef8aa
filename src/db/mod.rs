//! Workspace persistence layer.
//!
//! Storage is reached through the [`Store`] trait so the lifecycle logic in
//! [`Workspace`] does not depend on a concrete backend. [`SqliteStore`] is the
//! shipped implementation.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `schema`: Collection and index registry
//! - `models`: Domain entities (Board, Column, Card, Project, Note, Doc, Label)
//! - `repository`: `Record`, `WriteBatch` and the `Store` trait
//! - `sqlite`: SQLite implementation of `Store`
//! - `seed`: Default dataset for an empty workspace
//! - `cascade`: Delete plans spanning several collections
//! - `workspace`: Lifecycle operations over a `Store`

pub mod cascade;
mod error;
mod models;
pub mod ordering;
pub mod patch;
mod repository;
pub mod schema;
pub mod seed;
pub mod sqlite;
pub mod utils;
mod workspace;

#[cfg(test)]
mod workspace_test;

pub use cascade::CascadeSummary;
pub use error::{DbError, DbResult};
pub use models::*;
pub use patch::{BoardPatch, CardPatch, ColumnPatch, LabelPatch, PagePatch, ProjectPatch};
pub use repository::*;
pub use schema::{Collection, Index};
pub use sqlite::SqliteStore;
pub use workspace::Workspace;
