//! Store gateway contract.
//!
//! [`Store`] is the read/write surface every caller goes through. It is
//! collection-generic: the record type selects the collection through
//! [`Record::COLLECTION`]. Each call is one unit of work; [`WriteBatch`] lets
//! a caller group writes across collections into a single one.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::db::schema::{Collection, Index};
use crate::db::{DbError, DbResult};

/// A type stored as one document in a collection, keyed by its id.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

/// One write inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or fully replace the document stored under `id`.
    Put {
        collection: Collection,
        id: String,
        data: String,
    },
    /// Remove the document if present.
    Delete { collection: Collection, id: String },
    /// Remove every document in the collection.
    Clear { collection: Collection },
}

/// Ordered writes applied together as one unit of work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an upsert of `record`.
    pub fn put<R: Record>(&mut self, record: &R) -> DbResult<()> {
        let data = serde_json::to_string(record).map_err(|e| DbError::InvalidData {
            message: format!(
                "failed to encode {} record '{}': {}",
                R::COLLECTION,
                record.id(),
                e
            ),
            help: "This is a bug in the record type's serialization".to_string(),
        })?;
        self.ops.push(WriteOp::Put {
            collection: R::COLLECTION,
            id: record.id().to_string(),
            data,
        });
        Ok(())
    }

    pub fn put_all<'a, R: Record + 'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a R>,
    ) -> DbResult<()> {
        for record in records {
            self.put(record)?;
        }
        Ok(())
    }

    pub fn delete(&mut self, collection: Collection, id: impl Into<String>) {
        self.ops.push(WriteOp::Delete {
            collection,
            id: id.into(),
        });
    }

    pub fn clear(&mut self, collection: Collection) {
        self.ops.push(WriteOp::Clear { collection });
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// The local persistence gateway.
///
/// Implementations open their backing database lazily on first use and reuse
/// that connection afterwards.
#[allow(async_fn_in_trait)]
pub trait Store: Send + Sync {
    /// Every record of `R`'s collection, ordered by primary key.
    async fn get_all<R: Record>(&self) -> DbResult<Vec<R>>;

    /// The record stored under `id`, or `None`.
    async fn get_by_id<R: Record>(&self, id: &str) -> DbResult<Option<R>>;

    /// Records whose indexed field equals `value`.
    ///
    /// Fails with [`DbError::Validation`] if the collection declares no such
    /// index.
    async fn get_by_index<R: Record>(&self, index: Index, value: &str) -> DbResult<Vec<R>>;

    /// Insert or fully replace `record`.
    async fn put<R: Record>(&self, record: &R) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.put(record)?;
        self.apply(batch).await
    }

    /// Upsert many records in one unit of work.
    async fn bulk_put<R: Record>(&self, records: &[R]) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.put_all(records)?;
        self.apply(batch).await
    }

    /// Remove a record if present. Absent ids are not an error.
    async fn delete_by_id(&self, collection: Collection, id: &str) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.delete(collection, id);
        self.apply(batch).await
    }

    /// Remove every record in `collection`.
    async fn clear(&self, collection: Collection) -> DbResult<()> {
        let mut batch = WriteBatch::new();
        batch.clear(collection);
        self.apply(batch).await
    }

    /// Number of records in `collection`.
    async fn count(&self, collection: Collection) -> DbResult<usize>;

    /// Apply every write in `batch` atomically.
    async fn apply(&self, batch: WriteBatch) -> DbResult<()>;
}
