//! SQLite implementation of the [`Store`] gateway.
//!
//! Each collection is a table of `(id, data)` rows where `data` is the JSON
//! document. Indexed reads filter on the same `json_extract` expression the
//! schema indexes, so SQLite answers them from the index.

use tracing::{debug, instrument};

use super::connection::SqliteStore;
use crate::db::schema::{Collection, Index, index_expr};
use crate::db::{DbError, DbResult, Record, Store, WriteBatch, WriteOp};

fn db_err(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

fn decode<R: Record>(id: &str, data: &str) -> DbResult<R> {
    serde_json::from_str(data).map_err(|e| DbError::InvalidData {
        message: format!("{} record '{}' could not be decoded: {}", R::COLLECTION, id, e),
        help: "The stored document does not match the current record layout; \
               reset the workspace or remove the record"
            .to_string(),
    })
}

fn decode_rows<R: Record>(rows: Vec<(String, String)>) -> DbResult<Vec<R>> {
    rows.iter().map(|(id, data)| decode(id, data)).collect()
}

impl Store for SqliteStore {
    async fn get_all<R: Record>(&self) -> DbResult<Vec<R>> {
        let pool = self.connection().await?;
        let sql = format!("SELECT id, data FROM {} ORDER BY id", R::COLLECTION);
        let rows: Vec<(String, String)> = sqlx::query_as(&sql)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;
        decode_rows(rows)
    }

    async fn get_by_id<R: Record>(&self, id: &str) -> DbResult<Option<R>> {
        let pool = self.connection().await?;
        let sql = format!("SELECT data FROM {} WHERE id = ?", R::COLLECTION);
        let data: Option<String> = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
        data.map(|data| decode(id, &data)).transpose()
    }

    async fn get_by_index<R: Record>(&self, index: Index, value: &str) -> DbResult<Vec<R>> {
        let schema = R::COLLECTION.schema();
        if !schema.has_index(index) {
            return Err(DbError::validation(format!(
                "collection '{}' has no '{}' index",
                R::COLLECTION,
                index
            )));
        }

        let pool = self.connection().await?;
        let sql = format!(
            "SELECT id, data FROM {} WHERE {} = ? ORDER BY id",
            R::COLLECTION,
            index_expr(index)
        );
        let rows: Vec<(String, String)> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_all(pool)
            .await
            .map_err(db_err)?;
        decode_rows(rows)
    }

    async fn count(&self, collection: Collection) -> DbResult<usize> {
        let pool = self.connection().await?;
        let sql = format!("SELECT COUNT(*) FROM {}", collection);
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(pool)
            .await
            .map_err(db_err)?;
        Ok(count as usize)
    }

    #[instrument(skip_all, fields(ops = batch.len()))]
    async fn apply(&self, batch: WriteBatch) -> DbResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let pool = self.connection().await?;
        let mut tx = pool.begin().await.map_err(db_err)?;

        for op in batch.ops() {
            match op {
                WriteOp::Put {
                    collection,
                    id,
                    data,
                } => {
                    let sql = format!(
                        "INSERT INTO {} (id, data) VALUES (?, ?) \
                         ON CONFLICT(id) DO UPDATE SET data = excluded.data",
                        collection
                    );
                    sqlx::query(&sql)
                        .bind(id)
                        .bind(data)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                }
                WriteOp::Delete { collection, id } => {
                    let sql = format!("DELETE FROM {} WHERE id = ?", collection);
                    sqlx::query(&sql)
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                }
                WriteOp::Clear { collection } => {
                    let sql = format!("DELETE FROM {}", collection);
                    sqlx::query(&sql)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                }
            }
        }

        tx.commit().await.map_err(db_err)?;
        debug!("write batch committed");
        Ok(())
    }
}
