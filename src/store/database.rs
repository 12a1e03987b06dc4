//! Database Module
//!
//! Document store handle backed by SQLite through a sqlx pool. Every
//! collection is a table of `(id, doc)` rows where `doc` is the JSON text
//! of the document.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use tracing::{debug, info};

use crate::store::{Document, ObjectId, StoreError, StoreResult, ID_FIELD};

// == Constants ==
/// Pool size for file-backed databases
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const MEMORY_URL: &str = "sqlite::memory:";

// == Store Config ==
/// Which database to open and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Logical database name, reported by the health check
    pub name: String,
    /// SQLite connection URL; `None` opens a private in-memory database
    pub url: Option<String>,
}

impl StoreConfig {
    /// Private in-memory database with the given name.
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    /// Database at the given SQLite URL, e.g. `sqlite://data/school.db`.
    pub fn sqlite(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
        }
    }
}

// == Database ==
/// Shared handle to the document store.
///
/// Cloning is cheap and every clone uses the same pool. Once
/// [`Database::shutdown`] has run, all clones fail with [`StoreError::Closed`].
#[derive(Debug, Clone)]
pub struct Database {
    name: Arc<str>,
    persistent: bool,
    pool: SqlitePool,
}

impl Database {
    // == Lifecycle ==
    /// Opens the connection pool.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let pool = match &config.url {
            Some(url) => {
                let options = SqliteConnectOptions::from_str(url)?
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(Duration::from_secs(5));

                SqlitePoolOptions::new()
                    .max_connections(DEFAULT_MAX_CONNECTIONS)
                    .connect_with(options)
                    .await?
            }
            // The in-memory database lives as long as its single connection
            None => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(SqliteConnectOptions::from_str(MEMORY_URL)?)
                    .await?
            }
        };

        let persistent = config.url.is_some();
        info!(database = %config.name, persistent, "Connected to database");

        Ok(Self {
            name: Arc::from(config.name.as_str()),
            persistent,
            pool,
        })
    }

    /// Closes the pool, waiting for checked-out connections. Closing twice
    /// is a no-op.
    pub async fn shutdown(&self) -> StoreResult<()> {
        if self.pool.is_closed() {
            return Ok(());
        }

        self.pool.close().await;
        info!(database = %self.name, "Database connection closed");
        Ok(())
    }

    /// Returns true once the handle has been shut down.
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    /// Database name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the data outlives the process.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Creates the collection's table on first use and returns its quoted name.
    async fn collection(&self, collection: &str) -> StoreResult<String> {
        let valid = collection
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }

        let table = format!("\"{}\"", collection);
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY NOT NULL, doc TEXT NOT NULL)",
            table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(table)
    }

    // == Queries ==
    /// Every document in the collection, ordered by id.
    pub async fn find_all(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let table = self.collection(collection).await?;
        let sql = format!("SELECT id, doc FROM {} ORDER BY id", table);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(|row| read_row(collection, row)).collect()
    }

    /// The document with the given id, if any.
    pub async fn find_by_id(&self, collection: &str, id: ObjectId) -> StoreResult<Option<Document>> {
        let table = self.collection(collection).await?;
        let sql = format!("SELECT id, doc FROM {} WHERE id = ?", table);
        let row = sqlx::query(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| read_row(collection, &row)).transpose()
    }

    /// Every document whose top-level `field` equals `value`, ordered by id.
    pub async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let table = self.collection(collection).await?;
        // Both sides go through json_extract so strings, numbers and null
        // compare the same way
        let sql = format!(
            "SELECT id, doc FROM {} WHERE json_extract(doc, ?) IS json_extract(?, '$') ORDER BY id",
            table
        );
        let rows = sqlx::query(&sql)
            .bind(json_path(field))
            .bind(serde_json::to_string(value)?)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|row| read_row(collection, row)).collect()
    }

    // == Writes ==
    /// Stores a new document under a freshly generated id and returns it.
    ///
    /// Any `_id` in the input is replaced.
    pub async fn insert_one(&self, collection: &str, mut doc: Document) -> StoreResult<Document> {
        let table = self.collection(collection).await?;
        let id = ObjectId::new();
        doc.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));

        let sql = format!("INSERT INTO {} (id, doc) VALUES (?, ?)", table);
        sqlx::query(&sql)
            .bind(id.to_hex())
            .bind(serde_json::to_string(&doc)?)
            .execute(&self.pool)
            .await?;

        debug!(collection, id = %id, "Inserted document");
        Ok(doc)
    }

    /// Merges `changes` into the document's top-level fields. A `null`
    /// value is written as `null`.
    ///
    /// Returns the updated document, or `None` when the id is absent.
    /// The `_id` field is never overwritten.
    pub async fn update_by_id(
        &self,
        collection: &str,
        id: ObjectId,
        changes: Document,
    ) -> StoreResult<Option<Document>> {
        let table = self.collection(collection).await?;
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT id, doc FROM {} WHERE id = ?", table);
        let Some(row) = sqlx::query(&select)
            .bind(id.to_hex())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut doc = read_row(collection, &row)?;
        for (field, value) in changes {
            if field != ID_FIELD {
                doc.insert(field, value);
            }
        }

        let update = format!("UPDATE {} SET doc = ? WHERE id = ?", table);
        sqlx::query(&update)
            .bind(serde_json::to_string(&doc)?)
            .bind(id.to_hex())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(collection, id = %id, "Updated document");
        Ok(Some(doc))
    }

    /// Removes the document. Returns whether anything was removed.
    pub async fn delete_by_id(&self, collection: &str, id: ObjectId) -> StoreResult<bool> {
        let table = self.collection(collection).await?;
        let sql = format!("DELETE FROM {} WHERE id = ?", table);
        let result = sqlx::query(&sql)
            .bind(id.to_hex())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// == Row Decoding ==
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

fn read_row(collection: &str, row: &SqliteRow) -> StoreResult<Document> {
    let id: String = row.try_get("id")?;
    let text: String = row.try_get("doc")?;

    let corrupt = |reason: String| StoreError::Corrupt {
        collection: collection.to_string(),
        id: id.clone(),
        reason,
    };

    let mut doc = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(doc)) => doc,
        Ok(other) => return Err(corrupt(format!("expected a JSON object, got {}", other))),
        Err(e) => return Err(corrupt(e.to_string())),
    };
    doc.insert(ID_FIELD.to_string(), Value::String(id));
    Ok(doc)
}
