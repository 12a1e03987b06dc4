//! Store Module
//!
//! Document store adapter: object ids, the shared SQLite-backed database
//! handle and the store error type.

mod database;
mod object_id;


use thiserror::Error;

// Re-export public types
pub use database::{Database, StoreConfig};
pub use object_id::{ObjectId, ObjectIdError, OBJECT_ID_HEX_LEN};

// == Public Constants ==
/// Name of the identifier field in every stored document
pub const ID_FIELD: &str = "_id";

/// A stored document: a JSON object with an `_id` field.
pub type Document = serde_json::Map<String, serde_json::Value>;

// == Store Error ==
/// Errors raised by the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The handle was used after shutdown
    #[error("store connection is closed")]
    Closed,

    /// The underlying database failed
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Collection name is not a plain identifier
    #[error("invalid collection name '{0}'")]
    InvalidCollection(String),

    /// Document could not be encoded or decoded
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document no longer has the expected shape
    #[error("corrupt document {id} in '{collection}': {reason}")]
    Corrupt {
        collection: String,
        id: String,
        reason: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed => StoreError::Closed,
            other => StoreError::Database(other),
        }
    }
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
