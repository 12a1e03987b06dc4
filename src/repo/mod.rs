//! Repository Module
//!
//! Typed access to the `cohorts` and `students` collections. Repositories
//! borrow the shared [`Database`](crate::store::Database) handle and convert
//! between stored documents and entity structs.

mod cohorts;
mod students;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{Document, StoreError, StoreResult, ID_FIELD};

pub use cohorts::CohortRepo;
pub use students::StudentRepo;

// == Collection Names ==
/// Collection holding cohorts
pub const COHORTS: &str = "cohorts";

/// Collection holding students
pub const STUDENTS: &str = "students";

/// Turns an entity (or patch) into a document.
fn encode<T: Serialize>(collection: &str, value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(doc) => Ok(doc),
        other => Err(StoreError::Corrupt {
            collection: collection.to_string(),
            id: "<new>".to_string(),
            reason: format!("expected a JSON object, got {}", other),
        }),
    }
}

/// Turns a stored document back into its entity.
fn decode<T: DeserializeOwned>(collection: &str, doc: Document) -> StoreResult<T> {
    let id = doc
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .unwrap_or("<missing>")
        .to_string();

    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Corrupt {
        collection: collection.to_string(),
        id,
        reason: e.to_string(),
    })
}

fn decode_all<T: DeserializeOwned>(collection: &str, docs: Vec<Document>) -> StoreResult<Vec<T>> {
    docs.into_iter().map(|doc| decode(collection, doc)).collect()
}
