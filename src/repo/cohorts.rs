//! Cohort repository
//!
//! CRUD over the `cohorts` collection.

use tracing::debug;

use crate::models::{Cohort, CohortFields, CohortPatch};
use crate::repo::{decode, decode_all, encode, COHORTS};
use crate::store::{Database, ObjectId, StoreResult};

/// Cohort repository
pub struct CohortRepo<'a> {
    db: &'a Database,
}

impl<'a> CohortRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every cohort, in store order.
    pub async fn list(&self) -> StoreResult<Vec<Cohort>> {
        let docs = self.db.find_all(COHORTS).await?;
        debug!(count = docs.len(), "Retrieved cohorts");
        decode_all(COHORTS, docs)
    }

    /// The cohort with the given id, if any.
    pub async fn get(&self, id: ObjectId) -> StoreResult<Option<Cohort>> {
        self.db
            .find_by_id(COHORTS, id)
            .await?
            .map(|doc| decode(COHORTS, doc))
            .transpose()
    }

    /// Stores a new cohort. Fields must already be validated.
    pub async fn create(&self, fields: &CohortFields) -> StoreResult<Cohort> {
        let doc = encode(COHORTS, fields)?;
        let stored = self.db.insert_one(COHORTS, doc).await?;
        decode(COHORTS, stored)
    }

    /// Merges the patch into the cohort. `None` when the id is absent.
    pub async fn update(&self, id: ObjectId, patch: &CohortPatch) -> StoreResult<Option<Cohort>> {
        let changes = encode(COHORTS, patch)?;
        self.db
            .update_by_id(COHORTS, id, changes)
            .await?
            .map(|doc| decode(COHORTS, doc))
            .transpose()
    }

    /// Removes the cohort. Students referencing it are left untouched.
    pub async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        self.db.delete_by_id(COHORTS, id).await
    }
}
