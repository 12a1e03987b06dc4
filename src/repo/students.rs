//! Student repository
//!
//! CRUD over the `students` collection plus the two cohort-aware reads:
//! populating each student's cohort and listing the students of a cohort.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Cohort, PopulatedStudent, Student, StudentFields, StudentPatch};
use crate::repo::{decode, decode_all, encode, CohortRepo, STUDENTS};
use crate::store::{Database, ObjectId, StoreResult};

/// Name of the reference field on student documents
const COHORT_FIELD: &str = "cohort";

/// Student repository
pub struct StudentRepo<'a> {
    db: &'a Database,
}

impl<'a> StudentRepo<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Every student, with the cohort populated.
    ///
    /// Each distinct cohort is looked up once.
    pub async fn list_populated(&self) -> StoreResult<Vec<PopulatedStudent>> {
        let students: Vec<Student> = decode_all(STUDENTS, self.db.find_all(STUDENTS).await?)?;
        debug!(count = students.len(), "Retrieved students");

        let cohorts = CohortRepo::new(self.db);
        let mut resolved: HashMap<ObjectId, Option<Cohort>> = HashMap::new();
        for cohort_id in students.iter().filter_map(|s| s.cohort_id()) {
            if !resolved.contains_key(&cohort_id) {
                resolved.insert(cohort_id, cohorts.get(cohort_id).await?);
            }
        }

        Ok(students
            .into_iter()
            .map(|student| {
                let cohort = student
                    .cohort_id()
                    .and_then(|id| resolved.get(&id).cloned().flatten());
                student.populate(cohort)
            })
            .collect())
    }

    /// The student with the given id and its cohort populated, if any.
    pub async fn get_populated(&self, id: ObjectId) -> StoreResult<Option<PopulatedStudent>> {
        let Some(student) = self.get(id).await? else {
            return Ok(None);
        };
        let cohort = self.resolve_cohort(&student).await?;
        Ok(Some(student.populate(cohort)))
    }

    /// The student with the given id, cohort left as a bare reference.
    pub async fn get(&self, id: ObjectId) -> StoreResult<Option<Student>> {
        self.db
            .find_by_id(STUDENTS, id)
            .await?
            .map(|doc| decode(STUDENTS, doc))
            .transpose()
    }

    /// Every student referencing the cohort. Empty when none do.
    pub async fn list_by_cohort(&self, cohort_id: ObjectId) -> StoreResult<Vec<Student>> {
        let value = Value::String(cohort_id.to_hex());
        let docs = self.db.find_by_field(STUDENTS, COHORT_FIELD, &value).await?;
        debug!(cohort = %cohort_id, count = docs.len(), "Retrieved cohort students");
        decode_all(STUDENTS, docs)
    }

    /// Stores a new student. The cohort reference is not checked.
    pub async fn create(&self, fields: &StudentFields) -> StoreResult<Student> {
        let doc = encode(STUDENTS, fields)?;
        let stored = self.db.insert_one(STUDENTS, doc).await?;
        decode(STUDENTS, stored)
    }

    /// Merges the patch into the student. `None` when the id is absent.
    pub async fn update(&self, id: ObjectId, patch: &StudentPatch) -> StoreResult<Option<Student>> {
        let changes = encode(STUDENTS, patch)?;
        self.db
            .update_by_id(STUDENTS, id, changes)
            .await?
            .map(|doc| decode(STUDENTS, doc))
            .transpose()
    }

    /// Removes the student.
    pub async fn delete(&self, id: ObjectId) -> StoreResult<bool> {
        self.db.delete_by_id(STUDENTS, id).await
    }

    async fn resolve_cohort(&self, student: &Student) -> StoreResult<Option<Cohort>> {
        let Some(cohort_id) = student.cohort_id() else {
            return Ok(None);
        };

        let cohort = CohortRepo::new(self.db).get(cohort_id).await?;
        if cohort.is_none() {
            warn!(student = %student.id, cohort = %cohort_id, "Dangling cohort reference");
        }
        Ok(cohort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CohortFields;
    use crate::store::StoreConfig;

    async fn memory_db() -> Database {
        Database::connect(&StoreConfig::in_memory("test")).await.unwrap()
    }

    fn student_in(cohort: Option<ObjectId>, first_name: &str) -> StudentFields {
        let mut fields = StudentFields::new(first_name, "Lopez", "ana@example.com");
        fields.cohort = cohort;
        fields
    }

    #[tokio::test]
    async fn test_get_populated_resolves_cohort() {
        let db = memory_db().await;
        let cohort = CohortRepo::new(&db)
            .create(&CohortFields::named("Web Dev Jan"))
            .await
            .unwrap();
        let repo = StudentRepo::new(&db);
        let student = repo
            .create(&student_in(Some(cohort.id), "Ana"))
            .await
            .unwrap();

        let populated = repo.get_populated(student.id).await.unwrap().unwrap();
        assert_eq!(populated.fields.cohort, Some(cohort));
        assert_eq!(populated.fields.first_name, "Ana");
    }

    #[tokio::test]
    async fn test_get_populated_with_deleted_cohort() {
        let db = memory_db().await;
        let cohorts = CohortRepo::new(&db);
        let cohort = cohorts.create(&CohortFields::named("gone")).await.unwrap();
        let repo = StudentRepo::new(&db);
        let student = repo
            .create(&student_in(Some(cohort.id), "Ana"))
            .await
            .unwrap();

        cohorts.delete(cohort.id).await.unwrap();

        let populated = repo.get_populated(student.id).await.unwrap().unwrap();
        assert!(populated.fields.cohort.is_none());

        // The stored reference itself is untouched
        let raw = repo.get(student.id).await.unwrap().unwrap();
        assert_eq!(raw.cohort_id(), Some(cohort.id));
    }

    #[tokio::test]
    async fn test_list_populated() {
        let db = memory_db().await;
        let cohort = CohortRepo::new(&db)
            .create(&CohortFields::named("Web Dev Jan"))
            .await
            .unwrap();
        let repo = StudentRepo::new(&db);
        repo.create(&student_in(Some(cohort.id), "Ana")).await.unwrap();
        repo.create(&student_in(Some(cohort.id), "Luis")).await.unwrap();
        repo.create(&student_in(None, "Marta")).await.unwrap();
        repo.create(&student_in(Some(ObjectId::new()), "Dangling"))
            .await
            .unwrap();

        let students = repo.list_populated().await.unwrap();
        assert_eq!(students.len(), 4);
        assert_eq!(students[0].fields.cohort.as_ref(), Some(&cohort));
        assert_eq!(students[1].fields.cohort.as_ref(), Some(&cohort));
        assert!(students[2].fields.cohort.is_none());
        assert!(students[3].fields.cohort.is_none());
    }

    #[tokio::test]
    async fn test_list_by_cohort() {
        let db = memory_db().await;
        let repo = StudentRepo::new(&db);
        let first = ObjectId::new();
        let second = ObjectId::new();
        repo.create(&student_in(Some(first), "Ana")).await.unwrap();
        repo.create(&student_in(Some(second), "Luis")).await.unwrap();
        repo.create(&student_in(Some(first), "Marta")).await.unwrap();

        let in_first = repo.list_by_cohort(first).await.unwrap();
        assert_eq!(in_first.len(), 2);
        assert!(in_first.iter().all(|s| s.cohort_id() == Some(first)));

        assert!(repo.list_by_cohort(ObjectId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = memory_db().await;
        let repo = StudentRepo::new(&db);
        let student = repo.create(&student_in(None, "Ana")).await.unwrap();

        let patch = StudentPatch {
            background: Some("Chemistry".to_string()),
            ..Default::default()
        };
        let updated = repo.update(student.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.fields.background, "Chemistry");
        assert_eq!(updated.fields.first_name, "Ana");

        assert!(repo.delete(student.id).await.unwrap());
        assert!(repo.get(student.id).await.unwrap().is_none());
        assert!(repo
            .update(student.id, &patch)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_null_detaches_cohort() {
        let db = memory_db().await;
        let cohort = CohortRepo::new(&db)
            .create(&CohortFields::named("Web Dev Jan"))
            .await
            .unwrap();
        let repo = StudentRepo::new(&db);
        let student = repo.create(&student_in(Some(cohort.id), "Ana")).await.unwrap();

        let patch = StudentPatch {
            cohort: Some(None),
            ..Default::default()
        };
        let updated = repo.update(student.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.cohort_id(), None);
        assert!(repo.list_by_cohort(cohort.id).await.unwrap().is_empty());

        let populated = repo.get_populated(student.id).await.unwrap().unwrap();
        assert!(populated.fields.cohort.is_none());
    }
}
