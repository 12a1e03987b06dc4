//! Student handlers
//!
//! `/api/students` endpoints. Single and full reads populate the cohort;
//! the by-cohort listing and the write endpoints return bare references.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::extract::{ValidJson, ValidObjectId};
use crate::api::handlers::AppState;
use crate::error::{ApiError, Result};
use crate::models::{
    MessageResponse, PopulatedStudent, Student, StudentEnvelope, StudentFields, StudentPatch,
    UserEnvelope,
};
use crate::repo::StudentRepo;

const RESOURCE: &str = "Student";

/// Handler for GET /api/students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<PopulatedStudent>>> {
    let students = StudentRepo::new(&state.db).list_populated().await?;
    Ok(Json(students))
}

/// Handler for GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
) -> Result<Json<StudentEnvelope>> {
    let student = StudentRepo::new(&state.db)
        .get_populated(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    Ok(Json(StudentEnvelope { student }))
}

/// Handler for GET /api/students/cohort/:cohortId
///
/// No matching students is an empty array, not an error.
pub async fn list_cohort_students(
    State(state): State<AppState>,
    ValidObjectId(cohort_id): ValidObjectId,
) -> Result<Json<Vec<Student>>> {
    let students = StudentRepo::new(&state.db)
        .list_by_cohort(cohort_id)
        .await?;
    Ok(Json(students))
}

/// Handler for POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    ValidJson(fields): ValidJson<StudentFields>,
) -> Result<(StatusCode, Json<Student>)> {
    fields.validate()?;

    let student = StudentRepo::new(&state.db).create(&fields).await?;
    info!(id = %student.id, email = %student.fields.email, "Student created");

    Ok((StatusCode::CREATED, Json(student)))
}

/// Handler for PUT /api/students/:id
///
/// Merges the supplied fields. Unknown ids are 404.
pub async fn update_student(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
    ValidJson(patch): ValidJson<StudentPatch>,
) -> Result<(StatusCode, Json<UserEnvelope>)> {
    patch.validate()?;

    let user = StudentRepo::new(&state.db)
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;
    info!(id = %id, "Student updated");

    Ok((StatusCode::ACCEPTED, Json(UserEnvelope { user })))
}

/// Handler for DELETE /api/students/:id
///
/// Idempotent: answers 202 whether or not the student existed.
pub async fn delete_student(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let removed = StudentRepo::new(&state.db).delete(id).await?;
    info!(id = %id, removed, "Student deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Student deleted")),
    ))
}
