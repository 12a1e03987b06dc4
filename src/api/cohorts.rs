//! Cohort handlers
//!
//! `/api/cohorts` endpoints.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::api::extract::{ValidJson, ValidObjectId};
use crate::api::handlers::AppState;
use crate::error::{ApiError, Result};
use crate::models::{Cohort, CohortEnvelope, CohortFields, CohortPatch, MessageResponse};
use crate::repo::CohortRepo;

const RESOURCE: &str = "Cohort";

/// Handler for GET /api/cohorts
pub async fn list_cohorts(State(state): State<AppState>) -> Result<Json<Vec<Cohort>>> {
    let cohorts = CohortRepo::new(&state.db).list().await?;
    Ok(Json(cohorts))
}

/// Handler for GET /api/cohorts/:id
pub async fn get_cohort(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
) -> Result<Json<CohortEnvelope>> {
    let cohort = CohortRepo::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;

    Ok(Json(CohortEnvelope { cohort }))
}

/// Handler for POST /api/cohorts
pub async fn create_cohort(
    State(state): State<AppState>,
    ValidJson(fields): ValidJson<CohortFields>,
) -> Result<(StatusCode, Json<Cohort>)> {
    fields.validate()?;

    let cohort = CohortRepo::new(&state.db).create(&fields).await?;
    info!(id = %cohort.id, name = %cohort.fields.cohort_name, "Cohort created");

    Ok((StatusCode::CREATED, Json(cohort)))
}

/// Handler for PUT /api/cohorts/:id
///
/// Merges the supplied fields. Rules spanning several fields are checked
/// against the stored cohort. Unknown ids are 404.
pub async fn update_cohort(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
    ValidJson(patch): ValidJson<CohortPatch>,
) -> Result<(StatusCode, Json<CohortEnvelope>)> {
    patch.validate()?;

    let repo = CohortRepo::new(&state.db);
    let current = repo
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;
    patch.validate_against(&current.fields)?;

    let cohort = repo
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::not_found(RESOURCE, id))?;
    info!(id = %id, "Cohort updated");

    Ok((StatusCode::ACCEPTED, Json(CohortEnvelope { cohort })))
}

/// Handler for DELETE /api/cohorts/:id
///
/// Idempotent: answers 202 whether or not the cohort existed.
pub async fn delete_cohort(
    State(state): State<AppState>,
    ValidObjectId(id): ValidObjectId,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let removed = CohortRepo::new(&state.db).delete(id).await?;
    info!(id = %id, removed, "Cohort deleted");

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("Cohort deleted")),
    ))
}
