//! Custom Axum extractors
//!
//! Reject malformed ids and undecodable bodies with the API's own error
//! shape before a handler runs.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::store::ObjectId;

/// Extract and validate an object id from the path.
///
/// A malformed id short-circuits with 400 and never reaches the store.
#[derive(Debug, Clone, Copy)]
pub struct ValidObjectId(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for ValidObjectId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;

        match raw.parse::<ObjectId>() {
            Ok(id) => Ok(Self(id)),
            Err(_) => Err(ApiError::InvalidId(raw)),
        }
    }
}

/// JSON body whose decoding failures become validation errors.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
