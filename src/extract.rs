//! Request extractors whose rejections are `AppError`, so malformed input gets the same
//! `{"error": ...}` JSON body as every other failure.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// ArticleId
///
/// The `{id}` path segment of the article routes. Anything that does not parse as an
/// integer is rejected with 400 `invalid article ID`, the same message the use case gives
/// for non-positive ids.
#[derive(Debug, Clone, Copy)]
pub struct ArticleId(pub i64);

impl<S> FromRequestParts<S> for ArticleId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "unparseable article id");
                AppError::validation("invalid article ID")
            })?;
        Ok(Self(id))
    }
}

/// JsonBody
///
/// `axum::Json` for request bodies. Syntax errors, wrong field types and a missing JSON
/// content type all become 400 validation errors.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
