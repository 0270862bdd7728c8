//! HTTP handlers, grouped by access level. Each handler is a thin adapter: it extracts the
//! request, calls a use case and maps the outcome onto a status code and JSON body. Errors
//! are `AppError`s rendered by its `IntoResponse` implementation.

pub mod admin;
pub mod article;
pub mod auth;

use axum::Json;
use serde::Deserialize;

use crate::models::HealthResponse;

/// ArticleFilter
///
/// Query parameters accepted by the article listings (`GET /articles`,
/// `GET /admin/articles`).
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ArticleFilter {
    /// Only return articles by this exact author name.
    pub author: Option<String>,
}

impl ArticleFilter {
    // An empty `?author=` is treated as no filter.
    pub(crate) fn author(&self) -> Option<&str> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
    }
}

/// health
///
/// Liveness probe for load balancers and container orchestration.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Article API is running".to_string(),
    })
}
