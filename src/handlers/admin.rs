use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use super::ArticleFilter;
use crate::{
    AppState,
    auth::AuthUser,
    error::{AppError, ErrorResponse},
    extract::{ArticleId, JsonBody},
    models::{AdminCreateArticleRequest, Article, DashboardResponse, UpdateArticleRequest},
};

/// get_dashboard
///
/// [Admin Route] Article counters plus the five most recently created articles.
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(state.articles.dashboard().await?))
}

/// list_articles
///
/// [Admin Route] Every live article, drafts included.
#[utoipa::path(
    get,
    path = "/api/v1/admin/articles",
    params(ArticleFilter),
    responses((status = 200, description = "All articles", body = [Article]))
)]
pub async fn list_articles(
    State(state): State<AppState>,
    Query(filter): Query<ArticleFilter>,
) -> Result<Json<Vec<Article>>, AppError> {
    let articles = match filter.author() {
        Some(author) => state.articles.get_articles_by_author(author).await?,
        None => state.articles.get_all_articles().await?,
    };
    Ok(Json(articles))
}

/// create_article
///
/// [Admin Route] Creates an article and, when `published` is set, publishes it right away.
#[utoipa::path(
    post,
    path = "/api/v1/admin/articles",
    request_body = AdminCreateArticleRequest,
    responses(
        (status = 201, description = "Created", body = Article),
        (status = 400, description = "Missing field", body = ErrorResponse)
    )
)]
pub async fn create_article(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AdminCreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    let mut article = state
        .articles
        .create_article(&payload.title, &payload.content, &payload.author)
        .await?;

    if payload.published {
        article = state.articles.publish_article(article.id).await?;
    }

    tracing::info!(
        user_id = user.id,
        article_id = article.id,
        published = article.published,
        "admin created article"
    );
    Ok((StatusCode::CREATED, Json(article)))
}

/// get_article
///
/// [Admin Route] A single article regardless of its publish state.
#[utoipa::path(
    get,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article", body = Article),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Article>, AppError> {
    Ok(Json(state.articles.get_article(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated", body = Article),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    JsonBody(payload): JsonBody<UpdateArticleRequest>,
) -> Result<Json<Article>, AppError> {
    Ok(Json(state.articles.update_article(id, payload.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<StatusCode, AppError> {
    state.articles.delete_article(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
