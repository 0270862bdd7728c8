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
    models::{Article, CreateArticleRequest, UpdateArticleRequest},
};

/// get_published_articles
///
/// [Public Route] Lists published articles, newest first. Drafts never appear here.
#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleFilter),
    responses((status = 200, description = "Published articles", body = [Article]))
)]
pub async fn get_published_articles(
    State(state): State<AppState>,
    Query(filter): Query<ArticleFilter>,
) -> Result<Json<Vec<Article>>, AppError> {
    let articles = match filter.author() {
        Some(author) => state
            .articles
            .get_articles_by_author(author)
            .await?
            .into_iter()
            .filter(|article| article.published)
            .collect(),
        None => state.articles.get_published_articles().await?,
    };
    Ok(Json(articles))
}

/// get_published_article
///
/// [Public Route] A single published article. A draft is reported exactly like a missing
/// article so its existence does not leak.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article", body = Article),
        (status = 400, description = "Invalid ID", body = ErrorResponse),
        (status = 404, description = "Not found or unpublished", body = ErrorResponse)
    )
)]
pub async fn get_published_article(
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Article>, AppError> {
    let article = state.articles.get_article(id).await?;
    if !article.published {
        return Err(AppError::not_found("article not found"));
    }
    Ok(Json(article))
}

/// create_article
///
/// [Authenticated Route] Creates a draft article.
#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Created", body = Article),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn create_article(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateArticleRequest>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    tracing::debug!(user_id = user.id, "creating article");
    let article = state
        .articles
        .create_article(&payload.title, &payload.content, &payload.author)
        .await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// update_article
///
/// [Authenticated Route] Partial update; omitted or blank fields are left unchanged.
#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated", body = Article),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_article(
    _user: AuthUser,
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
    JsonBody(payload): JsonBody<UpdateArticleRequest>,
) -> Result<Json<Article>, AppError> {
    let article = state.articles.update_article(id, payload.into()).await?;
    Ok(Json(article))
}

/// delete_article
///
/// [Authenticated Route] Soft-deletes an article.
#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_article(
    _user: AuthUser,
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<StatusCode, AppError> {
    state.articles.delete_article(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/publish",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Published", body = Article),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn publish_article(
    _user: AuthUser,
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Article>, AppError> {
    Ok(Json(state.articles.publish_article(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/unpublish",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Unpublished", body = Article),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn unpublish_article(
    _user: AuthUser,
    State(state): State<AppState>,
    ArticleId(id): ArticleId,
) -> Result<Json<Article>, AppError> {
    Ok(Json(state.articles.unpublish_article(id).await?))
}
