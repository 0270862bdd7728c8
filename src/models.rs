use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

// --- Persisted Entities ---

/// Article
///
/// A blog-style content record from the `articles` table. New articles start unpublished;
/// deletion only stamps `deleted_at`, and every repository read filters those rows out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Article {
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub content: String,
    // Free-text author name, not a reference to admin_users.
    pub author: String,
    #[serde(default)]
    pub published: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// AdminUser
///
/// An administrator account from the `admin_users` table.
///
/// `password_hash` is `#[serde(skip)]` in both directions: it is loaded from the database via
/// `FromRow` but can never appear in a JSON body, nor be injected through one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct AdminUser {
    #[ts(type = "number")]
    pub id: i64,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
    pub name: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Returns a copy with the password hash cleared, for handing out of the auth layer.
    pub fn without_secret(&self) -> Self {
        Self {
            password_hash: String::new(),
            ..self.clone()
        }
    }
}

// --- Repository Inputs ---

/// Insert payload for `ArticleRepository::create`.
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published: bool,
}

/// Insert payload for `AdminUserRepository::create`. The hash must already be computed.
#[derive(Debug, Clone, Default)]
pub struct NewAdminUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// ArticleChanges
///
/// Partial update applied by `ArticleUseCase::update_article`. `None` (or an empty string)
/// leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ArticleChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub published: Option<bool>,
}

// --- Request Payloads ---

/// CreateArticleRequest
///
/// Body of `POST /api/v1/articles`. Missing fields deserialize as empty strings so that they
/// are rejected by the use case validation with a field-specific message.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
}

/// AdminCreateArticleRequest
///
/// Body of `POST /api/v1/admin/articles`. Identical to the public payload plus an optional
/// `published` flag that publishes the article immediately after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AdminCreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub published: bool,
}

/// UpdateArticleRequest
///
/// Partial update payload for `PUT .../articles/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateArticleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub published: Option<bool>,
}

impl From<UpdateArticleRequest> for ArticleChanges {
    fn from(req: UpdateArticleRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            author: req.author,
            published: req.published,
        }
    }
}

/// LoginRequest
///
/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Validate, Default)]
#[ts(export)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "admin@example.com")]
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// --- Response Payloads ---

/// LoginResponse
///
/// Successful login. The token is also delivered as the HttpOnly `token` cookie; returning
/// it in the body lets non-browser clients use `Authorization: Bearer`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: AdminUser,
}

/// Plain acknowledgement body, e.g. for logout.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /api/v1/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MeResponse {
    pub user: AdminUser,
}

/// DashboardStats
///
/// Article counters for the admin dashboard. `draft_articles` is always
/// `total_articles - published_articles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardStats {
    #[ts(type = "number")]
    pub total_articles: i64,
    #[ts(type = "number")]
    pub published_articles: i64,
    #[ts(type = "number")]
    pub draft_articles: i64,
}

/// Body of `GET /api/v1/admin/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_articles: Vec<Article>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
