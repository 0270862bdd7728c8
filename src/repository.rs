use crate::{
    error::{AppResult, conflict_on_unique},
    models::{AdminUser, Article, NewAdminUser, NewArticle},
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// ArticleRepository
///
/// Persistence contract for articles. Every read, update and delete only sees rows whose
/// `deleted_at` is NULL; a soft-deleted article behaves exactly like a missing one.
///
/// **Send + Sync + async_trait** make `Arc<dyn ArticleRepository>` shareable across Axum's
/// task boundaries.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn create(&self, article: NewArticle) -> AppResult<Article>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<Article>>;
    // All live articles, newest first.
    async fn get_all(&self) -> AppResult<Vec<Article>>;
    // Live articles with published = true, newest first.
    async fn get_published(&self) -> AppResult<Vec<Article>>;
    // Exact match on the free-text author column.
    async fn get_by_author(&self, author: &str) -> AppResult<Vec<Article>>;
    /// Persists title, content, author and published; `None` when the row is gone.
    async fn update(&self, article: &Article) -> AppResult<Option<Article>>;
    /// Soft delete. Returns false when no live row matched.
    async fn delete(&self, id: i64) -> AppResult<bool>;
    async fn count(&self) -> AppResult<i64>;
}

/// AdminUserRepository
///
/// Persistence contract for administrator accounts. Same soft-delete visibility rules as
/// `ArticleRepository`.
#[async_trait]
pub trait AdminUserRepository: Send + Sync {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUser>>;
    async fn get_by_id(&self, id: i64) -> AppResult<Option<AdminUser>>;
    /// Fails with `AppError::Conflict` when the email is already taken.
    async fn create(&self, user: NewAdminUser) -> AppResult<AdminUser>;
    async fn update(&self, user: &AdminUser) -> AppResult<Option<AdminUser>>;
    async fn delete(&self, id: i64) -> AppResult<bool>;
    async fn list(&self) -> AppResult<Vec<AdminUser>>;
    async fn count(&self) -> AppResult<i64>;
}

pub type ArticleRepositoryState = Arc<dyn ArticleRepository>;
pub type AdminUserRepositoryState = Arc<dyn AdminUserRepository>;

const ARTICLE_COLUMNS: &str =
    "id, title, content, author, published, created_at, updated_at, deleted_at";

const ADMIN_USER_COLUMNS: &str =
    "id, email, password_hash, name, created_at, updated_at, deleted_at";

/// PostgresArticleRepository
///
/// `ArticleRepository` backed by the `articles` table.
#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> AppResult<Article> {
        let query = format!(
            "INSERT INTO articles (title, content, author, published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) \
             RETURNING {ARTICLE_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Article>(&query)
            .bind(&article.title)
            .bind(&article.content)
            .bind(&article.author)
            .bind(article.published)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(article_id = created.id, "article inserted");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Article>> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1 AND deleted_at IS NULL"
        );

        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(article)
    }

    async fn get_all(&self) -> AppResult<Vec<Article>> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        );

        let articles = sqlx::query_as::<_, Article>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn get_published(&self) -> AppResult<Vec<Article>> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE published = true AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        );

        let articles = sqlx::query_as::<_, Article>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn get_by_author(&self, author: &str) -> AppResult<Vec<Article>> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles \
             WHERE author = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        );

        let articles = sqlx::query_as::<_, Article>(&query)
            .bind(author)
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn update(&self, article: &Article) -> AppResult<Option<Article>> {
        let query = format!(
            "UPDATE articles \
             SET title = $2, content = $3, author = $4, published = $5, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {ARTICLE_COLUMNS}"
        );

        let updated = sqlx::query_as::<_, Article>(&query)
            .bind(article.id)
            .bind(&article.title)
            .bind(&article.content)
            .bind(&article.author)
            .bind(article.published)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE articles SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

/// PostgresAdminUserRepository
///
/// `AdminUserRepository` backed by the `admin_users` table.
#[derive(Clone)]
pub struct PostgresAdminUserRepository {
    pool: PgPool,
}

impl PostgresAdminUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        let query = format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin_users \
             WHERE email = $1 AND deleted_at IS NULL"
        );

        let user = sqlx::query_as::<_, AdminUser>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<AdminUser>> {
        let query = format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin_users WHERE id = $1 AND deleted_at IS NULL"
        );

        let user = sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: NewAdminUser) -> AppResult<AdminUser> {
        let query = format!(
            "INSERT INTO admin_users (email, password_hash, name, created_at, updated_at) \
             VALUES ($1, $2, $3, NOW(), NOW()) \
             RETURNING {ADMIN_USER_COLUMNS}"
        );

        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "email already registered"))
    }

    async fn update(&self, user: &AdminUser) -> AppResult<Option<AdminUser>> {
        let query = format!(
            "UPDATE admin_users \
             SET email = $2, password_hash = $3, name = $4, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {ADMIN_USER_COLUMNS}"
        );

        sqlx::query_as::<_, AdminUser>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "email already registered"))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE admin_users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> AppResult<Vec<AdminUser>> {
        let query = format!(
            "SELECT {ADMIN_USER_COLUMNS} FROM admin_users \
             WHERE deleted_at IS NULL ORDER BY id ASC"
        );

        let users = sqlx::query_as::<_, AdminUser>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM admin_users WHERE deleted_at IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
