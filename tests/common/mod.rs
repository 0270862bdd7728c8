#![allow(dead_code)]

use article_console::{
    AppConfig, AppError, AppResult, AppState, ArticleUseCase, AuthUseCase, create_router,
    auth::issue_token,
    models::{AdminUser, Article, NewAdminUser, NewArticle},
    password::hash_password_with_cost,
    repository::{
        AdminUserRepository, AdminUserRepositoryState, ArticleRepository, ArticleRepositoryState,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-value";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

// bcrypt's minimum cost; the production cost would make every test take seconds.
pub const TEST_HASH_COST: u32 = 4;

// --- In-Memory Article Repository ---

#[derive(Default)]
pub struct InMemoryArticleRepository {
    rows: Mutex<Vec<Article>>,
}

impl InMemoryArticleRepository {
    /// Every row including soft-deleted ones, for asserting on `deleted_at`.
    pub fn raw_rows(&self) -> Vec<Article> {
        self.rows.lock().unwrap().clone()
    }

    fn live_sorted(&self, keep: impl Fn(&Article) -> bool) -> Vec<Article> {
        let mut live: Vec<Article> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.deleted_at.is_none() && keep(a))
            .cloned()
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        live
    }
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn create(&self, article: NewArticle) -> AppResult<Article> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let created = Article {
            id: rows.len() as i64 + 1,
            title: article.title,
            content: article.content,
            author: article.author,
            published: article.published,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Article>> {
        Ok(self.live_sorted(|a| a.id == id).into_iter().next())
    }

    async fn get_all(&self) -> AppResult<Vec<Article>> {
        Ok(self.live_sorted(|_| true))
    }

    async fn get_published(&self) -> AppResult<Vec<Article>> {
        Ok(self.live_sorted(|a| a.published))
    }

    async fn get_by_author(&self, author: &str) -> AppResult<Vec<Article>> {
        Ok(self.live_sorted(|a| a.author == author))
    }

    async fn update(&self, article: &Article) -> AppResult<Option<Article>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows
            .iter_mut()
            .find(|a| a.id == article.id && a.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.title = article.title.clone();
        row.content = article.content.clone();
        row.author = article.author.clone();
        row.published = article.published;
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|a| a.id == id && a.deleted_at.is_none()) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.live_sorted(|_| true).len() as i64)
    }
}

// --- In-Memory Admin User Repository ---

#[derive(Default)]
pub struct InMemoryAdminUserRepository {
    rows: Mutex<Vec<AdminUser>>,
}

impl InMemoryAdminUserRepository {
    fn live(&self) -> Vec<AdminUser> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryAdminUserRepository {
    async fn get_by_email(&self, email: &str) -> AppResult<Option<AdminUser>> {
        Ok(self.live().into_iter().find(|u| u.email == email))
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<AdminUser>> {
        Ok(self.live().into_iter().find(|u| u.id == id))
    }

    async fn create(&self, user: NewAdminUser) -> AppResult<AdminUser> {
        let mut rows = self.rows.lock().unwrap();
        // Unique among live rows only, like the partial index.
        if rows
            .iter()
            .any(|u| u.deleted_at.is_none() && u.email == user.email)
        {
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        let now = Utc::now();
        let created = AdminUser {
            id: rows.len() as i64 + 1,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &AdminUser) -> AppResult<Option<AdminUser>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows
            .iter_mut()
            .find(|u| u.id == user.id && u.deleted_at.is_none())
        else {
            return Ok(None);
        };
        row.email = user.email.clone();
        row.password_hash = user.password_hash.clone();
        row.name = user.name.clone();
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> AppResult<Vec<AdminUser>> {
        Ok(self.live())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.live().len() as i64)
    }
}

// --- Failing Repository (for 500 mapping) ---

pub struct BrokenArticleRepository;

#[async_trait]
impl ArticleRepository for BrokenArticleRepository {
    async fn create(&self, _article: NewArticle) -> AppResult<Article> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_by_id(&self, _id: i64) -> AppResult<Option<Article>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_all(&self) -> AppResult<Vec<Article>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_published(&self) -> AppResult<Vec<Article>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn get_by_author(&self, _author: &str) -> AppResult<Vec<Article>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn update(&self, _article: &Article) -> AppResult<Option<Article>> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn delete(&self, _id: i64) -> AppResult<bool> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
    async fn count(&self) -> AppResult<i64> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }
}

// --- State Helpers ---

pub struct TestContext {
    pub state: AppState,
    pub articles: Arc<InMemoryArticleRepository>,
    pub admins: Arc<InMemoryAdminUserRepository>,
    pub admin: AdminUser,
}

impl TestContext {
    /// A valid session token for the seeded admin.
    pub fn token(&self) -> String {
        issue_token(self.admin.id, &self.admin.email, TEST_JWT_SECRET).unwrap()
    }

    pub async fn insert_article(&self, title: &str, author: &str, published: bool) -> Article {
        self.articles
            .create(NewArticle {
                title: title.to_string(),
                content: format!("{title} body"),
                author: author.to_string(),
                published,
            })
            .await
            .unwrap()
    }
}

pub async fn insert_admin(
    repo: &InMemoryAdminUserRepository,
    email: &str,
    password: &str,
) -> AdminUser {
    repo.create(NewAdminUser {
        email: email.to_string(),
        password_hash: hash_password_with_cost(password, TEST_HASH_COST).unwrap(),
        name: "Test Admin".to_string(),
    })
    .await
    .unwrap()
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub fn build_state(
    articles: ArticleRepositoryState,
    admins: AdminUserRepositoryState,
    config: AppConfig,
) -> AppState {
    AppState {
        articles: ArticleUseCase::new(articles),
        auth: AuthUseCase::new(admins, config.jwt_secret.clone()),
        config,
    }
}

/// Empty article table plus one admin with `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
pub async fn create_test_context() -> TestContext {
    create_test_context_with(test_config()).await
}

pub async fn create_test_context_with(config: AppConfig) -> TestContext {
    let articles = Arc::new(InMemoryArticleRepository::default());
    let admins = Arc::new(InMemoryAdminUserRepository::default());
    let admin = insert_admin(&admins, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let state = build_state(articles.clone(), admins.clone(), config);

    TestContext {
        state,
        articles,
        admins,
        admin,
    }
}

/// Serves the full router on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{port}")
}
