use anyhow::Context;
use article_console::{
    AppState, ArticleUseCase, AuthUseCase,
    config::{AppConfig, Env},
    create_router, database,
    repository::{
        AdminUserRepositoryState, ArticleRepositoryState, PostgresAdminUserRepository,
        PostgresArticleRepository,
    },
    seed,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initializes logging, connects to Postgres (with retries), applies
/// migrations, optionally seeds, and serves the HTTP API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load().context("invalid configuration")?;

    // 2. Logging: RUST_LOG wins, otherwise crate debug and tower_http info.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "article_console=debug,tower_http=info".into());

    // 3. Pretty output locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Database: wait for Postgres, then bring the schema up to date.
    let pool = database::connect_with_retry(&config.db_url, config.db_max_retries).await?;
    database::run_migrations(&pool).await?;

    let article_repo: ArticleRepositoryState = Arc::new(PostgresArticleRepository::new(pool.clone()));
    let admin_repo: AdminUserRepositoryState = Arc::new(PostgresAdminUserRepository::new(pool));

    // 5. Seeding
    if config.seed.run_on_startup {
        seed::run_seeds(config.seed.mode, &admin_repo, &article_repo, &config.admin)
            .await
            .context("database seeding failed")?;
    } else {
        tracing::info!("Seeding disabled, skipping");
    }

    // 6. Unified State Assembly
    let app_state = AppState {
        articles: ArticleUseCase::new(article_repo),
        auth: AuthUseCase::new(admin_repo, config.jwt_secret.clone()),
        config: config.clone(),
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on {addr}");
    tracing::info!(
        "API Documentation (Swagger UI) available at: http://localhost:{}/swagger-ui",
        config.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}
