use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod seed;
pub mod usecase;

// Module for routing segregation (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use repository::{
    AdminUserRepositoryState, ArticleRepositoryState, PostgresAdminUserRepository,
    PostgresArticleRepository,
};
pub use usecase::{ArticleUseCase, AuthUseCase};

/// Prefix shared by every JSON API route.
pub const API_PREFIX: &str = "/api/v1";

/// ApiDoc
///
/// Aggregates every `#[utoipa::path]` handler and `ToSchema` model into the OpenAPI document
/// served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::article::get_published_articles, handlers::article::get_published_article,
        handlers::article::create_article, handlers::article::update_article,
        handlers::article::delete_article, handlers::article::publish_article,
        handlers::article::unpublish_article,
        handlers::auth::login, handlers::auth::logout, handlers::auth::get_me,
        handlers::admin::get_dashboard, handlers::admin::list_articles,
        handlers::admin::create_article, handlers::admin::get_article,
        handlers::admin::update_article, handlers::admin::delete_article,
    ),
    components(
        schemas(
            models::Article, models::AdminUser, models::CreateArticleRequest,
            models::AdminCreateArticleRequest, models::UpdateArticleRequest,
            models::LoginRequest, models::LoginResponse, models::MessageResponse,
            models::MeResponse, models::DashboardStats, models::DashboardResponse,
            models::HealthResponse, error::ErrorResponse,
        )
    ),
    tags(
        (name = "article-console", description = "Article management API")
    )
)]
pub struct ApiDoc;

/// AppState
///
/// The single state container shared by every request: the two use cases (each holding its
/// repository behind an `Arc`) and the immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleUseCase,
    pub auth: AuthUseCase,
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors such as `AuthUser` depend on one component instead of the whole state.

impl FromRef<AppState> for ArticleUseCase {
    fn from_ref(app_state: &AppState) -> ArticleUseCase {
        app_state.articles.clone()
    }
}

impl FromRef<AppState> for AuthUseCase {
    fn from_ref(app_state: &AppState) -> AuthUseCase {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Guards the admin router. Extracting `AuthUser` validates the session
/// token and loads the admin; on failure the extractor's 401 is returned before any handler
/// runs. The resolved user is stored in the request extensions for the handler to reuse.
async fn auth_middleware(auth_user: AuthUser, mut request: Request, next: Next) -> Response {
    tracing::debug!(user_id = auth_user.0.id, "request authenticated");
    request.extensions_mut().insert(auth_user);
    next.run(request).await
}

/// create_router
///
/// Assembles the full routing tree, applies the scoped auth layers and the global
/// observability and CORS layers, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS: the configured admin frontend, with cookies.
    let cors = CorsLayer::new()
        .allow_origin(cors_origin(&state.config.cors_origin))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let x_request_id = HeaderName::from_static("x-request-id");

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    // 2. API Router Assembly
    // The authenticated routes share method routers with the public reads, so a layer there
    // would also wrap the 405 fallback. Their handlers take `AuthUser` directly instead.
    let api = Router::new()
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .nest("/admin", admin::admin_routes().route_layer(auth_layer));

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .nest(API_PREFIX, api)
        .with_state(state);

    // 3. Observability and Correlation Layers
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS outermost so preflight requests never reach the auth layer.
        .layer(cors)
}

fn cors_origin(origin: &str) -> HeaderValue {
    origin.parse().unwrap_or_else(|_| {
        tracing::warn!(origin, "invalid CORS_ORIGIN, falling back to http://localhost:3000");
        HeaderValue::from_static("http://localhost:3000")
    })
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` set by the layer above so all
/// log lines of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
