use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. Article reads only ever return published
/// articles; drafts answer 404.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /articles?author=...
        .route(
            "/articles",
            get(handlers::article::get_published_articles),
        )
        // GET /articles/{id}
        .route(
            "/articles/{id}",
            get(handlers::article::get_published_article),
        )
        // POST /auth/login
        // Verifies credentials, sets the `token` cookie and returns the token.
        .route("/auth/login", post(handlers::auth::login))
        // POST /auth/logout
        .route("/auth/logout", post(handlers::auth::logout))
}
