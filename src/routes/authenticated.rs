use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post, put},
};

/// Authenticated Router Module
///
/// Routes for any signed-in admin. Article writes share paths with the public reads and are
/// merged into the same method routers, so every handler here takes `AuthUser` itself.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /auth/me
        .route("/auth/me", get(handlers::auth::get_me))
        // POST /articles
        // New articles are always drafts.
        .route("/articles", post(handlers::article::create_article))
        // PUT/DELETE /articles/{id}
        .route(
            "/articles/{id}",
            put(handlers::article::update_article).delete(handlers::article::delete_article),
        )
        .route(
            "/articles/{id}/publish",
            post(handlers::article::publish_article),
        )
        .route(
            "/articles/{id}/unpublish",
            post(handlers::article::unpublish_article),
        )
}
