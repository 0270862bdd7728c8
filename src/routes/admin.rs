use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// The admin console API. Mounted under `/admin`; the whole router is wrapped in the auth
/// middleware, and any authenticated admin may use every route.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        // Total, published and draft counts plus the five newest articles.
        .route("/dashboard", get(handlers::admin::get_dashboard))
        // GET/POST /admin/articles
        // Lists drafts too; creation may publish immediately.
        .route(
            "/articles",
            get(handlers::admin::list_articles).post(handlers::admin::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::admin::get_article)
                .put(handlers::admin::update_article)
                .delete(handlers::admin::delete_article),
        )
}
