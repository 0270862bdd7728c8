//! Use Case Layer
//!
//! Sits between the HTTP handlers and the repositories. Handlers only bind and serialize;
//! everything that decides *whether* an operation is allowed (field validation, publish
//! state, credential checks) lives here, expressed against the repository traits so it can
//! be exercised with in-memory doubles.

/// Article CRUD, publish/unpublish and dashboard statistics.
pub mod article;

/// Credential checks and token-to-user resolution.
pub mod auth;

pub use article::ArticleUseCase;
pub use auth::AuthUseCase;
