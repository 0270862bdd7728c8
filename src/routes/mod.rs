//! Router modules, split by access level. The admin router is wrapped in `auth_middleware`
//! by `create_router`; the authenticated handlers require the `AuthUser` extractor.

/// Anonymous, read-only routes plus the login/logout gateway.
pub mod public;

/// Article writes and `/auth/me`, guarded per handler by `AuthUser`.
pub mod authenticated;

/// The admin console API, nested under `/admin` and behind `auth_middleware`.
pub mod admin;
