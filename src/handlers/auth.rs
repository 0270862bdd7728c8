use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse},
};

use crate::{
    AppState,
    auth::{AuthUser, clear_session_cookie, session_cookie},
    config::Env,
    error::{AppError, ErrorResponse},
    extract::JsonBody,
    models::{LoginRequest, LoginResponse, MeResponse, MessageResponse},
};
use validator::Validate;

/// login
///
/// [Public Route] Exchanges admin credentials for a session token. The token is set as the
/// HttpOnly `token` cookie (Secure in production) and also returned in the body.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Malformed input", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let payload = LoginRequest {
        email: payload.email.trim().to_string(),
        ..payload
    };
    // Empty fields get the use case's "required" message instead.
    if !payload.email.is_empty() {
        payload
            .validate()
            .map_err(|_| AppError::validation("invalid email format"))?;
    }

    let outcome = state.auth.login(&payload.email, &payload.password).await?;

    let cookie = session_cookie(&outcome.token, secure_cookies(&state));

    let body = LoginResponse {
        message: "login successful".to_string(),
        token: outcome.token,
        user: outcome.user,
    };
    Ok((
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(body),
    ))
}

/// logout
///
/// [Public Route] Expires the session cookie. Tokens are stateless, so a copied bearer token
/// stays valid until it expires.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse))
)]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(secure_cookies(&state));
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(MessageResponse {
            message: "logout successful".to_string(),
        }),
    )
}

/// get_me
///
/// [Authenticated Route] The admin behind the current session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current admin", body = MeResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    )
)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

fn secure_cookies(state: &AppState) -> bool {
    state.config.env == Env::Production
}
