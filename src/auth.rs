use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::AdminUser,
    usecase::AuthUseCase,
};

/// Lifetime of an issued session token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Name of the HttpOnly cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Claims
///
/// Payload of the HS256 session token. `sub` carries the admin id as a string per the JWT
/// convention; `user_id` repeats it numerically so lookups need no parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    /// Issued At, seconds since the epoch.
    pub iat: i64,
    /// Expiration Time, `iat + 24h`. Enforced on every validation.
    pub exp: i64,
}

/// issue_token
///
/// Signs a fresh session token for the given admin with the shared secret.
pub fn issue_token(user_id: i64, email: &str, secret: &str) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// validate_token
///
/// Verifies signature, algorithm and expiry. Any failure collapses into
/// `Unauthorized("Invalid token")`; the precise reason is only logged.
pub fn validate_token(token: &str, secret: &str) -> AppResult<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("rejected expired token"),
                other => tracing::debug!(reason = ?other, "rejected invalid token"),
            }
            Err(AppError::unauthorized("Invalid token"))
        }
    }
}

/// Extracts the session token, preferring the `token` cookie over `Authorization: Bearer`.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// `Set-Cookie` value installing the session token for 24 hours.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        TOKEN_TTL_HOURS * 60 * 60
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value expiring the session token immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// AuthUser
///
/// The resolved identity of an authenticated request: the live admin account behind the
/// session token, with its password hash already stripped. Admin gating is role-free, so
/// holding an `AuthUser` is the whole authorization check.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AdminUser);

/// AuthUser Extractor Implementation
///
/// 1. Reuse: the auth middleware stores the resolved user in the request extensions, so the
///    handler-level extraction does not validate the token a second time.
/// 2. Token Extraction: `token` cookie, then `Authorization: Bearer`.
/// 3. Validation + DB Lookup: delegated to `AuthUseCase::user_from_token`, which also rejects
///    tokens whose admin has since been deleted.
///
/// Rejection: `AppError::Unauthorized` (401) with a JSON body.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthUseCase: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(existing) = parts.extensions.get::<AuthUser>() {
            return Ok(existing.clone());
        }

        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let auth = AuthUseCase::from_ref(state);
        let user = auth.user_from_token(&token).await?;

        let auth_user = AuthUser(user);
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}
