use crate::{
    auth::{issue_token, validate_token},
    error::{AppError, AppResult},
    models::AdminUser,
    password::verify_password,
    repository::AdminUserRepositoryState,
};

/// Result of a successful login: the signed token and the admin it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: AdminUser,
}

/// AuthUseCase
///
/// Credential verification and token resolution for administrator accounts. Holds the JWT
/// signing secret so that neither the handlers nor the extractor need the configuration.
#[derive(Clone)]
pub struct AuthUseCase {
    repo: AdminUserRepositoryState,
    jwt_secret: String,
}

impl AuthUseCase {
    pub fn new(repo: AdminUserRepositoryState, jwt_secret: impl Into<String>) -> Self {
        Self {
            repo,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// login
    ///
    /// Every way a login can fail after input validation (unknown email, deleted account,
    /// wrong password, corrupt stored hash) returns the same `invalid credentials` error so
    /// responses cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::validation("email and password are required"));
        }

        let user = match self.repo.get_by_email(email.trim()).await? {
            Some(user) => user,
            None => {
                tracing::debug!("login for unknown email");
                return Err(invalid_credentials());
            }
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = user.id, "login with wrong password");
                return Err(invalid_credentials());
            }
            Err(e) => {
                tracing::error!(user_id = user.id, error = %e, "stored password hash is unreadable");
                return Err(invalid_credentials());
            }
        }

        let token = issue_token(user.id, &user.email, &self.jwt_secret)?;
        tracing::info!(user_id = user.id, "admin logged in");

        Ok(LoginOutcome {
            token,
            user: user.without_secret(),
        })
    }

    /// user_from_token
    ///
    /// Validates the token and loads the admin named in its claims. An admin deleted after
    /// the token was issued is rejected like a bad token.
    pub async fn user_from_token(&self, token: &str) -> AppResult<AdminUser> {
        let claims = validate_token(token, &self.jwt_secret)?;

        let user = self
            .repo
            .get_by_id(claims.user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.user_id, "token for missing admin");
                AppError::unauthorized("Invalid token")
            })?;

        Ok(user.without_secret())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("invalid credentials")
}
