use quill_common::{ApiError, ApiResult};
use quill_storage::entities::users;
use quill_storage::{CmsStorage, NewUser};

use crate::auth::{self, AuthTokens};

/// One generic message for unknown email and wrong password alike.
const BAD_CREDENTIALS: &str = "invalid email or password";

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: users::Model,
}

#[derive(Clone)]
pub struct AuthService {
    storage: CmsStorage,
    tokens: AuthTokens,
}

impl AuthService {
    pub fn new(storage: CmsStorage, tokens: AuthTokens) -> Self {
        Self { storage, tokens }
    }

    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> ApiResult<users::Model> {
        if self.storage.find_user_by_email(email).await?.is_some() {
            return Err(ApiError::conflict("email already registered"));
        }
        let password_hash = auth::hash_password(password)?;
        let user = self
            .storage
            .insert_user(NewUser {
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
                is_active: true,
            })
            .await?;
        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginOutcome> {
        let user = self
            .storage
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;
        if !user.is_active {
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
        if !auth::verify_password(password, &user.password_hash)? {
            return Err(ApiError::unauthorized(BAD_CREDENTIALS));
        }
        let token = self.tokens.issue_session(user.id, &user.email)?;
        Ok(LoginOutcome { token, user })
    }
}
