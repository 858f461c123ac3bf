use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::{Duration, OffsetDateTime};

use quill_common::{ApiError, ApiResult};

pub const SESSION_TTL: Duration = Duration::hours(24);
pub const API_KEY_DEFAULT_TTL: Duration = Duration::days(365);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    UserSession,
    ApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 issuer/verifier for both token flavors. One instance per process,
/// built from the merged config's jwt secret.
#[derive(Clone)]
pub struct AuthTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthTokens {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue_session(&self, user_id: i64, email: &str) -> ApiResult<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            kind: TokenKind::UserSession,
            email: Some(email.to_string()),
            key_id: None,
            scopes: None,
            iat: now.unix_timestamp(),
            exp: (now + SESSION_TTL).unix_timestamp(),
        };
        self.encode(&claims)
    }

    /// The JWT `exp` always mirrors the stored expiry, so a revoked-by-time
    /// key is also cryptographically dead.
    pub fn issue_api_key(
        &self,
        user_id: i64,
        key_id: &str,
        scopes: Option<Vec<String>>,
        expires_at: Option<OffsetDateTime>,
    ) -> ApiResult<(String, OffsetDateTime)> {
        let now = OffsetDateTime::now_utc();
        let expires_at = expires_at.unwrap_or(now + API_KEY_DEFAULT_TTL);
        let claims = Claims {
            sub: user_id,
            kind: TokenKind::ApiKey,
            email: None,
            key_id: Some(key_id.to_string()),
            scopes,
            iat: now.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };
        let token = self.encode(&claims)?;
        Ok((token, expires_at))
    }

    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| ApiError::unauthorized(format!("invalid token: {err}")))?;
        Ok(data.claims)
    }

    fn encode(&self, claims: &Claims) -> ApiResult<String> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|err| ApiError::internal(format!("token encoding failed: {err}")))
    }
}

/// sha-256 hex of the raw bearer string; the only form ever persisted.
pub fn hash_token(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

pub fn new_key_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn hash_password(password: &str) -> ApiResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|err| ApiError::internal(format!("password hashing failed: {err}")))
}

pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|err| ApiError::internal(format!("password check failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_round_trips() {
        let tokens = AuthTokens::new("secret");
        let token = tokens.issue_session(42, "a@b.c").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.kind, TokenKind::UserSession);
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn api_key_exp_mirrors_requested_expiry() {
        let tokens = AuthTokens::new("secret");
        let wanted = OffsetDateTime::now_utc() + Duration::days(7);
        let (token, effective) = tokens
            .issue_api_key(1, "kid", Some(vec!["read".into()]), Some(wanted))
            .unwrap();
        assert_eq!(effective, wanted);
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.exp, wanted.unix_timestamp());
        assert_eq!(claims.kind, TokenKind::ApiKey);
        assert_eq!(claims.key_id.as_deref(), Some("kid"));
    }

    #[test]
    fn expired_token_fails_verification() {
        let tokens = AuthTokens::new("secret");
        let past = OffsetDateTime::now_utc() - Duration::days(2);
        let (token, _) = tokens.issue_api_key(1, "kid", None, Some(past)).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let tokens = AuthTokens::new("secret");
        let other = AuthTokens::new("different");
        let token = tokens.issue_session(1, "a@b.c").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn token_hash_is_stable_hex() {
        let a = hash_token("bearer-value");
        let b = hash_token("bearer-value");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, hash_token("other"));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }
}
