//! Signed session tokens for authenticated admins.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Tokens stay valid for one day after issue.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Registered claims carried by every issued token.
///
/// Only the subject (the account e-mail) identifies the holder; account id
/// and role never travel inside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity a token is requested for.
#[derive(Debug, Clone, Copy)]
pub struct TokenScope<'a> {
    pub account_id: i64,
    pub email: &'a str,
    pub role: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    MissingSecret,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// HS256 issuer holding the process-wide signing key.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        })
    }

    pub fn issue(&self, scope: TokenScope<'_>) -> Result<String, TokenError> {
        self.issue_at(scope, Utc::now())
    }

    pub fn issue_at(
        &self,
        scope: TokenScope<'_>,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: scope.email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.lifetime).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        tracing::debug!(
            account_id = scope.account_id,
            role = scope.role,
            expires_at = claims.exp,
            "issued session token"
        );
        Ok(token)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
