use std::sync::Arc;

use super::domain::{LoginRequest, LoginResponse};
use super::repository::AccountRepository;
use crate::storage::StoreError;
use crate::token::{TokenError, TokenIssuer, TokenScope};

/// Checks admin credentials and issues signed session tokens.
pub struct AuthService<R> {
    accounts: Arc<R>,
    issuer: TokenIssuer,
}

impl<R> AuthService<R>
where
    R: AccountRepository + 'static,
{
    pub fn new(accounts: Arc<R>, issuer: TokenIssuer) -> Self {
        Self { accounts, issuer }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthServiceError> {
        if request.email.is_empty() || request.password.is_empty() {
            tracing::warn!("login rejected: missing email or password");
            return Err(AuthServiceError::InvalidRequest);
        }

        let account = match self.accounts.find_by_email(&request.email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::warn!(email = %request.email, "login rejected: unknown account");
                return Err(AuthServiceError::InvalidCredentials);
            }
            Err(err) => {
                tracing::error!(email = %request.email, error = %err, "account lookup failed");
                return Err(AuthServiceError::Store(err));
            }
        };

        if account.password != request.password {
            tracing::warn!(account_id = account.id, "login rejected: password mismatch");
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !account.role.is_admin() {
            tracing::warn!(account_id = account.id, role = %account.role, "login rejected: not an admin");
            return Err(AuthServiceError::Forbidden);
        }

        let token = self.issuer.issue(TokenScope {
            account_id: account.id,
            email: &account.email,
            role: account.role.as_str(),
        })?;

        tracing::info!(account_id = account.id, "admin logged in");
        Ok(LoginResponse::new(account, token))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email and password are required")]
    InvalidRequest,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is not an admin")]
    Forbidden,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
