use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::auth::domain::{Account, AccountRole};
use crate::auth::repository::AccountRepository;
use crate::auth::service::AuthService;
use crate::storage::StoreError;
use crate::token::TokenIssuer;

pub(super) const SECRET: &str = "test-signing-secret";

#[derive(Default, Clone)]
pub(super) struct MemoryAccounts {
    accounts: HashMap<String, Account>,
}

impl MemoryAccounts {
    pub(super) fn with(mut self, account: Account) -> Self {
        self.accounts.insert(account.email.clone(), account);
        self
    }
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(email).cloned())
    }
}

pub(super) struct UnavailableAccounts;

#[async_trait]
impl AccountRepository for UnavailableAccounts {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn account(id: i64, email: &str, password: &str, role: &str) -> Account {
    Account {
        id,
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: AccountRole::from(role.to_string()),
    }
}

pub(super) fn seeded_accounts() -> MemoryAccounts {
    MemoryAccounts::default()
        .with(account(1, "admin@example.com", "s3cret", "admin"))
        .with(account(2, "user@example.com", "hunter2", "user"))
}

pub(super) fn build_service<R>(accounts: R) -> AuthService<R>
where
    R: AccountRepository + 'static,
{
    let issuer = TokenIssuer::new(SECRET).expect("issuer");
    AuthService::new(Arc::new(accounts), issuer)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
