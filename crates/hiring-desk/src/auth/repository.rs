use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use super::domain::Account;
use crate::storage::StoreError;

/// Read access to the credential store.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exact, case-sensitive e-mail lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        // The column uses a binary collation, so `=` compares case-sensitively.
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, firstName, lastName, email, password, role FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }
}
