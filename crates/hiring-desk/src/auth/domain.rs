use std::fmt;

use serde::{Deserialize, Serialize};

/// Role stored alongside an account. Only `admin` may log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRole {
    Admin,
    Other(String),
}

impl AccountRole {
    pub fn as_str(&self) -> &str {
        match self {
            AccountRole::Admin => "admin",
            AccountRole::Other(role) => role,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AccountRole::Admin)
    }
}

impl From<String> for AccountRole {
    fn from(value: String) -> Self {
        if value == "admin" {
            Self::Admin
        } else {
            Self::Other(value)
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `accounts` table. Passwords are compared as stored.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: AccountRole,
}

impl Account {
    /// Display name built from first and last name.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub id: i64,
    pub role: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl LoginResponse {
    pub fn new(account: Account, token: String) -> Self {
        Self {
            message: "Login successful".to_string(),
            token,
            id: account.id,
            role: account.role.to_string(),
            name: account.name(),
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
        }
    }
}
