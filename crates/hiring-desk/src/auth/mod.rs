//! Admin login against the credential store.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Account, AccountRole, LoginRequest, LoginResponse};
pub use repository::{AccountRepository, MySqlAccountRepository};
pub use router::auth_router;
pub use service::{AuthService, AuthServiceError};
