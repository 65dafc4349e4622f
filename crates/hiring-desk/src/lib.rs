//! Job application intake and review with a single admin login.

pub mod applications;
pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod token;
