use std::sync::Arc;

use axum::{
    body::Bytes, extract::State, response::IntoResponse, routing::post, Json, Router,
};

use super::domain::LoginRequest;
use super::repository::AccountRepository;
use super::service::{AuthService, AuthServiceError};
use crate::error::ApiError;

/// Router builder exposing `POST /login`.
pub fn auth_router<R>(service: Arc<AuthService<R>>) -> Router
where
    R: AccountRepository + 'static,
{
    Router::new()
        .route("/login", post(login_handler::<R>))
        .with_state(service)
}

/// The body is decoded as JSON whatever its declared content type.
pub(crate) async fn login_handler<R>(
    State(service): State<Arc<AuthService<R>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    R: AccountRepository + 'static,
{
    let request = serde_json::from_slice::<LoginRequest>(&body).map_err(|err| {
        tracing::debug!(error = %err, "login body rejected");
        ApiError::from(AuthServiceError::InvalidRequest)
    })?;
    let response = service.login(request).await?;
    Ok(Json(response))
}
