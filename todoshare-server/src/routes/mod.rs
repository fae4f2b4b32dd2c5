pub mod auth;
pub mod lists;
pub mod settings;
pub mod sharing;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use todoshare_core::CoreError;
use todoshare_google::AuthError;

use crate::state::AppState;

/// All routes, ready for `.with_state`.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(lists::router())
        .merge(sharing::router())
        .merge(settings::router())
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<CoreError>() {
            if err.is_not_found() {
                return StatusCode::NOT_FOUND;
            }
        }
        if let Some(err) = self.0.downcast_ref::<AuthError>() {
            return auth::status_for(err);
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %format!("{:#}", self.0), "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
