//! Google login endpoints.
//!
//! The browser never sees a token: it is redirected out, comes back to
//! `/auth/callback`, and afterwards only reads `/auth/status`.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Serialize;
use todoshare_google::{AuthError, CallbackParams, ConnectionStatus};

use crate::routes::AppError;
use crate::state::AppState;

const START_PATH: &str = "/auth/google";

pub fn router() -> Router<AppState> {
    Router::new()
        .route(START_PATH, get(start))
        .route("/auth/callback", get(callback))
        .route("/auth/status", get(status))
        .route("/auth/disconnect", post(disconnect))
}

pub(crate) fn status_for(err: &AuthError) -> StatusCode {
    match err {
        AuthError::ProviderDenied(_) | AuthError::MissingCode | AuthError::StateMismatch => {
            StatusCode::BAD_REQUEST
        }
        AuthError::Exchange => StatusCode::BAD_GATEWAY,
        AuthError::Config(_) | AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /auth/google - Redirect to Google's consent screen
async fn start(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let url = state.auth.begin()?;
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallbackStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub status: CallbackStatus,
    pub message: String,
    /// Where to send the user to try again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_url: Option<String>,
}

/// GET /auth/callback - Google redirects here with `code`/`state` or `error`
///
/// Every failure ends the flow; nothing is retried automatically.
async fn callback(State(state): State<AppState>, Query(params): Query<CallbackParams>) -> Response {
    match state.auth.handle_callback(params).await {
        Ok(_) => Json(CallbackResponse {
            status: CallbackStatus::Success,
            message: "Your Google account has been connected.".to_string(),
            retry_url: None,
        })
        .into_response(),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                tracing::error!(error = %err, "google callback failed");
            }

            let body = Json(CallbackResponse {
                status: CallbackStatus::Error,
                message: err.to_string(),
                retry_url: Some(START_PATH.to_string()),
            });
            (status, body).into_response()
        }
    }
}

/// GET /auth/status - Whether a valid Google session exists
async fn status(State(state): State<AppState>) -> Result<Json<ConnectionStatus>, AppError> {
    Ok(Json(state.auth.status()?))
}

/// POST /auth/disconnect - Forget the Google session
async fn disconnect(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.auth.disconnect()?;
    Ok(StatusCode::NO_CONTENT)
}
