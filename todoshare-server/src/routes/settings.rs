//! Integration settings endpoints

use axum::{Json, Router, extract::State, routing::get};
use todoshare_core::IntegrationSettings;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/settings/integration", get(show).put(update))
}

/// GET /settings/integration
async fn show(State(state): State<AppState>) -> Json<IntegrationSettings> {
    Json(state.settings.read().clone())
}

/// PUT /settings/integration - Replace the integration settings
async fn update(
    State(state): State<AppState>,
    Json(settings): Json<IntegrationSettings>,
) -> Json<IntegrationSettings> {
    *state.settings.write() = settings.clone();
    tracing::info!(?settings, "integration settings updated");
    Json(settings)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::TestApp;

    #[tokio::test]
    async fn disabling_contacts_hides_share_targets() {
        let app = TestApp::new();
        app.connect();

        let (status, body) = app
            .put_json(
                "/settings/integration",
                json!({ "contacts_enabled": false, "drive_enabled": true, "default_permission": "read" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["contacts_enabled"], false);

        let (_, contacts) = app.get("/lists/1/tasks/1/contacts").await;
        assert_eq!(contacts["google_connected"], false);
        assert!(contacts["contacts"].as_array().unwrap().is_empty());

        let (_, shown) = app.get("/settings/integration").await;
        assert_eq!(shown["default_permission"], "read");
    }
}
