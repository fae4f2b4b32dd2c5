//! Task sharing endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use todoshare_core::sharing::{add_share_with, available_contacts, remove_share, toggle_permission};
use todoshare_core::{Contact, CoreError, Permission, Task, Update};

use crate::routes::AppError;
use crate::routes::lists::SearchQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists/{list_id}/tasks/{task_id}/contacts", get(list_contacts))
        .route("/lists/{list_id}/tasks/{task_id}/shares", post(add))
        .route("/lists/{list_id}/tasks/{task_id}/shares/{user_id}", delete(remove))
        .route("/lists/{list_id}/tasks/{task_id}/shares/{user_id}/toggle", post(toggle))
}

#[derive(Serialize)]
pub struct ContactsResponse {
    /// False when contacts are unavailable because Google isn't connected or is switched off.
    pub google_connected: bool,
    pub contacts: Vec<Contact>,
}

/// GET /lists/:id/tasks/:task_id/contacts?q= - Contacts the task can still be shared with
async fn list_contacts(
    State(state): State<AppState>,
    Path((list_id, task_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ContactsResponse>, AppError> {
    let targets = state.share_targets()?;

    let workspace = state.workspace.read();
    let task = workspace.list(&list_id)?.task(&task_id)?;

    Ok(Json(ContactsResponse {
        google_connected: targets.is_some(),
        contacts: targets
            .map(|all| available_contacts(all, &task.shared_with, &query.q))
            .unwrap_or_default(),
    }))
}

#[derive(Deserialize)]
pub struct AddShareRequest {
    pub contact_id: String,
    /// Falls back to the configured default permission.
    pub permission: Option<Permission>,
}

/// POST /lists/:id/tasks/:task_id/shares - Share a task with a contact
async fn add(
    State(state): State<AppState>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(req): Json<AddShareRequest>,
) -> Result<Json<Update<Task>>, AppError> {
    let contact = state
        .share_targets()?
        .unwrap_or_default()
        .iter()
        .find(|c| c.id == req.contact_id)
        .cloned()
        .ok_or_else(|| CoreError::ContactNotFound(req.contact_id.clone()))?;

    let permission = req
        .permission
        .unwrap_or_else(|| state.settings.read().default_permission);

    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| add_share_with(task, &contact, permission))?;

    tracing::debug!(task = %task_id, contact = %contact.id, outcome = ?update.outcome, "add share");
    Ok(Json(update))
}

/// DELETE /lists/:id/tasks/:task_id/shares/:user_id - Stop sharing with a user
async fn remove(
    State(state): State<AppState>,
    Path((list_id, task_id, user_id)): Path<(String, String, String)>,
) -> Result<Json<Update<Task>>, AppError> {
    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| remove_share(task, &user_id))?;
    Ok(Json(update))
}

/// POST /lists/:id/tasks/:task_id/shares/:user_id/toggle - Flip read/edit
async fn toggle(
    State(state): State<AppState>,
    Path((list_id, task_id, user_id)): Path<(String, String, String)>,
) -> Result<Json<Update<Task>>, AppError> {
    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| toggle_permission(task, &user_id))?;
    Ok(Json(update))
}
