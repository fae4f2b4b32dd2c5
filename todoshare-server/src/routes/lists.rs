//! Task list and task endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use todoshare_core::search::{filter_tasks, partition_by_completion};
use todoshare_core::{Attachment, Outcome, Task, Update};
use url::Url;

use crate::routes::AppError;
use crate::state::AppState;

const DRIVE_HOST: &str = "drive.google.com";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists", get(list_lists))
        .route("/lists/{list_id}/tasks", get(list_tasks).post(create_task))
        .route("/lists/{list_id}/tasks/{task_id}", delete(delete_task))
        .route("/lists/{list_id}/tasks/{task_id}/completed", put(set_completed))
        .route("/lists/{list_id}/tasks/{task_id}/attachments", post(add_attachment))
        .route(
            "/lists/{list_id}/tasks/{task_id}/attachments/{attachment_id}",
            delete(remove_attachment),
        )
}

/// List info returned by API
#[derive(Serialize)]
pub struct ListSummary {
    pub id: String,
    pub name: String,
    pub is_shared: bool,
    pub task_count: usize,
}

/// GET /lists - List all task lists
async fn list_lists(State(state): State<AppState>) -> Json<Vec<ListSummary>> {
    let workspace = state.workspace.read();

    let lists = workspace
        .lists
        .iter()
        .map(|list| ListSummary {
            id: list.id.clone(),
            name: list.name.clone(),
            is_shared: list.is_shared,
            task_count: list.tasks.len(),
        })
        .collect();

    Json(lists)
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct TasksResponse {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

/// GET /lists/:id/tasks?q= - Search a list, split into pending and completed
async fn list_tasks(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<TasksResponse>, AppError> {
    let workspace = state.workspace.read();
    let list = workspace.list(&list_id)?;

    let split = partition_by_completion(filter_tasks(&list.tasks, &query.q));

    Ok(Json(TasksResponse {
        pending: split.pending.into_iter().cloned().collect(),
        completed: split.completed.into_iter().cloned().collect(),
    }))
}

/// Request body for creating a task
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// POST /lists/:id/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Update<Task>>), AppError> {
    let mut task = Task::new(req.title.trim());
    task.description = req.description;
    task.due_date = req.due_date;

    if task.title.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Update::rejected(task, "task title is empty")),
        ));
    }

    let mut workspace = state.workspace.write();
    let outcome = workspace.list_mut(&list_id)?.insert_task(task.clone());

    let status = match outcome {
        Outcome::Applied => StatusCode::CREATED,
        Outcome::NoOp => StatusCode::OK,
        Outcome::Rejected(_) => StatusCode::CONFLICT,
    };
    Ok((status, Json(Update { outcome, value: task })))
}

/// DELETE /lists/:id/tasks/:task_id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path((list_id, task_id)): Path<(String, String)>,
) -> Result<Json<Outcome>, AppError> {
    let mut workspace = state.workspace.write();
    let outcome = workspace.list_mut(&list_id)?.remove_task(&task_id);
    Ok(Json(outcome))
}

#[derive(Deserialize)]
pub struct CompletedRequest {
    pub completed: bool,
}

/// PUT /lists/:id/tasks/:task_id/completed - Mark a task (un)done
async fn set_completed(
    State(state): State<AppState>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(req): Json<CompletedRequest>,
) -> Result<Json<Update<Task>>, AppError> {
    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| task.toggle_completion(req.completed))?;
    Ok(Json(update))
}

#[derive(Deserialize)]
pub struct AttachmentRequest {
    pub name: String,
    pub url: String,
}

/// POST /lists/:id/tasks/:task_id/attachments - Attach a file
///
/// Drive links need a connected account with Drive switched on.
async fn add_attachment(
    State(state): State<AppState>,
    Path((list_id, task_id)): Path<(String, String)>,
    Json(req): Json<AttachmentRequest>,
) -> Result<Json<Update<Task>>, AppError> {
    let host = Url::parse(req.url.trim())
        .ok()
        .map(|url| url.host_str().map(str::to_ascii_lowercase));
    let drive_allowed = state.settings.read().drive_enabled && state.auth.is_connected()?;

    let attachment = Attachment::new(req.name, req.url);
    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| match host.as_ref() {
            None if attachment.url.trim().is_empty() => task.add_attachment(attachment),
            None => Update::rejected(task.clone(), "attachment url is not a valid url"),
            Some(Some(host)) if host == DRIVE_HOST && !drive_allowed => {
                Update::rejected(task.clone(), "google drive is not connected")
            }
            Some(_) => task.add_attachment(attachment),
        })?;
    Ok(Json(update))
}

/// DELETE /lists/:id/tasks/:task_id/attachments/:attachment_id - Remove an attachment
async fn remove_attachment(
    State(state): State<AppState>,
    Path((list_id, task_id, attachment_id)): Path<(String, String, String)>,
) -> Result<Json<Update<Task>>, AppError> {
    let update = state
        .workspace
        .write()
        .update_task(&list_id, &task_id, |task| task.remove_attachment(&attachment_id))?;
    Ok(Json(update))
}
