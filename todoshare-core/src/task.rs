//! Tasks, task lists and the workspace that owns them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::contact::SharedUser;
use crate::error::{CoreError, CoreResult};
use crate::outcome::{Outcome, Update};

/// A file attached to a task (e.g. a Drive link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Attachment {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Unique by user id, in the order shares were added.
    #[serde(default)]
    pub shared_with: Vec<SharedUser>,
}

impl Task {
    /// Create a new, uncompleted task with a generated id.
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            completed: false,
            due_date: None,
            attachments: Vec::new(),
            shared_with: Vec::new(),
        }
    }

    pub fn shared_user(&self, user_id: &str) -> Option<&SharedUser> {
        self.shared_with.iter().find(|user| user.id() == user_id)
    }

    /// Set the completion flag. `NoOp` if it already has that value.
    pub fn toggle_completion(&self, completed: bool) -> Update<Task> {
        if self.completed == completed {
            return Update::no_op(self.clone());
        }

        let mut task = self.clone();
        task.completed = completed;
        Update::applied(task)
    }

    pub fn add_attachment(&self, attachment: Attachment) -> Update<Task> {
        if attachment.url.trim().is_empty() {
            return Update::rejected(self.clone(), "attachment has no url");
        }
        if self.attachments.iter().any(|a| a.id == attachment.id) {
            return Update::no_op(self.clone());
        }

        let mut task = self.clone();
        task.attachments.push(attachment);
        Update::applied(task)
    }

    pub fn remove_attachment(&self, attachment_id: &str) -> Update<Task> {
        if !self.attachments.iter().any(|a| a.id == attachment_id) {
            return Update::no_op(self.clone());
        }

        let mut task = self.clone();
        task.attachments.retain(|a| a.id != attachment_id);
        Update::applied(task)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TaskList {
            id: id.into(),
            name: name.into(),
            is_shared: false,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> CoreResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| CoreError::TaskNotFound(task_id.to_string()))
    }

    /// Add a task. Task ids are unique within a list.
    pub fn insert_task(&mut self, task: Task) -> Outcome {
        if self.tasks.iter().any(|t| t.id == task.id) {
            return Outcome::rejected(format!("task id {} already exists in list {}", task.id, self.id));
        }
        self.tasks.push(task);
        Outcome::Applied
    }

    pub fn remove_task(&mut self, task_id: &str) -> Outcome {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task_id);

        if self.tasks.len() == before {
            Outcome::NoOp
        } else {
            Outcome::Applied
        }
    }

    /// Write an updated task back into the list, replacing the task with the same id.
    pub fn commit(&mut self, task: Task) -> CoreResult<()> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| CoreError::TaskNotFound(task.id.clone()))?;
        *slot = task;
        Ok(())
    }
}

/// All task lists known to the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    pub lists: Vec<TaskList>,
}

impl Workspace {
    pub fn new(lists: Vec<TaskList>) -> Self {
        Workspace { lists }
    }

    pub fn list(&self, list_id: &str) -> CoreResult<&TaskList> {
        self.lists
            .iter()
            .find(|l| l.id == list_id)
            .ok_or_else(|| CoreError::ListNotFound(list_id.to_string()))
    }

    pub fn list_mut(&mut self, list_id: &str) -> CoreResult<&mut TaskList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| CoreError::ListNotFound(list_id.to_string()))
    }

    /// Apply `f` to a task and commit the result if it changed anything.
    pub fn update_task<F>(&mut self, list_id: &str, task_id: &str, f: F) -> CoreResult<Update<Task>>
    where
        F: FnOnce(&Task) -> Update<Task>,
    {
        let list = self.list_mut(list_id)?;
        let update = f(list.task(task_id)?);

        if update.outcome.is_applied() {
            list.commit(update.value.clone())?;
        }

        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TaskList {
        let mut list = TaskList::new("work", "Work Projects");
        let mut task = Task::new("Review design mockups");
        task.id = "t1".into();
        list.tasks.push(task);
        list
    }

    #[test]
    fn toggle_completion_is_idempotent() {
        let task = Task::new("Schedule team meeting");

        let done = task.toggle_completion(true);
        assert_eq!(done.outcome, Outcome::Applied);
        assert!(done.value.completed);

        let again = done.value.toggle_completion(true);
        assert_eq!(again.outcome, Outcome::NoOp);
        assert!(again.value.completed);
    }

    #[test]
    fn insert_task_rejects_duplicate_id() {
        let mut list = sample_list();
        let mut dup = Task::new("Another");
        dup.id = "t1".into();

        assert!(matches!(list.insert_task(dup), Outcome::Rejected(_)));
        assert_eq!(list.tasks.len(), 1);
    }

    #[test]
    fn remove_task_reports_no_op_when_absent() {
        let mut list = sample_list();

        assert_eq!(list.remove_task("missing"), Outcome::NoOp);
        assert_eq!(list.remove_task("t1"), Outcome::Applied);
        assert!(list.tasks.is_empty());
    }

    #[test]
    fn workspace_update_commits_only_applied_changes() {
        let mut workspace = Workspace::new(vec![sample_list()]);

        let update = workspace
            .update_task("work", "t1", |t| t.toggle_completion(true))
            .unwrap();
        assert!(update.outcome.is_applied());
        assert!(workspace.list("work").unwrap().task("t1").unwrap().completed);

        let err = workspace
            .update_task("work", "nope", |t| t.toggle_completion(true))
            .unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(_)));
    }

    #[test]
    fn attachments_keep_insertion_order() {
        let task = Task::new("Complete project proposal");
        let first = Attachment::new("proposal.pdf", "https://example.com/proposal.pdf");
        let second = Attachment::new("notes.docx", "https://example.com/notes.docx");
        let first_id = first.id.clone();

        let task = task.add_attachment(first).value;
        let task = task.add_attachment(second).value;
        let names: Vec<_> = task.attachments.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["proposal.pdf", "notes.docx"]);

        let removed = task.remove_attachment(&first_id);
        assert!(removed.outcome.is_applied());
        assert_eq!(removed.value.attachments.len(), 1);
        assert_eq!(removed.value.remove_attachment(&first_id).outcome, Outcome::NoOp);
    }

    #[test]
    fn attachment_without_url_is_rejected() {
        let task = Task::new("x");
        let update = task.add_attachment(Attachment::new("empty", "  "));
        assert!(matches!(update.outcome, Outcome::Rejected(_)));
        assert!(update.value.attachments.is_empty());
    }
}
