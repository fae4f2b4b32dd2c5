//! Task-sharing model.
//!
//! Every function here is pure: it takes the current task and returns a new
//! one, leaving the input untouched. Committing the result back into the
//! owning [`TaskList`](crate::task::TaskList) is up to the caller.

use crate::contact::{Contact, Permission, SharedUser};
use crate::outcome::Update;
use crate::task::Task;

/// Contacts that can still be added to a task's share set.
///
/// Drops contacts already in `already_shared` and keeps those whose display
/// name or email contains `query` (case-insensitive). Input order is kept.
pub fn available_contacts(all: &[Contact], already_shared: &[SharedUser], query: &str) -> Vec<Contact> {
    let needle = query.to_lowercase();

    all.iter()
        .filter(|contact| !already_shared.iter().any(|user| user.id() == contact.id))
        .filter(|contact| contact.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Share a task with `contact` at the default permission (`read`).
pub fn add_share(task: &Task, contact: &Contact) -> Update<Task> {
    add_share_with(task, contact, Permission::default())
}

/// Share a task with `contact` at the given permission.
///
/// `NoOp` if the contact is already in the share set.
pub fn add_share_with(task: &Task, contact: &Contact, permission: Permission) -> Update<Task> {
    if contact.id.trim().is_empty() {
        return Update::rejected(task.clone(), "contact has no id");
    }
    if task.shared_user(&contact.id).is_some() {
        return Update::no_op(task.clone());
    }

    let mut task = task.clone();
    task.shared_with
        .push(SharedUser::new(contact.clone(), permission));
    Update::applied(task)
}

pub fn remove_share(task: &Task, user_id: &str) -> Update<Task> {
    if task.shared_user(user_id).is_none() {
        return Update::no_op(task.clone());
    }

    let mut task = task.clone();
    task.shared_with.retain(|user| user.id() != user_id);
    Update::applied(task)
}

/// Flip `read` <-> `edit` for one shared user.
pub fn toggle_permission(task: &Task, user_id: &str) -> Update<Task> {
    let mut task = task.clone();

    match task.shared_with.iter_mut().find(|user| user.id() == user_id) {
        Some(user) => {
            user.permission = user.permission.toggled();
            Update::applied(task)
        }
        None => Update::no_op(task),
    }
}

/// See [`Task::toggle_completion`].
pub fn toggle_completion(task: &Task, completed: bool) -> Update<Task> {
    task.toggle_completion(completed)
}
