//! Task search and the pending/completed split shown per list.

use serde::Serialize;

use crate::task::Task;

/// Tasks whose title or description contains `query`, case-insensitive.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let needle = query.to_lowercase();

    tasks
        .iter()
        .filter(|task| {
            task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .collect()
}

#[derive(Debug, Default, Serialize)]
pub struct TaskPartition<'a> {
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

pub fn partition_by_completion<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> TaskPartition<'a> {
    let (completed, pending): (Vec<&Task>, Vec<&Task>) = tasks.into_iter().partition(|task| task.completed);
    TaskPartition { pending, completed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks() -> Vec<Task> {
        let mut proposal = Task::new("Complete project proposal");
        proposal.description = Some("Finish the proposal for the new client project".into());

        let mut meeting = Task::new("Schedule team meeting");
        meeting.description = Some("Set up weekly sync with the development team".into());
        meeting.completed = true;

        let mockups = Task::new("Review design mockups");

        vec![proposal, meeting, mockups]
    }

    #[test]
    fn matches_title_and_description() {
        let tasks = tasks();

        let by_title = filter_tasks(&tasks, "MOCKUPS");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Review design mockups");

        let by_description = filter_tasks(&tasks, "weekly sync");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "Schedule team meeting");
    }

    #[test]
    fn empty_query_matches_everything() {
        let tasks = tasks();
        assert_eq!(filter_tasks(&tasks, "").len(), 3);
    }

    #[test]
    fn partition_splits_on_completed() {
        let tasks = tasks();
        let split = partition_by_completion(filter_tasks(&tasks, ""));

        assert_eq!(split.pending.len(), 2);
        assert_eq!(split.completed.len(), 1);
        assert_eq!(split.completed[0].title, "Schedule team meeting");
    }
}
