//! Mock data.
//!
//! There is no contacts API integration and no task persistence; the server
//! starts from these.

use chrono::NaiveDate;

use crate::contact::{Contact, Permission, SharedUser};
use crate::task::{Attachment, Task, TaskList};

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

fn contact(id: &str, name: &str, email: &str) -> Contact {
    let seed = name.split_whitespace().next().unwrap_or(name);
    Contact::new(id, name, email).with_avatar(format!("{AVATAR_BASE}{seed}"))
}

/// The contacts offered when a Google account is connected.
pub fn google_contacts() -> Vec<Contact> {
    vec![
        contact("1", "Alex Johnson", "alex@example.com"),
        contact("2", "Sarah Miller", "sarah@example.com"),
        contact("3", "Michael Brown", "michael@example.com"),
        contact("4", "Emily Davis", "emily@example.com"),
        contact("5", "David Wilson", "david@example.com"),
        contact("6", "Jessica Taylor", "jessica@example.com"),
    ]
}

fn task(id: &str, title: &str, description: &str, completed: bool, due: (i32, u32, u32)) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        completed,
        due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2),
        attachments: Vec::new(),
        shared_with: Vec::new(),
    }
}

/// The task lists a fresh server starts with.
pub fn sample_lists() -> Vec<TaskList> {
    let contacts = google_contacts();

    let mut proposal = task(
        "1",
        "Complete project proposal",
        "Finish the proposal for the new client project",
        false,
        (2023, 12, 31),
    );
    proposal.attachments = vec![
        Attachment {
            id: "1".into(),
            name: "proposal.pdf".into(),
            url: "https://example.com/proposal.pdf".into(),
        },
        Attachment {
            id: "2".into(),
            name: "notes.docx".into(),
            url: "https://example.com/notes.docx".into(),
        },
    ];
    proposal.shared_with = vec![
        SharedUser::new(contacts[0].clone(), Permission::Edit),
        SharedUser::new(contacts[1].clone(), Permission::Read),
    ];

    let meeting = task(
        "2",
        "Schedule team meeting",
        "Set up weekly sync with the development team",
        true,
        (2023, 12, 15),
    );

    let mut mockups = task(
        "3",
        "Review design mockups",
        "Provide feedback on the new UI designs",
        false,
        (2023, 12, 20),
    );
    mockups.shared_with = vec![SharedUser::new(contacts[3].clone(), Permission::Edit)];

    let mut personal = TaskList::new("1", "Personal Tasks");
    personal.tasks = vec![proposal, meeting, mockups];

    let mut work = TaskList::new("2", "Work Projects");
    work.is_shared = true;

    let mut shopping = TaskList::new("3", "Shopping List");
    shopping.is_shared = true;

    let renovation = TaskList::new("4", "Home Renovation");

    vec![personal, work, shopping, renovation]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_task_ids_are_unique_per_list() {
        for list in sample_lists() {
            let mut ids: Vec<_> = list.tasks.iter().map(|t| t.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), list.tasks.len(), "duplicate task id in {}", list.name);
        }
    }

    #[test]
    fn contacts_have_avatars() {
        let contacts = google_contacts();
        assert_eq!(
            contacts[2].avatar_url.as_deref(),
            Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Michael")
        );
    }
}
