//! Contacts and the grants attached to them when a task is shared.

use serde::{Deserialize, Serialize};

/// A person a task can be shared with (sourced from the contacts provider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Contact {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Contact {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Case-insensitive match against display name or email.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.display_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Access level granted on a single task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    Read,
    Edit,
}

impl Permission {
    pub fn toggled(self) -> Self {
        match self {
            Permission::Read => Permission::Edit,
            Permission::Edit => Permission::Read,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Read => write!(f, "read"),
            Permission::Edit => write!(f, "edit"),
        }
    }
}

/// A contact plus the permission they were granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedUser {
    #[serde(flatten)]
    pub contact: Contact,
    pub permission: Permission,
}

impl SharedUser {
    pub fn new(contact: Contact, permission: Permission) -> Self {
        SharedUser {
            contact,
            permission,
        }
    }

    pub fn id(&self) -> &str {
        &self.contact.id
    }
}
