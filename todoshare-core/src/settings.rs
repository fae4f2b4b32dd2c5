//! Per-user switches for the Google integration.

use serde::{Deserialize, Serialize};

use crate::contact::Permission;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    /// Offer Google contacts as share targets.
    pub contacts_enabled: bool,
    /// Allow attaching Drive files to tasks.
    pub drive_enabled: bool,
    /// Permission given to newly added shares.
    pub default_permission: Permission,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        IntegrationSettings {
            contacts_enabled: true,
            drive_enabled: true,
            default_permission: Permission::Read,
        }
    }
}
