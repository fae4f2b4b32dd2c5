use std::sync::Arc;

use parking_lot::RwLock;
use todoshare_core::{Contact, IntegrationSettings, Workspace, fixtures};
use todoshare_google::GoogleAuth;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: GoogleAuth,
    // Locks are only held for synchronous sections, never across an await.
    pub workspace: Arc<RwLock<Workspace>>,
    pub settings: Arc<RwLock<IntegrationSettings>>,
    pub contacts: Arc<Vec<Contact>>,
}

impl AppState {
    pub fn new(auth: GoogleAuth, workspace: Workspace, contacts: Vec<Contact>) -> Self {
        AppState {
            auth,
            workspace: Arc::new(RwLock::new(workspace)),
            settings: Arc::new(RwLock::new(IntegrationSettings::default())),
            contacts: Arc::new(contacts),
        }
    }

    /// State seeded with the mock lists and contacts.
    pub fn with_fixtures(auth: GoogleAuth) -> Self {
        Self::new(
            auth,
            Workspace::new(fixtures::sample_lists()),
            fixtures::google_contacts(),
        )
    }

    /// Contacts usable as share targets right now.
    ///
    /// Google contacts are only offered while the account is connected and
    /// the contacts service is switched on.
    pub fn share_targets(&self) -> anyhow::Result<Option<&[Contact]>> {
        if !self.settings.read().contacts_enabled || !self.auth.is_connected()? {
            return Ok(None);
        }
        Ok(Some(&self.contacts))
    }
}
