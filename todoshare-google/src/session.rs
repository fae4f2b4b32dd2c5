//! Stores the Google session (access token) in a [`SessionStore`].
//!
//! Layout, one entry per key:
//!   google_access_token   access token
//!   google_refresh_token  refresh token, when Google returned one
//!   google_token_expiry   expiry as epoch milliseconds
//!   google_oauth_state    state issued with the pending redirect

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use todoshare_core::{Clock, CoreResult, SessionStore};

use crate::error::{AuthError, AuthResult};
use crate::state::states_match;

pub const ACCESS_TOKEN_KEY: &str = "google_access_token";
pub const REFRESH_TOKEN_KEY: &str = "google_refresh_token";
pub const EXPIRY_KEY: &str = "google_token_expiry";
pub const STATE_KEY: &str = "google_oauth_state";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at_millis: i64,
}

impl AuthorizationSession {
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        !self.access_token.is_empty() && now_millis < self.expires_at_millis
    }
}

/// Token endpoint response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
}

impl TokenResponse {
    /// Turn the response into a session expiring `expires_in` seconds from now.
    ///
    /// A lifetime that is negative or too large to represent is an exchange failure.
    pub fn into_session(self, clock: &dyn Clock) -> AuthResult<AuthorizationSession> {
        let expires_at = Some(self.expires_in)
            .filter(|secs| *secs >= 0)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                tracing::warn!(expires_in = self.expires_in, "token lifetime out of range");
                AuthError::Exchange
            })?;

        Ok(AuthorizationSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token.filter(|t| !t.is_empty()),
            expires_at_millis: expires_at.timestamp_millis(),
        })
    }
}

/// What `load` found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at_millis: Option<i64>,
    pub is_expired: bool,
}

impl StoredSession {
    pub fn is_valid(&self) -> bool {
        self.access_token.is_some() && !self.is_expired
    }
}

/// Reads and writes the session entries.
#[derive(Clone)]
pub struct SessionVault {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
}

impl SessionVault {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>) -> Self {
        SessionVault { store, clock }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Replace whatever session is stored. Last write wins; nothing is merged,
    /// so a session without a refresh token drops the previous one.
    pub fn persist(&self, session: &AuthorizationSession) -> CoreResult<()> {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token)?;

        match &session.refresh_token {
            Some(token) => self.store.set(REFRESH_TOKEN_KEY, token)?,
            None => self.store.remove(REFRESH_TOKEN_KEY)?,
        }

        self.store
            .set(EXPIRY_KEY, &session.expires_at_millis.to_string())
    }

    /// Load the stored session. Missing or unreadable expiry counts as expired.
    pub fn load(&self) -> CoreResult<StoredSession> {
        let access_token = self.store.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.store.get(REFRESH_TOKEN_KEY)?;
        let expires_at_millis = self
            .store
            .get(EXPIRY_KEY)?
            .and_then(|raw| raw.trim().parse::<i64>().ok());

        let is_expired = match expires_at_millis {
            Some(expiry) => self.clock.now_millis() >= expiry,
            None => true,
        };

        Ok(StoredSession {
            access_token,
            refresh_token,
            expires_at_millis,
            is_expired,
        })
    }

    pub fn clear(&self) -> CoreResult<()> {
        self.store.remove(ACCESS_TOKEN_KEY)?;
        self.store.remove(REFRESH_TOKEN_KEY)?;
        self.store.remove(EXPIRY_KEY)
    }

    pub(crate) fn save_pending_state(&self, state: &str) -> CoreResult<()> {
        self.store.set(STATE_KEY, state)
    }

    /// Check `presented` against the pending state and consume it on a match.
    ///
    /// A mismatch leaves the pending state in place, so a stray callback
    /// cannot cancel a login that is still in progress.
    pub(crate) fn consume_pending_state(&self, presented: Option<&str>) -> CoreResult<bool> {
        let Some(expected) = self.store.get(STATE_KEY)? else {
            return Ok(false);
        };

        let matched = presented.is_some_and(|actual| states_match(&expected, actual));
        if matched {
            self.store.remove(STATE_KEY)?;
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use todoshare_core::{ManualClock, MemoryStore};

    fn vault() -> (SessionVault, Arc<MemoryStore>, Arc<ManualClock>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
        ));
        (SessionVault::new(store.clone(), clock.clone()), store, clock)
    }

    #[test]
    fn load_after_persist_reports_expiry() {
        let (vault, _, clock) = vault();
        let now = clock.now_millis();

        let fresh = AuthorizationSession {
            access_token: "T".into(),
            refresh_token: Some("R".into()),
            expires_at_millis: now + 1,
        };
        vault.persist(&fresh).unwrap();
        let loaded = vault.load().unwrap();
        assert!(!loaded.is_expired);
        assert_eq!(loaded.access_token.as_deref(), Some("T"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("R"));

        let at_boundary = AuthorizationSession {
            expires_at_millis: now,
            ..fresh
        };
        vault.persist(&at_boundary).unwrap();
        assert!(vault.load().unwrap().is_expired);
    }

    #[test]
    fn clear_then_load_is_empty_and_expired() {
        let (vault, store, _) = vault();
        vault
            .persist(&AuthorizationSession {
                access_token: "T".into(),
                refresh_token: None,
                expires_at_millis: i64::MAX,
            })
            .unwrap();

        vault.clear().unwrap();
        vault.clear().unwrap();

        let loaded = vault.load().unwrap();
        assert_eq!(loaded.access_token, None);
        assert!(loaded.is_expired);
        assert!(!loaded.is_valid());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn missing_or_garbage_expiry_is_expired() {
        let (vault, store, _) = vault();

        store.set(ACCESS_TOKEN_KEY, "T").unwrap();
        assert!(vault.load().unwrap().is_expired);

        store.set(EXPIRY_KEY, "not-a-number").unwrap();
        assert!(vault.load().unwrap().is_expired);
    }

    #[test]
    fn reauthentication_without_refresh_token_drops_old_one() {
        let (vault, store, _) = vault();

        let first = AuthorizationSession {
            access_token: "T1".into(),
            refresh_token: Some("R1".into()),
            expires_at_millis: i64::MAX,
        };
        vault.persist(&first).unwrap();

        let second = AuthorizationSession {
            access_token: "T2".into(),
            refresh_token: None,
            expires_at_millis: i64::MAX,
        };
        vault.persist(&second).unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("T2"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn token_response_expiry_is_relative_to_clock() {
        let (vault, _, clock) = vault();
        let response = TokenResponse {
            access_token: "T".into(),
            refresh_token: Some(String::new()),
            expires_in: 3600,
        };

        let session = response.into_session(vault.clock()).unwrap();

        assert_eq!(session.expires_at_millis, clock.now_millis() + 3_600_000);
        assert_eq!(session.refresh_token, None);
    }

    #[test]
    fn out_of_range_lifetime_is_an_exchange_error() {
        let (vault, _, _) = vault();
        let body = r#"{"access_token":"T","expires_in":9223372036854775807}"#;
        let huge: TokenResponse = serde_json::from_str(body).unwrap();

        let err = huge.into_session(vault.clock()).unwrap_err();
        assert!(matches!(err, AuthError::Exchange));

        let negative = TokenResponse {
            access_token: "T".into(),
            refresh_token: None,
            expires_in: -1,
        };
        assert!(matches!(
            negative.into_session(vault.clock()),
            Err(AuthError::Exchange)
        ));
    }

    #[test]
    fn session_is_valid_strictly_before_expiry() {
        let session = AuthorizationSession {
            access_token: "T".into(),
            refresh_token: None,
            expires_at_millis: 1_000,
        };

        assert!(session.is_valid_at(999));
        assert!(!session.is_valid_at(1_000));

        let blank = AuthorizationSession {
            access_token: String::new(),
            ..session
        };
        assert!(!blank.is_valid_at(0));
    }

    #[test]
    fn pending_state_is_single_use() {
        let (vault, store, _) = vault();

        vault.save_pending_state("s1").unwrap();
        assert!(vault.consume_pending_state(Some("s1")).unwrap());
        assert!(!vault.consume_pending_state(Some("s1")).unwrap());
        assert_eq!(store.get(STATE_KEY).unwrap(), None);
    }

    #[test]
    fn mismatched_state_keeps_pending_login() {
        let (vault, store, _) = vault();
        vault.save_pending_state("s1").unwrap();

        assert!(!vault.consume_pending_state(Some("forged")).unwrap());
        assert!(!vault.consume_pending_state(None).unwrap());
        assert_eq!(store.get(STATE_KEY).unwrap().as_deref(), Some("s1"));

        assert!(vault.consume_pending_state(Some("s1")).unwrap());
    }
}
