//! Authorization-code flow against Google.
//!
//! 1. `begin` issues a state, remembers it, and returns the consent URL.
//! 2. Google redirects the browser to `/auth/callback`.
//! 3. `handle_callback` checks the state, exchanges the code, stores the session.

use serde::{Deserialize, Serialize};
use todoshare_core::Clock;
use url::Url;

use crate::app_config::OAuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::session::{AuthorizationSession, SessionVault, TokenResponse};
use crate::state::generate_state;

/// Query parameters Google appends to the redirect URI.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Connection status safe to hand to the browser (no tokens).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub has_refresh_token: bool,
    pub expires_at_millis: Option<i64>,
}

#[derive(Clone)]
pub struct GoogleAuth {
    config: OAuthConfig,
    http: reqwest::Client,
    vault: SessionVault,
}

impl GoogleAuth {
    pub fn new(config: OAuthConfig, vault: SessionVault) -> Self {
        GoogleAuth {
            config,
            http: reqwest::Client::new(),
            vault,
        }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    pub fn vault(&self) -> &SessionVault {
        &self.vault
    }

    /// The consent URL for a given state.
    pub fn authorization_url(&self, state: &str) -> AuthResult<Url> {
        let url = Url::parse_with_params(
            &self.config.authorization_endpoint,
            &[
                ("client_id", self.config.credentials.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", self.config.scope().as_str()),
                ("response_type", "code"),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| {
            AuthError::Config(format!(
                "authorization endpoint {:?}: {e}",
                self.config.authorization_endpoint
            ))
        })?;

        Ok(url)
    }

    /// Start a login: issue and remember a fresh state, return the consent URL.
    pub fn begin(&self) -> AuthResult<Url> {
        let state = generate_state();
        self.vault.save_pending_state(&state)?;

        tracing::debug!("issued new authorization state");
        self.authorization_url(&state)
    }

    /// Redeem an authorization code at the token endpoint. Single attempt.
    pub async fn exchange_code(&self, code: &str) -> AuthResult<AuthorizationSession> {
        let form = [
            ("client_id", self.config.credentials.client_id.as_str()),
            ("client_secret", self.config.credentials.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "token exchange request failed");
                AuthError::Exchange
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "token endpoint rejected code");
            return Err(AuthError::Exchange);
        }

        let tokens: TokenResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to parse token response");
            AuthError::Exchange
        })?;

        let session = tokens.into_session(self.vault.clock())?;
        if !session.is_valid_at(self.vault.clock().now_millis()) {
            tracing::warn!("token endpoint returned an unusable session");
            return Err(AuthError::Exchange);
        }

        Ok(session)
    }

    /// Finish a login from the callback query.
    ///
    /// A provider error is reported before anything in the store is touched.
    pub async fn handle_callback(&self, params: CallbackParams) -> AuthResult<AuthorizationSession> {
        if let Some(error) = params.error {
            tracing::info!(%error, "provider denied authorization");
            return Err(AuthError::ProviderDenied(error));
        }

        if !self.vault.consume_pending_state(params.state.as_deref())? {
            tracing::warn!("callback state missing or does not match");
            return Err(AuthError::StateMismatch);
        }

        let code = params
            .code
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCode)?;

        let session = self.exchange_code(&code).await?;
        self.vault.persist(&session)?;

        tracing::info!(
            expires_at_millis = session.expires_at_millis,
            has_refresh_token = session.refresh_token.is_some(),
            "google account connected"
        );

        Ok(session)
    }

    pub fn status(&self) -> AuthResult<ConnectionStatus> {
        let stored = self.vault.load()?;

        Ok(ConnectionStatus {
            connected: stored.is_valid(),
            has_refresh_token: stored.refresh_token.is_some(),
            expires_at_millis: stored.expires_at_millis,
        })
    }

    pub fn is_connected(&self) -> AuthResult<bool> {
        Ok(self.vault.load()?.is_valid())
    }

    /// Forget the stored session. Safe to call when already disconnected.
    pub fn disconnect(&self) -> AuthResult<()> {
        self.vault.clear()?;
        tracing::info!("google account disconnected");
        Ok(())
    }
}
