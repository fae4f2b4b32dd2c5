//! OAuth client configuration for the Google provider.

use serde::{Deserialize, Serialize};

pub const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Read-only contacts (share targets) and per-file Drive access (attachments).
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/contacts.readonly",
    "https://www.googleapis.com/auth/drive.file",
];

pub const CALLBACK_PATH: &str = "/auth/callback";

/// Google OAuth client credentials. Only the server ever sees the secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub credentials: Credentials,
    pub redirect_uri: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
}

impl OAuthConfig {
    /// Config for Google's real endpoints, redirecting back to `origin`.
    pub fn google(credentials: Credentials, origin: &str) -> Self {
        OAuthConfig {
            credentials,
            redirect_uri: redirect_uri(origin),
            authorization_endpoint: AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
        }
    }

    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = endpoint.into();
        self
    }

    pub fn scope(&self) -> String {
        SCOPES.join(" ")
    }
}

pub fn redirect_uri(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), CALLBACK_PATH)
}
