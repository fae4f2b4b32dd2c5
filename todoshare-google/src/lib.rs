//! todoshare-google - Google account connection for todoshare.
//!
//! Runs the OAuth2 authorization-code flow on the server side, so the
//! client secret never reaches the browser, and keeps the resulting session
//! in an injected `SessionStore`.

pub mod app_config;
pub mod auth;
pub mod error;
pub mod session;
pub mod state;

pub use app_config::{Credentials, OAuthConfig};
pub use auth::{CallbackParams, ConnectionStatus, GoogleAuth};
pub use error::{AuthError, AuthResult};
pub use session::{AuthorizationSession, SessionVault, StoredSession};
