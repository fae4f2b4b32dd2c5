use thiserror::Error;
use todoshare_core::CoreError;

/// Why a Google login did not complete.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Google redirected back with `error=...` (e.g. the user declined consent).
    #[error("Authentication failed: {0}")]
    ProviderDenied(String),

    #[error("No authorization code received")]
    MissingCode,

    /// The callback's `state` did not match the one issued with the redirect.
    #[error("Authorization state mismatch")]
    StateMismatch,

    /// The token endpoint failed or rejected the code. The cause is logged, not exposed.
    #[error("Failed to authenticate")]
    Exchange,

    /// The OAuth endpoints are misconfigured.
    #[error("Invalid OAuth configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] CoreError),
}

pub type AuthResult<T> = Result<T, AuthError>;
