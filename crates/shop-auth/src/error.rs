//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
///
/// Everything here is recoverable by the caller: bad credentials ask for
/// re-entry, network failures ask for a retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Email/password pair was rejected by the provider.
    #[error("invalid credentials")]
    InvalidCredential,

    /// An account already exists for this email.
    #[error("email already in use: {0}")]
    EmailInUse(String),

    /// Password rejected at sign-up.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Provider-side failure with no better classification.
    #[error("auth provider error: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Stable provider-style error code.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredential => "auth/invalid-credential",
            AuthError::EmailInUse(_) => "auth/email-already-in-use",
            AuthError::WeakPassword(_) => "auth/weak-password",
            AuthError::Network(_) => "auth/network-request-failed",
            AuthError::Unknown(_) => "auth/unknown",
        }
    }

    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Network(_) | AuthError::Unknown(_))
    }
}
