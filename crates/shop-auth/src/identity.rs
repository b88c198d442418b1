//! Identity and session-state types.

use serde::{Deserialize, Serialize};
use shop_catalog::ids::UserId;

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque provider-assigned user id.
    pub uid: UserId,
    /// Email address the account was created with.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: UserId, email: impl Into<String>) -> Self {
        Self {
            uid,
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name to show in a header: display name when set, email otherwise.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// The process-wide view of "who is signed in".
///
/// `Uninitialized` lasts from construction until the provider delivers its
/// first state event; after that the store is always either `Authenticated`
/// or `Anonymous`, overwritten on every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionState {
    /// No provider event has arrived yet.
    #[default]
    Uninitialized,
    /// Provider reported a signed-in user.
    Authenticated(Identity),
    /// Provider reported no signed-in user.
    Anonymous,
}

impl SessionState {
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, SessionState::Uninitialized)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, SessionState::Anonymous)
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}
