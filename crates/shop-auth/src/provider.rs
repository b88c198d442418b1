//! Identity-provider contract.

use crate::error::AuthError;
use crate::identity::Identity;
use async_trait::async_trait;
use std::sync::Arc;

/// Callback receiving `Some(identity)` on sign-in and `None` on sign-out.
pub type StateListener = Arc<dyn Fn(Option<Identity>) + Send + Sync>;

/// External identity provider consumed by the session store.
///
/// The credential calls resolve when the provider has accepted or rejected
/// the exchange; the resulting session change arrives separately through
/// the listener registered with [`on_state_change`]. Implementations must
/// deliver one event to a freshly registered listener reflecting the
/// current state at registration time, then one event per transition.
///
/// [`on_state_change`]: IdentityProvider::on_state_change
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a signed-in session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register a state-change listener.
    fn on_state_change(&self, listener: StateListener);
}
