//! Session store: the synchronously readable mirror of the provider.

use crate::error::AuthError;
use crate::identity::{Identity, SessionState};
use crate::provider::IdentityProvider;
use parking_lot::{Mutex, RwLock};
use shop_catalog::ids::SubscriptionId;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Listener invoked once per session-state transition.
pub type SessionListener = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Single point of truth for "who is signed in".
///
/// The store bridges the provider's asynchronous event stream into a
/// snapshot any caller can read synchronously. One instance exists per
/// process, created at startup and initialized once; tests build a fresh
/// store per case instead of sharing it.
///
/// Two completion signals exist and they are independent:
///
/// - the futures returned by [`login`]/[`logout`]/[`signup`] resolve when
///   the provider has accepted or rejected the request;
/// - the snapshot changes only when the provider's state event reaches the
///   subscription registered by [`initialize`], which then notifies
///   [`subscribe`] listeners.
///
/// A resolved `login` future therefore does not imply the snapshot has
/// already updated. Callers that need the fresh snapshot must wait for a
/// listener notification.
///
/// [`login`]: SessionStore::login
/// [`logout`]: SessionStore::logout
/// [`signup`]: SessionStore::signup
/// [`initialize`]: SessionStore::initialize
/// [`subscribe`]: SessionStore::subscribe
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    state: RwLock<SessionState>,
    listeners: Mutex<Vec<(SubscriptionId, SessionListener)>>,
    next_subscription: AtomicU64,
    initialized: AtomicBool,
}

impl SessionStore {
    /// Create a store around a provider. The snapshot starts
    /// [`SessionState::Uninitialized`] until [`initialize`] is called and
    /// the provider delivers its first event.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Arc<Self> {
        Arc::new(Self {
            provider,
            state: RwLock::new(SessionState::Uninitialized),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            initialized: AtomicBool::new(false),
        })
    }

    /// Register the single upstream subscription on the provider.
    ///
    /// Idempotent: only the first call registers anything. The guard is
    /// explicit because nothing else prevents a second registration, which
    /// would double-deliver every provider event.
    pub fn initialize(self: &Arc<Self>) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("session store already initialized; ignoring");
            return;
        }

        let weak: Weak<SessionStore> = Arc::downgrade(self);
        self.provider.on_state_change(Arc::new(move |identity| {
            if let Some(store) = weak.upgrade() {
                store.apply_event(identity);
            }
        }));
        tracing::debug!("session store subscribed to provider state changes");
    }

    /// Exchange credentials through the provider.
    ///
    /// Resolution means the provider accepted the exchange, nothing more;
    /// see the type-level notes on the two completion signals.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let outcome = self.provider.sign_in(email, password).await;
        if let Err(err) = &outcome {
            tracing::warn!(code = err.code(), "login rejected");
        }
        outcome
    }

    /// Create an account through the provider and sign it in.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let outcome = self.provider.sign_up(email, password).await;
        if let Err(err) = &outcome {
            tracing::warn!(code = err.code(), "signup rejected");
        }
        outcome
    }

    /// End the provider session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let outcome = self.provider.sign_out().await;
        if let Err(err) = &outcome {
            tracing::warn!(code = err.code(), "logout failed");
        }
        outcome
    }

    /// The signed-in identity in the latest snapshot, if any.
    pub fn current_user(&self) -> Option<Identity> {
        self.state.read().identity().cloned()
    }

    /// The latest snapshot.
    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Register a listener for session-state transitions.
    ///
    /// Listeners fire once per transition, in registration order.
    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns whether the handle was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    /// Overwrite the snapshot with a provider event and fan out.
    ///
    /// Every event overwrites unconditionally; when several credential
    /// calls overlap, the last delivered event wins.
    fn apply_event(&self, identity: Option<Identity>) {
        let next = match identity {
            Some(identity) => SessionState::Authenticated(identity),
            None => SessionState::Anonymous,
        };

        {
            let mut state = self.state.write();
            tracing::info!(
                authenticated = next.is_authenticated(),
                "session state changed"
            );
            *state = next.clone();
        }

        let snapshot: Vec<SessionListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(&next);
        }
    }
}
