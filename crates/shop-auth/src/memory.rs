//! In-memory identity provider for development and tests.

use crate::error::AuthError;
use crate::identity::Identity;
use crate::password::PasswordHasher;
use crate::provider::{IdentityProvider, StateListener};
use async_trait::async_trait;
use parking_lot::Mutex;
use shop_catalog::ids::UserId;
use std::collections::HashMap;

struct Account {
    uid: UserId,
    password_hash: String,
}

#[derive(Default)]
struct ProviderState {
    /// Accounts keyed by lower-cased email.
    accounts: HashMap<String, Account>,
    /// Currently signed-in identity, if any.
    current: Option<Identity>,
}

/// An [`IdentityProvider`] backed by a process-local account table.
///
/// Behaves like a hosted provider from the caller's perspective: credential
/// calls resolve first, and every transition is announced through the
/// registered state listeners, including an immediate event on listener
/// registration reflecting the state at that moment.
pub struct MemoryProvider {
    state: Mutex<ProviderState>,
    listeners: Mutex<Vec<StateListener>>,
    hasher: PasswordHasher,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ProviderState::default()),
            listeners: Mutex::new(Vec::new()),
            hasher: PasswordHasher::default(),
        }
    }

    /// Use fewer hashing iterations, e.g. in tests.
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Number of registered state listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.state.lock().accounts.len()
    }

    fn emit(&self, identity: Option<Identity>) {
        let snapshot: Vec<StateListener> = self.listeners.lock().iter().cloned().collect();
        for listener in snapshot {
            listener(identity.clone());
        }
    }

    fn set_current(&self, identity: Option<Identity>) {
        self.state.lock().current = identity.clone();
        self.emit(identity);
    }
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let normalized = email.trim().to_lowercase();

        let identity = {
            let state = self.state.lock();
            let account = state
                .accounts
                .get(&normalized)
                .ok_or(AuthError::InvalidCredential)?;
            if !self.hasher.verify(password, &account.password_hash)? {
                return Err(AuthError::InvalidCredential);
            }
            Identity::new(account.uid.clone(), normalized.clone())
        };

        tracing::debug!(email = %normalized, "credential exchange accepted");
        self.set_current(Some(identity));
        Ok(())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() || !normalized.contains('@') {
            return Err(AuthError::Unknown("invalid email address".to_string()));
        }
        PasswordHasher::check_strength(password)?;

        let identity = {
            let mut state = self.state.lock();
            if state.accounts.contains_key(&normalized) {
                return Err(AuthError::EmailInUse(normalized));
            }
            let uid = UserId::generate();
            state.accounts.insert(
                normalized.clone(),
                Account {
                    uid: uid.clone(),
                    password_hash: self.hasher.hash(password),
                },
            );
            Identity::new(uid, normalized.clone())
        };

        tracing::info!(email = %normalized, "account created");
        self.set_current(Some(identity));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        tracing::debug!("signed out");
        self.set_current(None);
        Ok(())
    }

    fn on_state_change(&self, listener: StateListener) {
        let current = self.state.lock().current.clone();
        // Initial event: new listeners immediately learn the current state.
        listener(current);
        self.listeners.lock().push(listener);
    }
}
