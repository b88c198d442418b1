//! Session state and identity-provider bridge for ShopStore.
//!
//! The crate turns an asynchronous identity provider into a snapshot the
//! rest of the application can read synchronously:
//!
//! - **Provider contract**: [`IdentityProvider`], with credential calls and
//!   a state-change stream
//! - **Session store**: [`SessionStore`], holding the latest
//!   [`SessionState`] and fanning transitions out to subscribers
//! - **Memory provider**: [`MemoryProvider`], a process-local provider for
//!   development and tests, with salted password hashing
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_auth::{MemoryProvider, SessionStore};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(MemoryProvider::new());
//! let session = SessionStore::new(provider);
//! session.initialize();
//!
//! session.signup("ada@example.com", "Secret123").await?;
//! assert!(session.current_user().is_some());
//! ```

mod error;
mod identity;
mod memory;
mod password;
mod provider;
mod store;

pub use error::AuthError;
pub use identity::{Identity, SessionState};
pub use memory::MemoryProvider;
pub use password::PasswordHasher;
pub use provider::{IdentityProvider, StateListener};
pub use store::{SessionListener, SessionStore};
