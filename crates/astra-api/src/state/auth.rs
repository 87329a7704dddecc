//! # Auth State
//!
//! Manages the session's user/token pair and mirrors it to durable
//! storage.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Auth State Transitions                               │
//! │                                                                         │
//! │              restore() at construction                                  │
//! │                      │                                                  │
//! │        ┌─────────────┴──────────────┐                                   │
//! │        ▼                            ▼                                   │
//! │  both keys parse              anything else                             │
//! │        │                            │                                   │
//! │        ▼                            ▼                                   │
//! │  ┌──────────┐    login()     ┌──────────┐                               │
//! │  │ Signed   │◄───────────────│ Signed   │                               │
//! │  │   in     │───────────────►│   out    │                               │
//! │  └──────────┘    logout()    └──────────┘                               │
//! │                                                                         │
//! │  login  persists BOTH keys (user, token)                               │
//! │  logout removes BOTH keys                                              │
//! │  The pair is one unit: a corrupt half on restore clears both.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No token validation, refresh, or expiry exists: the token is an opaque
//! credential attached to downstream mock calls.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use astra_core::User;
use astra_store::{keys, StoreAdapter};

/// An authenticated user/token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Session-scoped auth state.
#[derive(Debug, Clone)]
pub struct AuthState {
    session: Arc<Mutex<Option<Session>>>,
    store: StoreAdapter,
}

impl AuthState {
    /// Creates auth state restored from durable storage.
    ///
    /// The user and token are persisted under separate keys but treated
    /// as one unit: if either is absent or corrupt, both keys are
    /// cleared and the session starts signed out.
    pub fn load(store: StoreAdapter) -> Self {
        let user: Option<User> = store.load(keys::USER);
        let token: Option<String> = store.load(keys::TOKEN);

        let session = match (user, token) {
            (Some(user), Some(token)) => {
                info!(user_id = %user.id, "Session restored from storage");
                Some(Session { user, token })
            }
            (None, None) => None,
            // Half a session is as good as none; drop the leftover key.
            _ => {
                warn!("Partial persisted session; clearing both keys");
                store.remove(keys::USER);
                store.remove(keys::TOKEN);
                None
            }
        };

        AuthState {
            session: Arc::new(Mutex::new(session)),
            store,
        }
    }

    /// Signs in: sets the pair and persists both keys.
    pub fn login(&self, user: User, token: impl Into<String>) {
        let token = token.into();
        info!(user_id = %user.id, "User signed in");

        self.store.save(keys::USER, &user);
        self.store.save(keys::TOKEN, &token);

        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        *session = Some(Session { user, token });
    }

    /// Signs out: clears the pair and deletes both persisted keys.
    pub fn logout(&self) {
        info!("User signed out");

        self.store.remove(keys::USER);
        self.store.remove(keys::TOKEN);

        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        *session = None;
    }

    /// The current user, if signed in.
    pub fn user(&self) -> Option<User> {
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        session.as_ref().map(|s| s.user.clone())
    }

    /// The current token, if signed in.
    pub fn token(&self) -> Option<String> {
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        session.as_ref().map(|s| s.token.clone())
    }

    /// Derived boolean: a session exists (token is non-null).
    pub fn is_authenticated(&self) -> bool {
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        session.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_user() -> User {
        User {
            id: "user-1".to_string(),
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
        }
    }

    #[test]
    fn test_login_persists_both_keys() {
        let store = StoreAdapter::in_memory();
        let auth = AuthState::load(store.clone());

        assert!(!auth.is_authenticated());

        auth.login(demo_user(), "mock-jwt-token-string");

        assert!(auth.is_authenticated());
        assert_eq!(auth.token().as_deref(), Some("mock-jwt-token-string"));
        assert!(store.raw(keys::USER).is_some());
        assert!(store.raw(keys::TOKEN).is_some());
    }

    #[test]
    fn test_logout_removes_both_keys() {
        let store = StoreAdapter::in_memory();
        let auth = AuthState::load(store.clone());
        auth.login(demo_user(), "mock-jwt-token-string");

        auth.logout();

        assert!(!auth.is_authenticated());
        assert_eq!(auth.user(), None);
        assert_eq!(store.raw(keys::USER), None);
        assert_eq!(store.raw(keys::TOKEN), None);
    }

    #[test]
    fn test_restore_roundtrip() {
        let store = StoreAdapter::in_memory();
        AuthState::load(store.clone()).login(demo_user(), "mock-jwt-token-string");

        let auth = AuthState::load(store);
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().unwrap().name, "Test User");
    }

    #[test]
    fn test_corrupt_user_clears_both_keys() {
        let store = StoreAdapter::in_memory();
        store.set_raw(keys::USER, "{broken");
        store.set_raw(keys::TOKEN, "\"mock-jwt-token-string\"");

        let auth = AuthState::load(store.clone());

        assert!(!auth.is_authenticated());
        assert_eq!(store.raw(keys::USER), None);
        assert_eq!(store.raw(keys::TOKEN), None);
    }

    #[test]
    fn test_orphan_token_is_cleared() {
        let store = StoreAdapter::in_memory();
        store.set_raw(keys::TOKEN, "\"mock-jwt-token-string\"");

        let auth = AuthState::load(store.clone());

        assert!(!auth.is_authenticated());
        assert_eq!(store.raw(keys::TOKEN), None);
    }
}
