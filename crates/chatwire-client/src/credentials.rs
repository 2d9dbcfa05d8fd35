//! Credential storage.
//!
//! The session re-reads the store on every connection attempt, including
//! scheduled retries, so a token rotated by a fresh login is picked up without
//! tearing the session down. Production uses [`SharedCredentials`] (written by
//! the login flow, cleared on logout); tests inject fixed values through the
//! [`CredentialSource`] trait.

use std::sync::{Arc, RwLock};

/// Bearer token plus the identity it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Bearer token presented on the socket URL and HTTP requests.
    pub token: String,
    /// Username the token belongs to; used to mark own messages.
    pub username: String,
}

impl Credential {
    /// Create a credential from a token and the username it was issued for.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self { token: token.into(), username: username.into() }
    }
}

/// Read access to the current credential.
///
/// Returning `None` means no token is stored; the session treats that as a
/// terminal local error for the open attempt (no network call is made).
pub trait CredentialSource {
    /// Current credential, if any.
    fn credential(&self) -> Option<Credential>;
}

/// Process-local credential store shared between the auth flow and sessions.
///
/// Clones share the same underlying slot. A poisoned lock reads as "no
/// credential" rather than propagating the panic of an unrelated thread.
#[derive(Debug, Clone, Default)]
pub struct SharedCredentials {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl SharedCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored credential. Called by the login flow.
    pub fn store(&self, credential: Credential) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = Some(credential);
        }
    }

    /// Remove the stored credential. Called on logout.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = None;
        }
    }
}

impl CredentialSource for SharedCredentials {
    fn credential(&self) -> Option<Credential> {
        self.inner.read().map_or(None, |slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_slot() {
        let store = SharedCredentials::new();
        let view = store.clone();

        store.store(Credential::new("jwt-1", "alice"));
        assert_eq!(view.credential(), Some(Credential::new("jwt-1", "alice")));

        store.clear();
        assert_eq!(view.credential(), None);
    }

    #[test]
    fn store_replaces_previous_credential() {
        let store = SharedCredentials::new();

        store.store(Credential::new("jwt-1", "alice"));
        store.store(Credential::new("jwt-2", "alice"));

        assert_eq!(store.credential().map(|c| c.token), Some("jwt-2".to_string()));
    }
}
