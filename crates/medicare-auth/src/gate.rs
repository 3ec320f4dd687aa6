//! # Auth Gate
//!
//! Holds the current [`AuthState`] in a `tokio::sync::watch` channel. The
//! selection engine reads it through [`AuthSignal`]; the storefront shell
//! subscribes to it to re-render on sign-in and sign-out.

use medicare_core::validation::validate_full_name;
use medicare_core::{AuthSignal, AuthState, User};
use tokio::sync::watch;
use tracing::info;

use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct AuthGate {
    tx: watch::Sender<AuthState>,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate {
    /// Starts anonymous.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::Anonymous);
        AuthGate { tx }
    }

    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().user().cloned()
    }

    /// Receiver that sees every later state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub fn sign_in(&self, user: User) {
        info!(user_id = %user.id, "User signed in");
        self.tx.send_replace(AuthState::Authenticated { user });
    }

    /// Returns `false` if nobody was signed in.
    pub fn sign_out(&self) -> bool {
        let previous = self.tx.send_replace(AuthState::Anonymous);
        match previous {
            AuthState::Authenticated { user } => {
                info!(user_id = %user.id, "User signed out");
                true
            }
            AuthState::Anonymous => false,
        }
    }

    /// Renames the signed-in user (the Settings page profile form).
    pub fn update_profile(&self, full_name: &str) -> AuthResult<User> {
        let full_name = full_name.trim();
        validate_full_name(full_name)?;

        let mut updated = None;
        self.tx.send_if_modified(|state| match state {
            AuthState::Authenticated { user } => {
                user.full_name = full_name.to_string();
                updated = Some(user.clone());
                true
            }
            AuthState::Anonymous => false,
        });

        let user = updated.ok_or(AuthError::NotSignedIn)?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}

impl AuthSignal for AuthGate {
    fn current(&self) -> AuthState {
        AuthGate::current(self)
    }
}
