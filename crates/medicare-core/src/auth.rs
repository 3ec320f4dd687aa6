//! # Authentication Signal
//!
//! The selection engine only needs to know whether someone is signed in.
//! Who owns that answer (the auth gate in `medicare-auth`) is hidden behind
//! [`AuthSignal`]; the engine reads it and never writes it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::User;

/// Who is using the storefront right now.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AuthState {
    /// Nobody is signed in.
    #[default]
    Anonymous,
    /// A customer has signed in.
    Authenticated { user: User },
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated { user } => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }
}

/// Read-only source of the current [`AuthState`].
pub trait AuthSignal: Send + Sync {
    fn current(&self) -> AuthState;
}

/// A fixed auth state. Handy for tests and for read-only tooling.
impl AuthSignal for AuthState {
    fn current(&self) -> AuthState {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_state_accessors() {
        assert!(!AuthState::Anonymous.is_authenticated());
        assert!(AuthState::default().user().is_none());

        let state = AuthState::Authenticated {
            user: User {
                id: "u1".to_string(),
                email: "asha@example.com".to_string(),
                full_name: "Asha Rao".to_string(),
                phone: "+919876543210".to_string(),
            },
        };
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().full_name, "Asha Rao");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "authenticated");
        assert_eq!(json["user"]["fullName"], "Asha Rao");
    }
}
