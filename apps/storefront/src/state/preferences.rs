//! # Preferences State
//!
//! Notification preferences from the Settings page.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which notifications the customer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NotificationPreferences {
    /// Order updates and receipts by email
    pub email: bool,
    /// Notifications on the device
    pub push: bool,
    /// Deals and offers
    pub offers: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            email: true,
            push: false,
            offers: true,
        }
    }
}

/// A partial update; `None` leaves the setting alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[ts(export)]
pub struct PreferencesPatch {
    pub email: Option<bool>,
    pub push: Option<bool>,
    pub offers: Option<bool>,
}

#[derive(Debug, Default)]
pub struct PreferencesState {
    preferences: Mutex<NotificationPreferences>,
}

impl PreferencesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> NotificationPreferences {
        *self.preferences.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applies `patch` and returns the result.
    pub fn update(&self, patch: PreferencesPatch) -> NotificationPreferences {
        let mut preferences = self.preferences.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(email) = patch.email {
            preferences.email = email;
        }
        if let Some(push) = patch.push {
            preferences.push = push;
        }
        if let Some(offers) = patch.offers {
            preferences.offers = offers;
        }

        *preferences
    }
}
