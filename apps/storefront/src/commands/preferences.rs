//! # Preferences Commands

use tracing::debug;

use crate::state::{NotificationPreferences, PreferencesPatch, PreferencesState};

pub fn get_preferences(preferences: &PreferencesState) -> NotificationPreferences {
    debug!("get_preferences command");
    preferences.get()
}

pub fn update_preferences(
    preferences: &PreferencesState,
    patch: PreferencesPatch,
) -> NotificationPreferences {
    debug!(?patch, "update_preferences command");
    preferences.update(patch)
}
