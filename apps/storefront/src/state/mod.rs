//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │ SessionState │  │ AccountState │  │ ConfigState  │  │ Preferences │ │
//! │  │              │  │              │  │              │  │ State       │ │
//! │  │  Arc<Mutex<  │  │  AuthGate ───┼──┼► read by the │  │             │ │
//! │  │   Selection  │◄─┼── (signal)   │  │   engine     │  │ email/push/ │ │
//! │  │   Engine>>   │  │  SignUp svc  │  │  store name  │  │ offers      │ │
//! │  │  watch tx    │  │              │  │  OTP TTL     │  │             │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: engine behind Arc<Mutex<T>>, snapshots via watch      │
//! │  • AccountState: AuthGate is a watch channel, sign-up uses Mutex       │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • PreferencesState: Mutex                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod account;
mod config;
mod preferences;
mod session;

pub use account::AccountState;
pub use config::{ConfigError, ConfigState};
pub use preferences::{NotificationPreferences, PreferencesPatch, PreferencesState};
pub use session::SessionState;
