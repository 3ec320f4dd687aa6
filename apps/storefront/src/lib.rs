//! # MediCare Storefront Library
//!
//! Session state and commands for the MediCare storefront, plus the
//! JSON-lines shell that drives them from stdin.
//!
//! ## Module Organization
//! ```text
//! medicare_storefront_lib/
//! ├── lib.rs          ◄─── You are here (Storefront, run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Selection engine + snapshot channel
//! │   ├── account.rs  ◄─── Auth gate + sign-up service
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── preferences.rs ◄─ Notification preferences
//! ├── commands/
//! │   ├── mod.rs      ◄─── Invoke enum, dispatch, Response
//! │   └── ...         ◄─── One module per dashboard area
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};
use std::sync::Arc;

use medicare_auth::{LogSmsSender, SmsSender};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{AccountState, ConfigState, PreferencesState, SessionState};

/// Every piece of state a command may ask for.
#[derive(Debug)]
pub struct Storefront {
    pub config: ConfigState,
    pub session: SessionState,
    pub account: AccountState,
    pub preferences: PreferencesState,
}

impl Storefront {
    /// Loads the catalog and wires the session to the auth gate.
    pub fn new(config: ConfigState, sms: Arc<dyn SmsSender>) -> Result<Self, ApiError> {
        let catalog = Arc::new(config.load_catalog()?);
        let account = AccountState::new(&config, sms);
        let session = SessionState::new(catalog, account.gate().clone());

        Ok(Storefront {
            config,
            session,
            account,
            preferences: PreferencesState::new(),
        })
    }

    /// Parses and runs one request line.
    pub fn handle_line(&self, line: &str) -> commands::Response {
        commands::handle_line(self, line)
    }
}

/// Runs the JSON-lines shell.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (DEBUG for medicare crates), RUST_LOG overrides     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • MEDICARE_* environment variables over defaults                    │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • Catalog (built in or MEDICARE_CATALOG_PATH)                       │
/// │     • AccountState: anonymous gate, OTP store                           │
/// │     • SessionState: empty favorites, cart, compare list                 │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • One JSON command per stdin line                                   │
/// │     • One JSON response per stdout line                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env()?;
    info!(store = %config.store_name, "Starting MediCare Storefront");

    let app = Storefront::new(config, Arc::new(LogSmsSender))?;
    info!("State initialized");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = app.handle_line(&line);
        serde_json::to_writer(&mut stdout, &response)?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=medicare_core=trace` - Trace the core crate only
/// - Default: INFO, DEBUG for the `medicare*` crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,medicare=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
