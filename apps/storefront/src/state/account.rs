//! # Account State
//!
//! The auth gate and the sign-up service for the running session. The gate
//! is shared with the selection engine, which reads it to gate favorites and
//! cart additions.

use std::sync::Arc;

use medicare_auth::{AuthGate, OtpStore, SignUpService, SmsSender};

use crate::state::ConfigState;

#[derive(Debug)]
pub struct AccountState {
    gate: Arc<AuthGate>,
    signup: SignUpService,
}

impl AccountState {
    pub fn new(config: &ConfigState, sms: Arc<dyn SmsSender>) -> Self {
        AccountState {
            gate: Arc::new(AuthGate::new()),
            signup: SignUpService::new(
                OtpStore::new(config.otp_ttl_secs),
                sms,
                config.phone_prefix.clone(),
            ),
        }
    }

    pub fn gate(&self) -> &Arc<AuthGate> {
        &self.gate
    }

    pub fn signup(&self) -> &SignUpService {
        &self.signup
    }
}
