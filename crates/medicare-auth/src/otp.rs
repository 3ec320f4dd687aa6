//! # One-Time Passwords
//!
//! ## OTP Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         OTP Lifecycle                                   │
//! │                                                                         │
//! │   issue(phone, now)                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────┐   verify(phone, code, now < expires_at)  ┌──────────┐   │
//! │   │  LIVE    │─────────────────────────────────────────►│ CONSUMED │   │
//! │   │          │                                          │ (deleted)│   │
//! │   └────┬─────┘                                          └──────────┘   │
//! │        │ now >= expires_at                                              │
//! │        ▼                                                                │
//! │   ┌──────────┐                                                          │
//! │   │ EXPIRED  │──► purged on the next issue/verify                       │
//! │   └──────────┘                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A phone may hold several live codes at once; any of them verifies.
//! Times are passed in so expiry is testable without sleeping.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use medicare_core::validation::validate_otp_code;
use medicare_core::OTP_TTL_SECS;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// An issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub id: Uuid,
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory store of live codes.
#[derive(Debug)]
pub struct OtpStore {
    ttl: Duration,
    records: Mutex<Vec<OtpChallenge>>,
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new(OTP_TTL_SECS)
    }
}

impl OtpStore {
    pub fn new(ttl_secs: i64) -> Self {
        OtpStore {
            ttl: Duration::seconds(ttl_secs),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Creates a fresh 6-digit code for `phone`.
    pub fn issue(&self, phone: &str, now: DateTime<Utc>) -> OtpChallenge {
        let challenge = OtpChallenge {
            id: Uuid::new_v4(),
            phone: phone.to_string(),
            code: generate_code(),
            expires_at: now + self.ttl,
        };

        let mut records = self.lock();
        records.retain(|r| !r.is_expired(now));
        records.push(challenge.clone());

        debug!(otp_id = %challenge.id, phone, expires_at = %challenge.expires_at, "OTP issued");
        challenge
    }

    /// Accepts an unexpired code for `phone` and deletes it.
    pub fn verify(&self, phone: &str, code: &str, now: DateTime<Utc>) -> AuthResult<()> {
        validate_otp_code(code)?;
        let code = code.trim();

        let mut records = self.lock();
        records.retain(|r| !r.is_expired(now));

        let position = records
            .iter()
            .position(|r| r.phone == phone && r.code == code)
            .ok_or(AuthError::InvalidOtp)?;

        let consumed = records.remove(position);
        debug!(otp_id = %consumed.id, phone, "OTP verified");
        Ok(())
    }

    /// Drops a code before it is used (e.g. when delivery failed).
    pub fn revoke(&self, id: Uuid) -> bool {
        let mut records = self.lock();
        let initial_len = records.len();
        records.retain(|r| r.id != id);
        records.len() != initial_len
    }

    /// Removes expired codes. Returns how many were dropped.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut records = self.lock();
        let initial_len = records.len();
        records.retain(|r| !r.is_expired(now));
        initial_len - records.len()
    }

    /// Number of codes currently held, expired or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<OtpChallenge>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Six digits, 100000..=999999.
fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+919876543210";

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn test_issue_sets_expiry() {
        let store = OtpStore::default();
        let now = Utc::now();

        let challenge = store.issue(PHONE, now);

        assert_eq!(challenge.expires_at - now, Duration::seconds(300));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_verify_is_single_use() {
        let store = OtpStore::default();
        let now = Utc::now();
        let challenge = store.issue(PHONE, now);

        assert_eq!(store.verify(PHONE, &challenge.code, now), Ok(()));
        assert_eq!(
            store.verify(PHONE, &challenge.code, now),
            Err(AuthError::InvalidOtp)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_verify_rejects_expired_code() {
        let store = OtpStore::new(60);
        let now = Utc::now();
        let challenge = store.issue(PHONE, now);

        let later = now + Duration::seconds(60);
        assert_eq!(
            store.verify(PHONE, &challenge.code, later),
            Err(AuthError::InvalidOtp)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_verify_requires_matching_phone() {
        let store = OtpStore::default();
        let now = Utc::now();
        let challenge = store.issue(PHONE, now);

        assert_eq!(
            store.verify("+919999999999", &challenge.code, now),
            Err(AuthError::InvalidOtp)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_verify_rejects_malformed_code() {
        let store = OtpStore::default();
        assert!(matches!(
            store.verify(PHONE, "12ab56", Utc::now()),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_several_live_codes_per_phone() {
        let store = OtpStore::default();
        let now = Utc::now();
        let first = store.issue(PHONE, now);
        let second = store.issue(PHONE, now + Duration::seconds(10));

        assert!(store.verify(PHONE, &first.code, now).is_ok());
        assert!(store
            .verify(PHONE, &second.code, now + Duration::seconds(20))
            .is_ok());
    }

    #[test]
    fn test_purge_and_revoke() {
        let store = OtpStore::new(30);
        let now = Utc::now();
        store.issue(PHONE, now);
        let fresh = store.issue(PHONE, now + Duration::seconds(20));

        assert_eq!(store.purge_expired(now + Duration::seconds(40)), 1);
        assert!(store.revoke(fresh.id));
        assert!(!store.revoke(fresh.id));
        assert!(store.is_empty());
    }
}
