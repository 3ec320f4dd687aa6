//! # Sign-Up
//!
//! Validates the sign-up form, sends an OTP to the customer's phone, and
//! turns a verified OTP into a [`User`].
//!
//! The password is checked for strength and then dropped: account
//! credentials live with the hosted identity provider, not here.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use medicare_core::validation::{
    validate_email, validate_full_name, validate_password, validate_phone,
};
use medicare_core::{User, DEFAULT_PHONE_PREFIX};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};
use crate::otp::OtpStore;

// =============================================================================
// Form
// =============================================================================

/// The sign-up form as submitted.
#[derive(Clone, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    /// 10-digit mobile number without country code.
    pub phone: String,
    pub password: String,
}

impl fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"***")
            .finish()
    }
}

impl SignUpForm {
    /// Checks every field, reporting the first failure.
    pub fn validate(&self) -> AuthResult<()> {
        validate_full_name(&self.full_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

// =============================================================================
// SMS Delivery
// =============================================================================

/// Outbound SMS. Real delivery belongs to an external gateway.
pub trait SmsSender: Send + Sync {
    fn send(&self, phone: &str, message: &str) -> AuthResult<()>;
}

/// Writes the SMS to the log instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSmsSender;

impl SmsSender for LogSmsSender {
    fn send(&self, phone: &str, message: &str) -> AuthResult<()> {
        info!(phone, message, "SMS dispatched");
        Ok(())
    }
}

/// Text of the OTP message.
pub fn otp_message(code: &str) -> String {
    format!("Your one-time password is {} for login - MediCare", code)
}

// =============================================================================
// Service
// =============================================================================

/// Returned by [`SignUpService::start`]. Never carries the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SignUpStarted {
    /// Phone number with country code; pass it back to `verify`.
    pub phone: String,
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct PendingSignUp {
    full_name: String,
    email: String,
    /// Same instant as the OTP it waits on.
    expires_at: DateTime<Utc>,
}

pub struct SignUpService {
    otp: OtpStore,
    sms: Arc<dyn SmsSender>,
    phone_prefix: String,
    pending: Mutex<HashMap<String, PendingSignUp>>,
}

impl fmt::Debug for SignUpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpService")
            .field("otp", &self.otp)
            .field("phone_prefix", &self.phone_prefix)
            .finish_non_exhaustive()
    }
}

impl SignUpService {
    pub fn new(otp: OtpStore, sms: Arc<dyn SmsSender>, phone_prefix: impl Into<String>) -> Self {
        SignUpService {
            otp,
            sms,
            phone_prefix: phone_prefix.into(),
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Default TTL, `+91` prefix, log-only SMS.
    pub fn with_defaults() -> Self {
        Self::new(
            OtpStore::default(),
            Arc::new(LogSmsSender),
            DEFAULT_PHONE_PREFIX,
        )
    }

    pub fn start(&self, form: &SignUpForm) -> AuthResult<SignUpStarted> {
        self.start_at(form, Utc::now())
    }

    /// Validates `form`, then issues and sends an OTP to its phone.
    pub fn start_at(&self, form: &SignUpForm, now: DateTime<Utc>) -> AuthResult<SignUpStarted> {
        form.validate()?;
        self.purge_expired(now);

        let phone = self.full_phone(&form.phone);
        let challenge = self.otp.issue(&phone, now);

        if let Err(e) = self.sms.send(&phone, &otp_message(&challenge.code)) {
            warn!(phone = %phone, error = %e, "OTP delivery failed");
            self.otp.revoke(challenge.id);
            return Err(e);
        }

        self.lock_pending().insert(
            phone.clone(),
            PendingSignUp {
                full_name: form.full_name.trim().to_string(),
                email: form.email.trim().to_string(),
                expires_at: challenge.expires_at,
            },
        );

        info!(phone = %phone, "Sign-up started");
        Ok(SignUpStarted {
            phone,
            expires_at: challenge.expires_at,
        })
    }

    pub fn verify(&self, phone: &str, code: &str) -> AuthResult<User> {
        self.verify_at(phone, code, Utc::now())
    }

    /// Consumes the OTP and creates the user for the pending sign-up.
    ///
    /// `phone` may be given with or without the country code. A sign-up
    /// whose code has expired is gone and reports `NoPendingSignUp`.
    pub fn verify_at(&self, phone: &str, code: &str, now: DateTime<Utc>) -> AuthResult<User> {
        let phone = self.full_phone(phone);
        self.purge_expired(now);

        if !self.lock_pending().contains_key(&phone) {
            return Err(AuthError::NoPendingSignUp { phone });
        }

        self.otp.verify(&phone, code, now)?;

        let pending = self
            .lock_pending()
            .remove(&phone)
            .ok_or_else(|| AuthError::NoPendingSignUp {
                phone: phone.clone(),
            })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: pending.email,
            full_name: pending.full_name,
            phone,
        };

        info!(user_id = %user.id, "Sign-up verified");
        Ok(user)
    }

    pub fn otp_store(&self) -> &OtpStore {
        &self.otp
    }

    /// Drops sign-ups whose code has expired. Returns how many were dropped.
    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut pending = self.lock_pending();
        let initial_len = pending.len();
        pending.retain(|_, p| now < p.expires_at);

        let purged = initial_len - pending.len();
        if purged > 0 {
            debug!(purged, "Expired sign-ups dropped");
        }
        purged
    }

    fn full_phone(&self, phone: &str) -> String {
        let phone = phone.trim();
        if phone.starts_with(&self.phone_prefix) {
            phone.to_string()
        } else {
            format!("{}{}", self.phone_prefix, phone)
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashMap<String, PendingSignUp>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    /// Keeps every message so tests can read the code back.
    #[derive(Default)]
    struct CapturingSms {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl CapturingSms {
        fn last_code(&self) -> String {
            let sent = self.sent.lock().unwrap();
            let (_, message) = sent.last().unwrap();
            message
                .split_whitespace()
                .find(|w| w.len() == 6 && w.chars().all(|c| c.is_ascii_digit()))
                .unwrap()
                .to_string()
        }
    }

    impl SmsSender for CapturingSms {
        fn send(&self, phone: &str, message: &str) -> AuthResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((phone.to_string(), message.to_string()));
            Ok(())
        }
    }

    struct FailingSms;

    impl SmsSender for FailingSms {
        fn send(&self, _phone: &str, _message: &str) -> AuthResult<()> {
            Err(AuthError::Delivery("gateway unavailable".to_string()))
        }
    }

    fn valid_form() -> SignUpForm {
        SignUpForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: "secret1".to_string(),
        }
    }

    fn service(sms: Arc<dyn SmsSender>) -> SignUpService {
        SignUpService::new(OtpStore::default(), sms, "+91")
    }

    #[test]
    fn test_form_validation() {
        assert!(valid_form().validate().is_ok());

        let mut form = valid_form();
        form.phone = "5876543210".to_string();
        assert!(matches!(form.validate(), Err(AuthError::Validation(_))));

        let mut form = valid_form();
        form.password = "12345".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_debug_hides_password() {
        let debug = format!("{:?}", valid_form());
        assert!(!debug.contains("secret1"));
    }

    #[test]
    fn test_start_sends_otp_message() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());

        let started = service.start(&valid_form()).unwrap();

        assert_eq!(started.phone, "+919876543210");
        let sent = sms.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+919876543210");
        assert!(sent[0].1.starts_with("Your one-time password is "));
        assert!(sent[0].1.ends_with(" for login - MediCare"));
    }

    #[test]
    fn test_invalid_form_sends_nothing() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        let mut form = valid_form();
        form.full_name = "A".to_string();

        assert!(service.start(&form).is_err());
        assert!(sms.sent.lock().unwrap().is_empty());
        assert!(service.otp_store().is_empty());
    }

    #[test]
    fn test_verify_creates_user() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        let now = Utc::now();
        service.start_at(&valid_form(), now).unwrap();

        let user = service
            .verify_at("9876543210", &sms.last_code(), now + Duration::seconds(30))
            .unwrap();

        assert_eq!(user.full_name, "Asha Rao");
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(user.phone, "+919876543210");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_verify_wrong_code_keeps_pending() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        service.start(&valid_form()).unwrap();
        let code = sms.last_code();
        let wrong = if code == "123456" { "654321" } else { "123456" };

        assert_eq!(
            service.verify("+919876543210", wrong),
            Err(AuthError::InvalidOtp)
        );
        assert!(service.verify("+919876543210", &code).is_ok());
    }

    #[test]
    fn test_verify_after_expiry_fails() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        let now = Utc::now();
        service.start_at(&valid_form(), now).unwrap();

        let result = service.verify_at(
            "+919876543210",
            &sms.last_code(),
            now + Duration::seconds(301),
        );
        assert!(matches!(result, Err(AuthError::NoPendingSignUp { .. })));
    }

    #[test]
    fn test_expired_sign_up_leaves_nothing_pending() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        let now = Utc::now();
        service.start_at(&valid_form(), now).unwrap();
        assert_eq!(service.lock_pending().len(), 1);

        // Another customer starting later sweeps the abandoned entry
        let mut other = valid_form();
        other.phone = "9123456780".to_string();
        service.start_at(&other, now + Duration::seconds(400)).unwrap();

        let pending = service.lock_pending();
        assert_eq!(pending.len(), 1);
        assert!(pending.contains_key("+919123456780"));
    }

    #[test]
    fn test_verify_at_expiry_boundary() {
        let sms = Arc::new(CapturingSms::default());
        let service = service(sms.clone());
        let now = Utc::now();
        service.start_at(&valid_form(), now).unwrap();

        let result = service.verify_at(
            "9876543210",
            &sms.last_code(),
            now + Duration::seconds(300),
        );

        assert!(matches!(result, Err(AuthError::NoPendingSignUp { .. })));
        assert!(service.lock_pending().is_empty());
    }

    #[test]
    fn test_verify_without_start() {
        let service = SignUpService::with_defaults();
        assert!(matches!(
            service.verify("9876543210", "123456"),
            Err(AuthError::NoPendingSignUp { .. })
        ));
    }

    #[test]
    fn test_delivery_failure_revokes_code() {
        let service = service(Arc::new(FailingSms));

        assert!(matches!(
            service.start(&valid_form()),
            Err(AuthError::Delivery(_))
        ));
        assert!(service.otp_store().is_empty());
    }
}
