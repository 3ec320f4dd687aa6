//! # Auth Commands
//!
//! Phone OTP sign-up, sign-out and the Settings page profile form.
//!
//! ## Sign-Up Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"command":"start_sign_up","fullName":..,"phone":"9876543210",..}      │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  SignUpService::start ──► SMS "Your one-time password is ..."          │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  {"command":"verify_otp","phone":"+919876543210","code":"482913"}       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  SignUpService::verify ──► User ──► AuthGate::sign_in                  │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                    favorites and cart additions now allowed            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use medicare_auth::{SignUpForm, SignUpStarted};
use medicare_core::{AuthState, Notice, User};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{AccountState, SessionState};

/// Validates the form and texts an OTP to the customer.
pub fn start_sign_up(
    account: &AccountState,
    session: &SessionState,
    form: &SignUpForm,
) -> Result<SignUpStarted, ApiError> {
    debug!(phone = %form.phone, "start_sign_up command");

    let started = account.signup().start(form)?;
    session.notify(Notice::success("OTP sent successfully"));
    Ok(started)
}

/// Checks the OTP, creates the account and signs the user in.
pub fn verify_otp(
    account: &AccountState,
    session: &SessionState,
    phone: &str,
    code: &str,
) -> Result<User, ApiError> {
    debug!(phone, "verify_otp command");

    let user = account.signup().verify(phone, code)?;
    account.gate().sign_in(user.clone());
    session.notify(Notice::success("Account created"));
    Ok(user)
}

/// Signs out. Favorites, cart and compare list stay as they are.
pub fn sign_out(account: &AccountState) -> AuthState {
    debug!("sign_out command");
    account.gate().sign_out();
    account.gate().current()
}

pub fn current_user(account: &AccountState) -> AuthState {
    debug!("current_user command");
    account.gate().current()
}

pub fn update_profile(
    account: &AccountState,
    session: &SessionState,
    full_name: &str,
) -> Result<User, ApiError> {
    debug!("update_profile command");

    let user = account.gate().update_profile(full_name)?;
    session.notify(Notice::success("Profile updated successfully"));
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{test_account_with_sms, test_session_for, CapturingSms};
    use crate::error::ErrorCode;
    use std::sync::Arc;

    fn form() -> SignUpForm {
        SignUpForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_sign_up_signs_user_in() {
        let sms = Arc::new(CapturingSms::default());
        let account = test_account_with_sms(sms.clone());
        let session = test_session_for(&account);

        let started = start_sign_up(&account, &session, &form()).unwrap();
        assert_eq!(started.phone, "+919876543210");

        let user = verify_otp(&account, &session, &started.phone, &sms.last_code()).unwrap();

        assert_eq!(user.full_name, "Asha Rao");
        assert_eq!(current_user(&account).user(), Some(&user));
        assert_eq!(
            session.drain_notices(),
            vec![
                Notice::success("OTP sent successfully"),
                Notice::success("Account created"),
            ]
        );
    }

    #[test]
    fn test_wrong_code_keeps_anonymous() {
        let sms = Arc::new(CapturingSms::default());
        let account = test_account_with_sms(sms.clone());
        let session = test_session_for(&account);
        start_sign_up(&account, &session, &form()).unwrap();
        let wrong = if sms.last_code() == "111111" { "222222" } else { "111111" };

        let err = verify_otp(&account, &session, "9876543210", wrong).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidOtp);
        assert_eq!(err.message, "Invalid or expired OTP");
        assert!(!current_user(&account).is_authenticated());
    }

    #[test]
    fn test_invalid_form() {
        let sms = Arc::new(CapturingSms::default());
        let account = test_account_with_sms(sms.clone());
        let session = test_session_for(&account);
        let mut bad = form();
        bad.phone = "12345".to_string();

        let err = start_sign_up(&account, &session, &bad).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(sms.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_profile_update_and_sign_out() {
        let sms = Arc::new(CapturingSms::default());
        let account = test_account_with_sms(sms.clone());
        let session = test_session_for(&account);

        assert_eq!(
            update_profile(&account, &session, "Asha Menon").unwrap_err().code,
            ErrorCode::AuthRequired
        );

        let started = start_sign_up(&account, &session, &form()).unwrap();
        verify_otp(&account, &session, &started.phone, &sms.last_code()).unwrap();

        let user = update_profile(&account, &session, "Asha Menon").unwrap();
        assert_eq!(user.full_name, "Asha Menon");

        assert_eq!(sign_out(&account), AuthState::Anonymous);
    }
}
