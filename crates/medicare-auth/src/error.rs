//! # Auth Error Types

use medicare_core::ValidationError;
use thiserror::Error;

/// Result type alias for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A sign-up or profile field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No unexpired OTP matches the phone and code.
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// The OTP was valid but no sign-up was started for this phone.
    #[error("No pending sign-up for {phone}")]
    NoPendingSignUp { phone: String },

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,

    /// The SMS provider refused the message.
    #[error("Failed to send OTP: {0}")]
    Delivery(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::InvalidOtp.to_string(), "Invalid or expired OTP");

        let err: AuthError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: email is required");
    }
}
