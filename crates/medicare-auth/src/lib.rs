//! # medicare-auth: Auth Gate and OTP Sign-Up
//!
//! Owns the signed-in signal the selection engine reads, and the phone OTP
//! sign-up flow that produces signed-in users.
//!
//! ## Sign-Up Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Sign-Up Flow                                   │
//! │                                                                         │
//! │  ┌──────────────┐     ┌─────────────────┐     ┌─────────────────┐      │
//! │  │  Storefront  │     │  SignUpService  │     │    OtpStore     │      │
//! │  └──────┬───────┘     └────────┬────────┘     └────────┬────────┘      │
//! │         │                      │                       │               │
//! │         │ 1. start(form)       │                       │               │
//! │         │─────────────────────►│ validate form         │               │
//! │         │                      │ 2. issue(phone)       │               │
//! │         │                      │──────────────────────►│               │
//! │         │                      │◄──────── code ────────│               │
//! │         │                      │ 3. SmsSender::send    │               │
//! │         │◄─── phone, expiry ───│                       │               │
//! │         │                      │                       │               │
//! │         │ 4. verify(phone,code)│                       │               │
//! │         │─────────────────────►│ 5. verify + delete    │               │
//! │         │                      │──────────────────────►│               │
//! │         │◄──────── User ───────│                       │               │
//! │         │                      │                       │               │
//! │         │ 6. AuthGate::sign_in(user)                   │               │
//! │         │────────► watch::Sender<AuthState> ──► subscribers            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`error`] - Auth error types
//! - [`gate`] - `AuthGate`, the observable signed-in signal
//! - [`otp`] - One-time password issue and verification
//! - [`signup`] - Sign-up form, SMS delivery and the sign-up service

pub mod error;
pub mod gate;
pub mod otp;
pub mod signup;

pub use error::{AuthError, AuthResult};
pub use gate::AuthGate;
pub use otp::{OtpChallenge, OtpStore};
pub use signup::{LogSmsSender, SignUpForm, SignUpService, SignUpStarted, SmsSender};
