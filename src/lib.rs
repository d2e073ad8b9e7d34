//! Touch-pad PIN and timed-pattern authentication.
//!
//! Five capacitive pads feed a debouncer; digit and pattern captures run as
//! step machines on top of it, and a small credential table with a lockout
//! policy decides logins. Everything here is `no_std` and heap-free; the
//! hardware is reached through the traits in [`platform`].

#![cfg_attr(not(test), no_std)]

pub mod auth;
pub mod config;
pub mod platform;
#[cfg(feature = "graphics")]
pub mod render;
pub mod session;
pub mod touch;

pub use auth::{
    AccountId, AccountRecord, CredentialStore, LockoutPolicy, LoginOutcome, StoreError,
    Validation, ValidationOutcome,
};
pub use config::{active_profile, AuthProfile, EXTENDED_PROFILE, REFERENCE_PROFILE};
pub use session::{AuthScreen, LogScreen, Notice, Session, SessionReport};
pub use touch::{CaptureError, Channel, RawSample, TouchDriver};
