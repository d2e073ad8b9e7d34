mod lockout;
mod store;
mod types;
mod validate;

pub use lockout::{LockoutPolicy, LoginOutcome};
pub use store::{CredentialStore, StoreError};
pub use types::{AccountId, AccountRecord, SegmentMatches};
pub use validate::{segment_matches, validate, validate_record, Validation, ValidationOutcome};
