use crate::config::AuthProfile;
use crate::touch::Channel;

use super::store::{CredentialStore, StoreError};
use super::types::{AccountId, SegmentMatches};
use super::validate::{validate_record, ValidationOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted {
        segments: SegmentMatches,
    },
    GrantedWithWarning {
        segments: SegmentMatches,
    },
    /// Wrong credentials; `attempts_left == 0` means this attempt locked the account.
    Rejected {
        attempts_left: u8,
        segments: SegmentMatches,
    },
    LockedOut,
    UnknownAccount,
}

impl LoginOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. } | Self::GrantedWithWarning { .. })
    }

    /// True when the account is locked after this attempt.
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            Self::LockedOut | Self::Rejected { attempts_left: 0, .. }
        )
    }

    pub fn segments(&self) -> &[bool] {
        match self {
            Self::Granted { segments }
            | Self::GrantedWithWarning { segments }
            | Self::Rejected { segments, .. } => segments,
            Self::LockedOut | Self::UnknownAccount => &[],
        }
    }
}

/// Failed-attempt accounting around validation.
///
/// Timing tolerance and quorum come from the policy's profile; the lock
/// threshold always comes from the store that holds the counters.
#[derive(Clone, Copy, Debug)]
pub struct LockoutPolicy {
    profile: AuthProfile,
}

impl LockoutPolicy {
    pub fn new(profile: &AuthProfile) -> Self {
        Self {
            profile: profile.sanitized(),
        }
    }

    pub fn profile(&self) -> &AuthProfile {
        &self.profile
    }

    /// Validates a login and updates the account's attempt counter.
    ///
    /// A locked account is short-circuited before its stored credentials are
    /// read, so its response does not depend on what was submitted.
    pub fn attempt(
        &self,
        store: &mut CredentialStore,
        id: AccountId,
        pattern: &[Channel],
        timing: &[u32],
    ) -> LoginOutcome {
        let Some(slot) = store.find(id) else {
            return LoginOutcome::UnknownAccount;
        };
        if store.is_locked(id) {
            log::warn!("lockout: {} is locked, attempt not evaluated", id);
            return LoginOutcome::LockedOut;
        }
        let Some(record) = store.slot(slot) else {
            return LoginOutcome::UnknownAccount;
        };

        let validation = validate_record(record, &self.profile, pattern, timing);
        match validation.outcome {
            ValidationOutcome::Success => {
                store.record_success(slot);
                log::info!("lockout: {} logged in", id);
                LoginOutcome::Granted {
                    segments: validation.segments,
                }
            }
            ValidationOutcome::SuccessWithWarning => {
                store.record_success(slot);
                log::info!(
                    "lockout: {} logged in with {} timing segments off",
                    id,
                    validation.segments.len() - validation.matched
                );
                LoginOutcome::GrantedWithWarning {
                    segments: validation.segments,
                }
            }
            ValidationOutcome::Fail => {
                let failures = store.record_failure(slot);
                let attempts_left = store.max_failed_attempts().saturating_sub(failures);
                if attempts_left == 0 {
                    log::warn!("lockout: {} locked after {} failures", id, failures);
                } else {
                    log::warn!("lockout: {} rejected, {} attempts left", id, attempts_left);
                }
                LoginOutcome::Rejected {
                    attempts_left,
                    segments: validation.segments,
                }
            }
        }
    }

    pub fn is_locked(&self, store: &CredentialStore, id: AccountId) -> bool {
        store.is_locked(id)
    }

    pub fn unlock(&self, store: &mut CredentialStore, id: AccountId) -> Result<(), StoreError> {
        store.unlock(id)
    }
}
