use crate::config::AuthProfile;
use crate::touch::Channel;

use super::store::CredentialStore;
use super::types::{unmatched_segments, AccountId, AccountRecord, SegmentMatches};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Fail,
    Success,
    SuccessWithWarning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub outcome: ValidationOutcome,
    pub segments: SegmentMatches,
    pub matched: usize,
}

impl Validation {
    fn fail(segment_count: usize) -> Self {
        Self {
            outcome: ValidationOutcome::Fail,
            segments: unmatched_segments(segment_count),
            matched: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ValidationOutcome::Fail)
    }
}

/// A segment matches when both durations are set and differ by at most
/// `tolerance_pct` percent of the stored duration (integer arithmetic).
pub fn segment_matches(stored_ms: u32, submitted_ms: u32, tolerance_pct: u32) -> bool {
    if stored_ms == 0 || submitted_ms == 0 {
        return false;
    }
    let diff = stored_ms.abs_diff(submitted_ms) as u64;
    let diff_pct = diff * 100 / stored_ms as u64;
    diff_pct <= tolerance_pct as u64
}

pub fn validate(
    store: &CredentialStore,
    profile: &AuthProfile,
    id: AccountId,
    pattern: &[Channel],
    timing: &[u32],
) -> Validation {
    match store.get(id) {
        Some(record) => validate_record(record, profile, pattern, timing),
        None => Validation::fail(store.pattern_len().saturating_sub(1)),
    }
}

/// Exact pattern gate first, then per-segment timing with a match quorum.
///
/// Timing is never examined when the pattern differs, so a wrong pattern
/// always reports every segment as unmatched.
pub fn validate_record(
    record: &AccountRecord,
    profile: &AuthProfile,
    pattern: &[Channel],
    timing: &[u32],
) -> Validation {
    let segment_count = record.timing.len();
    if record.pattern.as_slice() != pattern {
        return Validation::fail(segment_count);
    }

    let mut segments = SegmentMatches::new();
    let mut matched = 0;
    for (index, &stored_ms) in record.timing.iter().enumerate() {
        let submitted_ms = timing.get(index).copied().unwrap_or(0);
        let hit = segment_matches(stored_ms, submitted_ms, profile.timing_tolerance_pct);
        if hit {
            matched += 1;
        }
        let _ = segments.push(hit);
    }

    let outcome = if matched < profile.timing_quorum {
        ValidationOutcome::Fail
    } else if matched < segment_count {
        ValidationOutcome::SuccessWithWarning
    } else {
        ValidationOutcome::Success
    };
    log::debug!(
        "validate: {} matched {}/{} segments -> {:?}",
        record.id,
        matched,
        segment_count,
        outcome
    );

    Validation {
        outcome,
        segments,
        matched,
    }
}
