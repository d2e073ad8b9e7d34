/// Number of account slots in the credential table.
pub const STORE_CAPACITY: usize = 10;
/// Longest pattern any profile may request.
pub const MAX_PATTERN_LEN: usize = 5;
pub const MAX_SEGMENTS: usize = MAX_PATTERN_LEN - 1;
/// Longest numeric entry; four digits in 1..=5 always fit an `i16`.
pub const MAX_DIGITS: usize = 4;
pub const CHANNEL_COUNT: usize = 5;

pub const HELLO_DWELL_MS: u32 = 3_000;
pub const MENU_DWELL_MS: u32 = 1_000;
pub const LOADING_DWELL_MS: u32 = 2_000;
pub const PROMPT_DWELL_MS: u32 = 2_000;
pub const CHECKING_SHORT_DWELL_MS: u32 = 1_000;
pub const CHECKING_DWELL_MS: u32 = 2_000;
pub const RESULT_DWELL_MS: u32 = 2_000;
pub const ERROR_DWELL_MS: u32 = 3_000;
pub const REDIRECT_DWELL_MS: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthProfile {
    pub pattern_len: usize,
    pub id_digits: usize,
    pub activation_threshold: i16,
    pub release_threshold: i16,
    pub aggregate_ceiling: i16,
    pub poll_interval_ms: u32,
    pub press_debounce_ms: u32,
    pub settle_ms: u32,
    pub timing_tolerance_pct: u32,
    pub timing_quorum: usize,
    pub max_failed_attempts: u8,
}

impl AuthProfile {
    pub const fn segment_count(&self) -> usize {
        self.pattern_len.saturating_sub(1)
    }

    /// Clamps every field into the range the engine can represent.
    pub fn sanitized(mut self) -> Self {
        self.pattern_len = self.pattern_len.clamp(2, MAX_PATTERN_LEN);
        self.id_digits = self.id_digits.clamp(1, MAX_DIGITS);
        self.aggregate_ceiling = self.aggregate_ceiling.max(1);
        self.activation_threshold = self
            .activation_threshold
            .clamp(0, self.aggregate_ceiling - 1);
        self.release_threshold = self
            .release_threshold
            .clamp(0, self.activation_threshold);
        self.poll_interval_ms = self.poll_interval_ms.max(1);
        self.timing_quorum = self.timing_quorum.min(self.segment_count());
        self.max_failed_attempts = self.max_failed_attempts.max(1);
        self
    }
}

pub const REFERENCE_PROFILE: AuthProfile = AuthProfile {
    pattern_len: 4,
    id_digits: 2,
    activation_threshold: 6,
    release_threshold: 2,
    aggregate_ceiling: 30,
    poll_interval_ms: 10,
    press_debounce_ms: 200,
    settle_ms: 500,
    timing_tolerance_pct: 40,
    timing_quorum: 2,
    max_failed_attempts: 3,
};

pub const EXTENDED_PROFILE: AuthProfile = AuthProfile {
    pattern_len: 5,
    ..REFERENCE_PROFILE
};

pub fn active_profile() -> &'static AuthProfile {
    &REFERENCE_PROFILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_is_already_sane() {
        assert_eq!(REFERENCE_PROFILE.sanitized(), REFERENCE_PROFILE);
        assert_eq!(EXTENDED_PROFILE.sanitized(), EXTENDED_PROFILE);
        assert_eq!(EXTENDED_PROFILE.segment_count(), 4);
    }

    #[test]
    fn sanitize_clamps_out_of_range_fields() {
        let wild = AuthProfile {
            pattern_len: 9,
            id_digits: 7,
            activation_threshold: 80,
            release_threshold: 90,
            timing_quorum: 12,
            max_failed_attempts: 0,
            poll_interval_ms: 0,
            ..REFERENCE_PROFILE
        }
        .sanitized();

        assert_eq!(wild.pattern_len, MAX_PATTERN_LEN);
        assert_eq!(wild.id_digits, MAX_DIGITS);
        assert_eq!(wild.activation_threshold, 29);
        assert_eq!(wild.release_threshold, 29);
        assert_eq!(wild.timing_quorum, MAX_SEGMENTS);
        assert_eq!(wild.max_failed_attempts, 1);
        assert_eq!(wild.poll_interval_ms, 1);
    }
}
