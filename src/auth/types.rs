use core::fmt;

use heapless::Vec;

use crate::config::MAX_SEGMENTS;
use crate::touch::{Pattern, Timing};

/// Two-digit account number entered on the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i16);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl From<i16> for AccountId {
    fn from(value: i16) -> Self {
        Self(value)
    }
}

/// One flag per timing segment; `true` when the segment matched.
pub type SegmentMatches = Vec<bool, MAX_SEGMENTS>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub pattern: Pattern,
    pub timing: Timing,
    pub failed_attempts: u8,
    pub logged_in: bool,
}

pub(crate) fn unmatched_segments(count: usize) -> SegmentMatches {
    let mut segments = SegmentMatches::new();
    for _ in 0..count.min(MAX_SEGMENTS) {
        let _ = segments.push(false);
    }
    segments
}
