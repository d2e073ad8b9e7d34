use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use touchlock::{AuthProfile, EXTENDED_PROFILE, REFERENCE_PROFILE};

/// Partial profile read from TOML; missing keys keep the base value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOverride {
    pub base: Option<Base>,
    pub pattern_len: Option<usize>,
    pub id_digits: Option<usize>,
    pub activation_threshold: Option<i16>,
    pub release_threshold: Option<i16>,
    pub aggregate_ceiling: Option<i16>,
    pub poll_interval_ms: Option<u32>,
    pub press_debounce_ms: Option<u32>,
    pub settle_ms: Option<u32>,
    pub timing_tolerance_pct: Option<u32>,
    pub timing_quorum: Option<usize>,
    pub max_failed_attempts: Option<u8>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    Reference,
    Extended,
}

impl ProfileOverride {
    pub fn apply(&self) -> AuthProfile {
        let mut profile = match self.base {
            Some(Base::Extended) => EXTENDED_PROFILE,
            Some(Base::Reference) | None => REFERENCE_PROFILE,
        };
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(value) = self.$field {
                    profile.$field = value;
                })*
            };
        }
        take!(
            pattern_len,
            id_digits,
            activation_threshold,
            release_threshold,
            aggregate_ceiling,
            poll_interval_ms,
            press_debounce_ms,
            settle_ms,
            timing_tolerance_pct,
            timing_quorum,
            max_failed_attempts
        );
        profile.sanitized()
    }
}

pub fn load(path: Option<&Path>) -> Result<AuthProfile> {
    let Some(path) = path else {
        return Ok(REFERENCE_PROFILE);
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let overrides: ProfileOverride =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(overrides.apply())
}
