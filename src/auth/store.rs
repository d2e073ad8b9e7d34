use core::fmt;

use crate::config::{AuthProfile, STORE_CAPACITY};
use crate::touch::{Channel, Pattern, Timing};

use super::types::{AccountId, AccountRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    Full,
    DuplicateId,
    NotFound,
    MalformedCredential,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("credential store is full"),
            Self::DuplicateId => f.write_str("account id already registered"),
            Self::NotFound => f.write_str("account id not registered"),
            Self::MalformedCredential => {
                f.write_str("id out of range, or pattern or timing has the wrong shape")
            }
        }
    }
}

/// Fixed table of account slots, searched linearly.
///
/// A slot is either empty or holds a complete record; `count` always equals
/// the number of occupied slots.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    slots: [Option<AccountRecord>; STORE_CAPACITY],
    count: usize,
    pattern_len: usize,
    id_digits: usize,
    max_failed_attempts: u8,
}

impl CredentialStore {
    pub fn new(profile: &AuthProfile) -> Self {
        let profile = profile.sanitized();
        Self {
            slots: core::array::from_fn(|_| None),
            count: 0,
            pattern_len: profile.pattern_len,
            id_digits: profile.id_digits,
            max_failed_attempts: profile.max_failed_attempts,
        }
    }

    pub const fn capacity(&self) -> usize {
        STORE_CAPACITY
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= STORE_CAPACITY
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern_len
    }

    pub fn max_failed_attempts(&self) -> u8 {
        self.max_failed_attempts
    }

    /// True for ids the pad can enter: `0..10^id_digits`.
    pub fn accepts_id(&self, id: AccountId) -> bool {
        let limit = 10i32.pow(self.id_digits as u32);
        (0..limit).contains(&i32::from(id.0))
    }

    /// Registers an account in the lowest free slot and returns that slot.
    pub fn insert(
        &mut self,
        id: AccountId,
        pattern: &[Channel],
        timing: &[u32],
    ) -> Result<usize, StoreError> {
        if self.is_full() {
            log::warn!("store: full, cannot register {}", id);
            return Err(StoreError::Full);
        }
        if self.find(id).is_some() {
            return Err(StoreError::DuplicateId);
        }
        if !self.accepts_id(id) {
            return Err(StoreError::MalformedCredential);
        }
        let (pattern, timing) = self.shape_credential(pattern, timing)?;
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(StoreError::Full)?;
        self.slots[slot] = Some(AccountRecord {
            id,
            pattern,
            timing,
            failed_attempts: 0,
            logged_in: false,
        });
        self.count += 1;
        log::info!("store: registered {} in slot {}", id, slot);
        Ok(slot)
    }

    pub fn find(&self, id: AccountId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(record) if record.id == id))
    }

    pub fn get(&self, id: AccountId) -> Option<&AccountRecord> {
        self.find(id).and_then(|slot| self.slot(slot))
    }

    pub fn slot(&self, index: usize) -> Option<&AccountRecord> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &AccountRecord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|record| (index, record)))
    }

    pub fn delete(&mut self, id: AccountId) -> Result<(), StoreError> {
        let slot = self.find(id).ok_or(StoreError::NotFound)?;
        self.slots[slot] = None;
        self.count -= 1;
        log::info!("store: deleted {} from slot {}", id, slot);
        Ok(())
    }

    /// Administrative reset of the failed-attempt counter.
    pub fn unlock(&mut self, id: AccountId) -> Result<(), StoreError> {
        let record = self.record_mut(id)?;
        record.failed_attempts = 0;
        log::info!("store: unlocked {}", id);
        Ok(())
    }

    pub fn is_locked(&self, id: AccountId) -> bool {
        self.get(id)
            .is_some_and(|record| record.failed_attempts >= self.max_failed_attempts)
    }

    pub fn logged_in(&self) -> Option<AccountId> {
        self.iter()
            .find(|(_, record)| record.logged_in)
            .map(|(_, record)| record.id)
    }

    pub fn logout(&mut self, id: AccountId) -> Result<(), StoreError> {
        self.record_mut(id)?.logged_in = false;
        Ok(())
    }

    /// Bumps the failed-attempt counter, saturating at the lock threshold.
    pub(crate) fn record_failure(&mut self, slot: usize) -> u8 {
        let max = self.max_failed_attempts;
        match self.slots.get_mut(slot).and_then(Option::as_mut) {
            Some(record) => {
                record.failed_attempts = record.failed_attempts.saturating_add(1).min(max);
                record.failed_attempts
            }
            None => 0,
        }
    }

    /// Resets the counter and makes `slot` the only logged-in account.
    pub(crate) fn record_success(&mut self, slot: usize) {
        for (index, record) in self.slots.iter_mut().enumerate() {
            if let Some(record) = record {
                if index == slot {
                    record.failed_attempts = 0;
                    record.logged_in = true;
                } else {
                    record.logged_in = false;
                }
            }
        }
    }

    fn record_mut(&mut self, id: AccountId) -> Result<&mut AccountRecord, StoreError> {
        self.slots
            .iter_mut()
            .flatten()
            .find(|record| record.id == id)
            .ok_or(StoreError::NotFound)
    }

    fn shape_credential(
        &self,
        pattern: &[Channel],
        timing: &[u32],
    ) -> Result<(Pattern, Timing), StoreError> {
        if pattern.len() != self.pattern_len || timing.len() + 1 != self.pattern_len {
            return Err(StoreError::MalformedCredential);
        }
        for (index, channel) in pattern.iter().enumerate() {
            if pattern[..index].contains(channel) {
                return Err(StoreError::MalformedCredential);
            }
        }
        let pattern = Pattern::from_slice(pattern).map_err(|_| StoreError::MalformedCredential)?;
        let timing = Timing::from_slice(timing).map_err(|_| StoreError::MalformedCredential)?;
        Ok((pattern, timing))
    }
}
