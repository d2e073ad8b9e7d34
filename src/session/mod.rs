mod notice;

use crate::auth::{AccountId, CredentialStore, LockoutPolicy, LoginOutcome, StoreError};
use crate::config::{
    CHECKING_DWELL_MS, CHECKING_SHORT_DWELL_MS, ERROR_DWELL_MS, HELLO_DWELL_MS,
    LOADING_DWELL_MS, MENU_DWELL_MS, PROMPT_DWELL_MS, REDIRECT_DWELL_MS, RESULT_DWELL_MS,
};
use crate::platform::{DelayOps, MonotonicClock, TouchPadOps};
use crate::touch::{CaptureError, Channel, TouchDriver};

pub use notice::{AuthScreen, LogScreen, Notice};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Login,
}

impl MenuChoice {
    /// Left (pad 4) registers, Right (pad 2) logs in.
    pub fn from_channel(channel: Channel) -> Option<Self> {
        match channel {
            Channel::Left => Some(Self::Register),
            Channel::Right => Some(Self::Login),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionReport {
    Ignored(Channel),
    Registered { id: AccountId, slot: usize },
    RegistrationRejected(StoreError),
    Login { id: AccountId, outcome: LoginOutcome },
    /// The driver captures patterns of a different length than the table holds.
    ProfileMismatch { stored_len: usize, captured_len: usize },
}

/// One menu cycle at a time over a touch driver and a screen.
///
/// The credential table is borrowed per call; the session holds no account
/// state of its own.
pub struct Session<P, D, C, S> {
    driver: TouchDriver<P, D, C>,
    policy: LockoutPolicy,
    screen: S,
}

impl<P, D, C, S> Session<P, D, C, S>
where
    P: TouchPadOps,
    D: DelayOps,
    C: MonotonicClock,
    S: AuthScreen,
{
    pub fn new(driver: TouchDriver<P, D, C>, screen: S) -> Self {
        let policy = LockoutPolicy::new(driver.profile());
        Self {
            driver,
            policy,
            screen,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn driver_mut(&mut self) -> &mut TouchDriver<P, D, C> {
        &mut self.driver
    }

    pub fn greet(&mut self) {
        self.show(Notice::Hello, HELLO_DWELL_MS);
    }

    pub fn run_once(
        &mut self,
        store: &mut CredentialStore,
    ) -> Result<SessionReport, CaptureError<P::Error>> {
        self.screen.notice(&Notice::MainMenu);
        let channel = self.driver.wait_for_press()?;
        match MenuChoice::from_channel(channel) {
            Some(MenuChoice::Register) => self.register(store),
            Some(MenuChoice::Login) => self.login(store),
            None => Ok(SessionReport::Ignored(channel)),
        }
    }

    fn register(
        &mut self,
        store: &mut CredentialStore,
    ) -> Result<SessionReport, CaptureError<P::Error>> {
        self.show(Notice::RegisterMenu, MENU_DWELL_MS);
        self.show(Notice::Loading, LOADING_DWELL_MS);
        if store.is_full() {
            self.show(Notice::DatabaseFull, ERROR_DWELL_MS);
            self.redirect();
            return Ok(SessionReport::RegistrationRejected(StoreError::Full));
        }

        if let Some(report) = self.reject_mismatched(store) {
            return Ok(report);
        }

        self.show(Notice::EnterId, PROMPT_DWELL_MS);
        let id = AccountId(self.driver.capture_id(&mut self.screen)?);
        if store.find(id).is_some() {
            self.show(Notice::IdExists, ERROR_DWELL_MS);
            self.redirect();
            return Ok(SessionReport::RegistrationRejected(StoreError::DuplicateId));
        }

        self.show(Notice::DrawPattern, PROMPT_DWELL_MS);
        let captured = self.driver.capture_pattern(&mut self.screen)?;
        let report = match store.insert(id, &captured.pattern, &captured.timing) {
            Ok(slot) => {
                self.show(Notice::RegistrationSuccessful, RESULT_DWELL_MS);
                SessionReport::Registered { id, slot }
            }
            Err(err) => {
                self.show(Notice::RegistrationFailed, RESULT_DWELL_MS);
                SessionReport::RegistrationRejected(err)
            }
        };
        self.redirect();
        Ok(report)
    }

    fn login(
        &mut self,
        store: &mut CredentialStore,
    ) -> Result<SessionReport, CaptureError<P::Error>> {
        self.show(Notice::LoginMenu, MENU_DWELL_MS);
        self.show(Notice::Loading, LOADING_DWELL_MS);
        if let Some(report) = self.reject_mismatched(store) {
            return Ok(report);
        }
        self.show(Notice::EnterId, PROMPT_DWELL_MS);
        let id = AccountId(self.driver.capture_id(&mut self.screen)?);

        if store.find(id).is_none() {
            self.show(Notice::Checking, CHECKING_SHORT_DWELL_MS);
            self.show(Notice::InvalidUserId, ERROR_DWELL_MS);
            self.redirect();
            return Ok(SessionReport::Login {
                id,
                outcome: LoginOutcome::UnknownAccount,
            });
        }
        if self.policy.is_locked(store, id) {
            self.show(Notice::Checking, CHECKING_SHORT_DWELL_MS);
            self.show(Notice::AccountLocked, ERROR_DWELL_MS);
            self.redirect();
            return Ok(SessionReport::Login {
                id,
                outcome: LoginOutcome::LockedOut,
            });
        }

        self.show(Notice::DrawPattern, PROMPT_DWELL_MS);
        let captured = self.driver.capture_pattern(&mut self.screen)?;
        self.show(Notice::Checking, CHECKING_DWELL_MS);
        let outcome = self
            .policy
            .attempt(store, id, &captured.pattern, &captured.timing);

        let (notice, dwell_ms) = match &outcome {
            LoginOutcome::Granted { .. } => (Notice::LoginSuccessful, RESULT_DWELL_MS),
            LoginOutcome::GrantedWithWarning { segments } => (
                Notice::LoginWarning {
                    segments: segments.clone(),
                },
                RESULT_DWELL_MS,
            ),
            LoginOutcome::Rejected {
                attempts_left: 0, ..
            }
            | LoginOutcome::LockedOut => (Notice::AccountLocked, ERROR_DWELL_MS),
            LoginOutcome::Rejected { attempts_left, .. } => (
                Notice::WrongPattern {
                    attempts_left: *attempts_left,
                },
                ERROR_DWELL_MS,
            ),
            LoginOutcome::UnknownAccount => (Notice::InvalidUserId, ERROR_DWELL_MS),
        };
        self.show(notice, dwell_ms);
        self.redirect();
        Ok(SessionReport::Login { id, outcome })
    }

    /// Refuses to capture when a pattern could never fit the table.
    fn reject_mismatched(&mut self, store: &CredentialStore) -> Option<SessionReport> {
        let stored_len = store.pattern_len();
        let captured_len = self.driver.profile().pattern_len;
        if stored_len == captured_len {
            return None;
        }
        log::warn!(
            "session: table holds {}-element patterns, driver captures {}",
            stored_len,
            captured_len
        );
        self.show(Notice::ProfileMismatch, ERROR_DWELL_MS);
        self.redirect();
        Some(SessionReport::ProfileMismatch {
            stored_len,
            captured_len,
        })
    }

    fn show(&mut self, notice: Notice, dwell_ms: u32) {
        self.screen.notice(&notice);
        self.driver.pause(dwell_ms);
    }

    fn redirect(&mut self) {
        self.show(Notice::Redirecting, REDIRECT_DWELL_MS);
    }
}

#[cfg(test)]
mod tests;
