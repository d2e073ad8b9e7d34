use std::vec::Vec;

use super::*;
use crate::auth::SegmentMatches;
use crate::config::{AuthProfile, EXTENDED_PROFILE, REFERENCE_PROFILE};
use crate::platform::{ReplayPad, TickClock};
use crate::touch::{ProgressSink, RawSample};

const ACTIVATION_POLLS: usize = 7;
const RELEASE_POLLS: usize = 5;
const POLL_MS: u32 = 10;

#[derive(Default)]
struct Script(Vec<RawSample>);

impl Script {
    fn touch(&mut self, channel: Channel, polls: usize) -> &mut Self {
        self.0
            .extend(core::iter::repeat(RawSample::only(channel)).take(polls));
        self
    }

    fn release(&mut self, polls: usize) -> &mut Self {
        self.0
            .extend(core::iter::repeat(RawSample::RELEASED).take(polls));
        self
    }

    fn press(&mut self, channel: Channel) -> &mut Self {
        self.touch(channel, ACTIVATION_POLLS)
    }

    fn digits(&mut self, pads: &[Channel]) -> &mut Self {
        for (index, &pad) in pads.iter().enumerate() {
            self.touch(pad, ACTIVATION_POLLS);
            if index + 1 < pads.len() {
                self.release(RELEASE_POLLS);
            }
        }
        self
    }

    /// Each gap is the time from one acceptance to the next.
    fn pattern(&mut self, pads: &[Channel], gaps_ms: &[u32]) -> &mut Self {
        for (index, &pad) in pads.iter().enumerate() {
            self.touch(pad, ACTIVATION_POLLS);
            if let Some(gap) = gaps_ms.get(index) {
                self.release((gap / POLL_MS) as usize - ACTIVATION_POLLS);
            }
        }
        self
    }
}

#[derive(Default)]
struct RecordingScreen {
    notices: Vec<Notice>,
    digit_updates: usize,
    pattern_updates: usize,
}

impl ProgressSink for RecordingScreen {
    fn digits(&mut self, _prompt: &str, _entered: &[u8]) {
        self.digit_updates += 1;
    }

    fn pattern(&mut self, _entered: &[Channel]) {
        self.pattern_updates += 1;
    }
}

impl AuthScreen for RecordingScreen {
    fn notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

const ID_12: [Channel; 2] = [Channel::Up, Channel::Right];
const PATTERN: [Channel; 4] = [
    Channel::Up,
    Channel::Down,
    Channel::Center,
    Channel::Right,
];
const WRONG: [Channel; 4] = [Channel::Up, Channel::Down, Channel::Center, Channel::Left];
const GAPS: [u32; 3] = [300, 500, 400];

fn run(
    script: &Script,
    store: &mut CredentialStore,
    cycles: usize,
) -> (Vec<SessionReport>, RecordingScreen) {
    run_with(REFERENCE_PROFILE, script, store, cycles)
}

fn run_with(
    profile: AuthProfile,
    script: &Script,
    store: &mut CredentialStore,
    cycles: usize,
) -> (Vec<SessionReport>, RecordingScreen) {
    let clock = TickClock::new();
    let pad = ReplayPad::new(&script.0);
    let driver = TouchDriver::new(pad, &clock, &clock, profile);
    let mut screen = RecordingScreen::default();
    let mut session = Session::new(driver, &mut screen);
    let reports = (0..cycles)
        .map(|_| session.run_once(store).expect("cycle"))
        .collect();
    drop(session);
    (reports, screen)
}

#[test]
fn register_then_login_with_one_slow_segment_warns() {
    let mut script = Script::default();
    script
        .press(Channel::Left)
        .digits(&ID_12)
        .pattern(&PATTERN, &GAPS)
        .press(Channel::Right)
        .digits(&ID_12)
        .pattern(&PATTERN, &[320, 480, 600]);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (reports, screen) = run(&script, &mut store, 2);

    assert_eq!(
        reports[0],
        SessionReport::Registered {
            id: AccountId(12),
            slot: 0
        }
    );
    let segments = SegmentMatches::from_slice(&[true, true, false]).unwrap();
    assert_eq!(
        reports[1],
        SessionReport::Login {
            id: AccountId(12),
            outcome: LoginOutcome::GrantedWithWarning {
                segments: segments.clone()
            }
        }
    );
    assert_eq!(
        store.get(AccountId(12)).map(|r| r.timing.as_slice().to_vec()),
        Some(GAPS.to_vec())
    );
    assert_eq!(store.logged_in(), Some(AccountId(12)));
    assert!(screen.notices.contains(&Notice::RegistrationSuccessful));
    assert!(screen.notices.contains(&Notice::LoginWarning { segments }));
    // Two digits and an empty grid plus four elements per capture.
    assert_eq!(screen.digit_updates, 4);
    assert_eq!(screen.pattern_updates, 10);
}

#[test]
fn register_flow_shows_notices_in_order() {
    let mut script = Script::default();
    script
        .press(Channel::Left)
        .digits(&ID_12)
        .pattern(&PATTERN, &GAPS);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (_, screen) = run(&script, &mut store, 1);

    assert_eq!(
        screen.notices,
        std::vec![
            Notice::MainMenu,
            Notice::RegisterMenu,
            Notice::Loading,
            Notice::EnterId,
            Notice::DrawPattern,
            Notice::RegistrationSuccessful,
            Notice::Redirecting,
        ]
    );
}

#[test]
fn three_wrong_patterns_lock_and_skip_pattern_entry() {
    let mut script = Script::default();
    script
        .press(Channel::Left)
        .digits(&ID_12)
        .pattern(&PATTERN, &GAPS);
    for _ in 0..3 {
        script
            .press(Channel::Right)
            .digits(&ID_12)
            .pattern(&WRONG, &GAPS);
    }
    script.press(Channel::Right).digits(&ID_12);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (reports, screen) = run(&script, &mut store, 5);

    let attempts: Vec<Option<u8>> = reports[1..4]
        .iter()
        .map(|report| match report {
            SessionReport::Login {
                outcome: LoginOutcome::Rejected { attempts_left, .. },
                ..
            } => Some(*attempts_left),
            _ => None,
        })
        .collect();
    assert_eq!(attempts, std::vec![Some(2), Some(1), Some(0)]);
    assert_eq!(
        reports[4],
        SessionReport::Login {
            id: AccountId(12),
            outcome: LoginOutcome::LockedOut
        }
    );
    assert!(screen
        .notices
        .contains(&Notice::WrongPattern { attempts_left: 2 }));
    let tail = &screen.notices[screen.notices.len() - 6..];
    assert_eq!(
        tail,
        &[
            Notice::LoginMenu,
            Notice::Loading,
            Notice::EnterId,
            Notice::Checking,
            Notice::AccountLocked,
            Notice::Redirecting,
        ]
    );
    assert_eq!(
        screen
            .notices
            .iter()
            .filter(|n| **n == Notice::AccountLocked)
            .count(),
        2
    );
}

#[test]
fn unknown_id_is_reported_without_pattern_entry() {
    let mut script = Script::default();
    script.press(Channel::Right).digits(&[Channel::Center, Channel::Center]);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (reports, screen) = run(&script, &mut store, 1);

    assert_eq!(
        reports[0],
        SessionReport::Login {
            id: AccountId(55),
            outcome: LoginOutcome::UnknownAccount
        }
    );
    assert!(screen.notices.contains(&Notice::InvalidUserId));
    assert!(!screen.notices.contains(&Notice::DrawPattern));
    assert_eq!(screen.pattern_updates, 0);
}

#[test]
fn duplicate_id_and_full_table_reject_registration() {
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);
    store
        .insert(AccountId(12), &PATTERN, &GAPS)
        .expect("insert");

    let mut script = Script::default();
    script.press(Channel::Left).digits(&ID_12);
    let (reports, screen) = run(&script, &mut store, 1);
    assert_eq!(
        reports[0],
        SessionReport::RegistrationRejected(StoreError::DuplicateId)
    );
    assert!(screen.notices.contains(&Notice::IdExists));

    for id in 20..29 {
        store.insert(AccountId(id), &PATTERN, &GAPS).expect("fill");
    }
    let mut script = Script::default();
    script.press(Channel::Left);
    let (reports, screen) = run(&script, &mut store, 1);
    assert_eq!(
        reports[0],
        SessionReport::RegistrationRejected(StoreError::Full)
    );
    assert!(screen.notices.contains(&Notice::DatabaseFull));
    assert_eq!(screen.digit_updates, 0);
}

#[test]
fn other_pads_are_ignored_by_the_menu() {
    let mut script = Script::default();
    script.press(Channel::Center);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (reports, screen) = run(&script, &mut store, 1);

    assert_eq!(reports[0], SessionReport::Ignored(Channel::Center));
    assert_eq!(screen.notices, std::vec![Notice::MainMenu]);
}

#[test]
fn pattern_length_mismatch_skips_both_flows() {
    let mut script = Script::default();
    script.press(Channel::Left).press(Channel::Right);
    let mut store = CredentialStore::new(&REFERENCE_PROFILE);

    let (reports, screen) = run_with(EXTENDED_PROFILE, &script, &mut store, 2);

    let mismatch = SessionReport::ProfileMismatch {
        stored_len: 4,
        captured_len: 5,
    };
    assert_eq!(reports, std::vec![mismatch.clone(), mismatch]);
    assert_eq!(
        screen
            .notices
            .iter()
            .filter(|n| **n == Notice::ProfileMismatch)
            .count(),
        2
    );
    assert!(!screen.notices.contains(&Notice::EnterId));
    assert_eq!(screen.digit_updates, 0);
    assert!(store.is_empty());
}
