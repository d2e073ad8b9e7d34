use super::*;
use crate::config::{EXTENDED_PROFILE, REFERENCE_PROFILE};

const POLL_MS: u64 = 10;

struct Trace {
    capture: PatternCapture,
    tick: u64,
    events: std::vec::Vec<(u64, PatternEvent)>,
}

impl Trace {
    fn new(profile: &AuthProfile) -> Self {
        Self {
            capture: PatternCapture::new(profile),
            tick: 0,
            events: std::vec::Vec::new(),
        }
    }

    fn hold(&mut self, sample: RawSample, ticks: u64) -> &mut Self {
        for _ in 0..ticks {
            let now_ms = self.tick * POLL_MS;
            if let Some(event) = self.capture.tick(now_ms, sample) {
                self.events.push((now_ms, event));
            }
            self.tick += 1;
        }
        self
    }

    fn touch(&mut self, channel: Channel, ticks: u64) -> &mut Self {
        self.hold(RawSample::only(channel), ticks)
    }

    fn release(&mut self, ticks: u64) -> &mut Self {
        self.hold(RawSample::RELEASED, ticks)
    }
}

#[test]
fn swipe_sequence_records_pattern_and_rhythm() {
    let mut trace = Trace::new(&REFERENCE_PROFILE);
    trace
        .touch(Channel::Up, 10)
        .release(10)
        .touch(Channel::Down, 10)
        .release(20)
        .touch(Channel::Left, 10)
        .release(5)
        .touch(Channel::Right, 10);

    let captured = trace.capture.captured().expect("complete");
    assert_eq!(
        captured.pattern.as_slice(),
        &[Channel::Up, Channel::Down, Channel::Left, Channel::Right]
    );
    assert_eq!(captured.timing.as_slice(), &[200, 300, 150]);

    let stamps: std::vec::Vec<u64> = trace.events.iter().map(|(t, _)| *t).collect();
    assert_eq!(stamps, std::vec![60, 260, 560, 710]);
    assert_eq!(
        trace.events[0].1,
        PatternEvent::Accepted {
            channel: Channel::Up,
            segment_ms: None
        }
    );
    assert_eq!(
        trace.events[3].1,
        PatternEvent::Completed {
            channel: Channel::Right,
            segment_ms: Some(150)
        }
    );
}

#[test]
fn continuous_swipe_accepts_each_overtaking_pad() {
    let mut trace = Trace::new(&REFERENCE_PROFILE);
    trace
        .touch(Channel::Center, 12)
        .hold(RawSample::only(Channel::Center).with(Channel::Left), 4)
        .touch(Channel::Left, 20)
        .touch(Channel::Up, 30)
        .touch(Channel::Right, 30);

    assert_eq!(
        trace.capture.entered(),
        &[Channel::Center, Channel::Left, Channel::Up, Channel::Right]
    );
    assert!(trace.capture.is_complete());
}

#[test]
fn retouching_an_entered_pad_is_never_counted_twice() {
    let mut trace = Trace::new(&REFERENCE_PROFILE);
    trace
        .touch(Channel::Up, 10)
        .release(20)
        .touch(Channel::Up, 10)
        .release(20)
        .touch(Channel::Down, 10)
        .release(20)
        .touch(Channel::Up, 40);

    assert_eq!(trace.capture.entered(), &[Channel::Up, Channel::Down]);
    assert!(!trace.capture.is_complete());
    assert_eq!(trace.capture.captured(), None);
}

#[test]
fn extended_profile_collects_five_elements() {
    let mut trace = Trace::new(&EXTENDED_PROFILE);
    for channel in [
        Channel::Center,
        Channel::Up,
        Channel::Right,
        Channel::Down,
        Channel::Left,
    ] {
        trace.touch(channel, 10).release(15);
    }

    let captured = trace.capture.captured().expect("complete");
    assert_eq!(captured.pattern.len(), 5);
    assert_eq!(captured.timing.as_slice(), &[250, 250, 250, 250]);
}

#[test]
fn ticks_after_completion_change_nothing() {
    let mut trace = Trace::new(&REFERENCE_PROFILE);
    for channel in [Channel::Left, Channel::Up, Channel::Right, Channel::Down] {
        trace.touch(channel, 10).release(10);
    }
    let before = trace.capture.captured();
    trace.touch(Channel::Center, 30);

    assert_eq!(trace.events.len(), 4);
    assert_eq!(trace.capture.captured(), before);
}

#[test]
fn random_traces_never_repeat_and_stop_at_pattern_len() {
    let mut seed = 0x2545_f491_u32;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed
    };

    for profile in [REFERENCE_PROFILE, EXTENDED_PROFILE] {
        for _ in 0..200 {
            let mut trace = Trace::new(&profile);
            for _ in 0..120 {
                let bits = next();
                let mut touched = [false; 5];
                for (index, slot) in touched.iter_mut().enumerate() {
                    *slot = bits & (1 << index) != 0;
                }
                let ticks = 1 + (bits >> 8) as u64 % 12;
                trace.hold(RawSample::new(touched), ticks);
            }

            let entered = trace.capture.entered();
            assert!(entered.len() <= profile.pattern_len);
            for (index, channel) in entered.iter().enumerate() {
                assert!(!entered[..index].contains(channel));
            }
            assert_eq!(trace.capture.timing().len(), entered.len().saturating_sub(1));
            assert_eq!(trace.events.len(), entered.len());
            if let Some(captured) = trace.capture.captured() {
                assert_eq!(captured.pattern.len(), profile.pattern_len);
                assert_eq!(captured.timing.len(), profile.pattern_len - 1);
            }
        }
    }
}
