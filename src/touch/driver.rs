use core::fmt;

use crate::config::AuthProfile;
use crate::platform::{DelayOps, MonotonicClock, TouchPadOps};

use super::digits::{DigitCapture, DigitEvent};
use super::pattern::{CapturedPattern, PatternCapture, PatternEvent};
use super::press::PressDetector;
use super::types::Channel;

/// Receives partial entries so the caller can redraw progress.
pub trait ProgressSink {
    fn digits(&mut self, prompt: &str, entered: &[u8]) {
        let _ = (prompt, entered);
    }

    fn pattern(&mut self, entered: &[Channel]) {
        let _ = entered;
    }
}

impl ProgressSink for () {}

impl<T: ProgressSink + ?Sized> ProgressSink for &mut T {
    fn digits(&mut self, prompt: &str, entered: &[u8]) {
        (**self).digits(prompt, entered);
    }

    fn pattern(&mut self, entered: &[Channel]) {
        (**self).pattern(entered);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureError<E> {
    Sensor(E),
    TimedOut,
}

impl<E: fmt::Debug> fmt::Display for CaptureError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(err) => write!(f, "touch sensor read failed: {err:?}"),
            Self::TimedOut => f.write_str("touch capture timed out"),
        }
    }
}

/// Blocking front end that polls the pad and pumps the step machines.
///
/// One poll per `poll_interval_ms`; ticks are never skipped while a capture
/// runs. Without a timeout every call blocks until the user completes it.
pub struct TouchDriver<P, D, C> {
    pad: P,
    delay: D,
    clock: C,
    profile: AuthProfile,
    timeout_ms: Option<u64>,
}

impl<P, D, C> TouchDriver<P, D, C>
where
    P: TouchPadOps,
    D: DelayOps,
    C: MonotonicClock,
{
    pub fn new(pad: P, delay: D, clock: C, profile: AuthProfile) -> Self {
        Self {
            pad,
            delay,
            clock,
            profile: profile.sanitized(),
            timeout_ms: None,
        }
    }

    /// Abandons any single wait or capture that runs longer than `timeout_ms`.
    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn profile(&self) -> &AuthProfile {
        &self.profile
    }

    pub fn pad_mut(&mut self) -> &mut P {
        &mut self.pad
    }

    pub fn pause(&self, millis: u32) {
        self.delay.delay_ms(millis);
    }

    pub fn wait_for_press(&mut self) -> Result<Channel, CaptureError<P::Error>> {
        let started_ms = self.clock.now_ms();
        let mut detector = PressDetector::new(&self.profile);
        loop {
            let sample = self.pad.read().map_err(CaptureError::Sensor)?;
            if let Some(channel) = detector.tick(sample) {
                self.delay.delay_ms(self.profile.press_debounce_ms);
                return Ok(channel);
            }
            self.check_deadline(started_ms)?;
            self.delay.delay_ms(self.profile.poll_interval_ms);
        }
    }

    pub fn capture_digits(
        &mut self,
        count: usize,
        prompt: &str,
        sink: &mut impl ProgressSink,
    ) -> Result<i16, CaptureError<P::Error>> {
        let started_ms = self.clock.now_ms();
        let mut capture = DigitCapture::new(&self.profile, count);
        let value = loop {
            let sample = self.pad.read().map_err(CaptureError::Sensor)?;
            match capture.tick(sample) {
                Some(DigitEvent::Entered { .. }) => sink.digits(prompt, capture.entered()),
                Some(DigitEvent::Completed { value, .. }) => {
                    sink.digits(prompt, capture.entered());
                    break value;
                }
                None => {}
            }
            self.check_deadline(started_ms)?;
            self.delay.delay_ms(self.profile.poll_interval_ms);
        };
        self.delay.delay_ms(self.profile.poll_interval_ms);
        self.delay.delay_ms(self.profile.settle_ms);
        Ok(value)
    }

    pub fn capture_id(
        &mut self,
        sink: &mut impl ProgressSink,
    ) -> Result<i16, CaptureError<P::Error>> {
        let digits = self.profile.id_digits;
        self.capture_digits(digits, "ID", sink)
    }

    pub fn capture_pattern(
        &mut self,
        sink: &mut impl ProgressSink,
    ) -> Result<CapturedPattern, CaptureError<P::Error>> {
        let started_ms = self.clock.now_ms();
        let mut capture = PatternCapture::new(&self.profile);
        sink.pattern(&[]);
        let captured = loop {
            let sample = self.pad.read().map_err(CaptureError::Sensor)?;
            let now_ms = self.clock.now_ms();
            match capture.tick(now_ms, sample) {
                Some(PatternEvent::Accepted { .. }) => sink.pattern(capture.entered()),
                Some(PatternEvent::Completed { .. }) => {
                    sink.pattern(capture.entered());
                    if let Some(captured) = capture.captured() {
                        break captured;
                    }
                }
                None => {}
            }
            self.check_deadline(started_ms)?;
            self.delay.delay_ms(self.profile.poll_interval_ms);
        };
        self.delay.delay_ms(self.profile.poll_interval_ms);
        self.delay.delay_ms(self.profile.settle_ms);
        Ok(captured)
    }

    fn check_deadline(&self, started_ms: u64) -> Result<(), CaptureError<P::Error>> {
        let Some(timeout_ms) = self.timeout_ms else {
            return Ok(());
        };
        if self.clock.now_ms().saturating_sub(started_ms) >= timeout_ms {
            log::warn!("touch: capture abandoned after {} ms", timeout_ms);
            return Err(CaptureError::TimedOut);
        }
        Ok(())
    }
}
