use std::fmt;

use touchlock::{
    touch::{CapturedPattern, DigitCapture, DigitEvent, PatternCapture, PatternEvent, PressDetector},
    AuthProfile, Channel,
};

use crate::trace::TraceSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Press,
    Digits(usize),
    Pattern,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emitted {
    Press(Channel),
    Digit(DigitEvent),
    Pattern(PatternEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Final {
    Presses(usize),
    Digits(Option<i16>),
    Pattern(Option<CapturedPattern>),
}

#[derive(Clone, Debug)]
pub struct Replay {
    pub events: Vec<(u64, Emitted)>,
    pub result: Final,
}

pub fn run(mode: Mode, profile: &AuthProfile, samples: &[TraceSample]) -> Replay {
    match mode {
        Mode::Press => {
            let mut detector = PressDetector::new(profile);
            let events: Vec<_> = samples
                .iter()
                .filter_map(|s| detector.tick(s.sample).map(|c| (s.t_ms, Emitted::Press(c))))
                .collect();
            let result = Final::Presses(events.len());
            Replay { events, result }
        }
        Mode::Digits(count) => {
            let mut capture = DigitCapture::new(profile, count);
            let events = samples
                .iter()
                .filter_map(|s| capture.tick(s.sample).map(|e| (s.t_ms, Emitted::Digit(e))))
                .collect();
            Replay {
                events,
                result: Final::Digits(capture.value()),
            }
        }
        Mode::Pattern => {
            let mut capture = PatternCapture::new(profile);
            let events = samples
                .iter()
                .filter_map(|s| {
                    capture
                        .tick(s.t_ms, s.sample)
                        .map(|e| (s.t_ms, Emitted::Pattern(e)))
                })
                .collect();
            Replay {
                events,
                result: Final::Pattern(capture.captured()),
            }
        }
    }
}

impl fmt::Display for Emitted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Press(channel) => write!(f, "press {:?} ({})", channel, channel.number()),
            Self::Digit(DigitEvent::Entered { digit }) => write!(f, "digit {digit}"),
            Self::Digit(DigitEvent::Completed { digit, value }) => {
                write!(f, "digit {digit} -> value {value}")
            }
            Self::Pattern(event) => {
                let (kind, segment) = match event {
                    PatternEvent::Accepted { segment_ms, .. } => ("accepted", segment_ms),
                    PatternEvent::Completed { segment_ms, .. } => ("completed", segment_ms),
                };
                write!(f, "{kind} {:?}", event.channel())?;
                match segment {
                    Some(ms) => write!(f, " after {ms} ms"),
                    None => Ok(()),
                }
            }
        }
    }
}

impl fmt::Display for Final {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presses(count) => write!(f, "{count} press(es)"),
            Self::Digits(Some(value)) => write!(f, "value {value}"),
            Self::Pattern(Some(captured)) => write!(
                f,
                "pattern {:?} timing {:?}",
                captured.pattern.as_slice(),
                captured.timing.as_slice()
            ),
            Self::Digits(None) | Self::Pattern(None) => f.write_str("incomplete"),
        }
    }
}
