use heapless::Vec;
use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::{AuthProfile, MAX_DIGITS};

use super::debounce::ChannelDebouncer;
use super::types::RawSample;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitEvent {
    Entered { digit: u8 },
    Completed { digit: u8, value: i16 },
}

#[derive(Clone, Copy, Debug)]
enum DigitHsmEvent {
    Sample(RawSample),
}

#[derive(Default)]
struct DispatchContext {
    event: Option<DigitEvent>,
}

/// Numeric entry from single-pad touches.
///
/// Each pad enters its number (`Up` = 1 .. `Center` = 5). After a digit is
/// taken, every channel must decay to the release threshold before the next
/// one registers, so a held touch never repeats.
pub struct DigitCapture {
    machine: statig::blocking::StateMachine<DigitHsm>,
}

impl DigitCapture {
    pub fn new(profile: &AuthProfile, digits: usize) -> Self {
        Self {
            machine: DigitHsm::new(profile, digits).state_machine(),
        }
    }

    pub fn tick(&mut self, sample: RawSample) -> Option<DigitEvent> {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&DigitHsmEvent::Sample(sample), &mut context);
        context.event
    }

    pub fn entered(&self) -> &[u8] {
        &self.machine.inner().entered
    }

    pub fn is_complete(&self) -> bool {
        self.machine.inner().is_full()
    }

    pub fn value(&self) -> Option<i16> {
        let inner = self.machine.inner();
        inner.is_full().then(|| inner.value())
    }
}

struct DigitHsm {
    debouncer: ChannelDebouncer,
    target: usize,
    entered: Vec<u8, MAX_DIGITS>,
}

impl DigitHsm {
    fn new(profile: &AuthProfile, digits: usize) -> Self {
        Self {
            debouncer: ChannelDebouncer::new(profile),
            target: digits.clamp(1, MAX_DIGITS),
            entered: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.entered.len() >= self.target
    }

    fn value(&self) -> i16 {
        self.entered
            .iter()
            .fold(0i16, |acc, &digit| acc * 10 + digit as i16)
    }
}

#[state_machine(initial = "State::awaiting_digit()")]
impl DigitHsm {
    #[state]
    fn awaiting_digit(
        &mut self,
        context: &mut DispatchContext,
        event: &DigitHsmEvent,
    ) -> Outcome<State> {
        match event {
            DigitHsmEvent::Sample(sample) => {
                let Some(channel) = self.debouncer.tick(*sample) else {
                    return Handled;
                };
                let digit = channel.number();
                if self.entered.push(digit).is_err() {
                    return Transition(State::complete());
                }
                log::trace!("digits: accepted {}/{}", self.entered.len(), self.target);
                if self.is_full() {
                    context.event = Some(DigitEvent::Completed {
                        digit,
                        value: self.value(),
                    });
                    Transition(State::complete())
                } else {
                    context.event = Some(DigitEvent::Entered { digit });
                    Transition(State::digit_locked())
                }
            }
        }
    }

    #[state]
    fn digit_locked(
        &mut self,
        context: &mut DispatchContext,
        event: &DigitHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            DigitHsmEvent::Sample(sample) => {
                self.debouncer.tick(*sample);
                if self.debouncer.fully_released() {
                    Transition(State::awaiting_digit())
                } else {
                    Handled
                }
            }
        }
    }

    #[state]
    fn complete(
        &mut self,
        context: &mut DispatchContext,
        event: &DigitHsmEvent,
    ) -> Outcome<State> {
        let _ = (context, event);
        Handled
    }
}
