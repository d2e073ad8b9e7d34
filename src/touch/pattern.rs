use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use crate::config::{AuthProfile, MAX_PATTERN_LEN};

use super::debounce::ChannelDebouncer;
use super::types::{Channel, Pattern, RawSample, Timing};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternEvent {
    Accepted {
        channel: Channel,
        segment_ms: Option<u32>,
    },
    Completed {
        channel: Channel,
        segment_ms: Option<u32>,
    },
}

impl PatternEvent {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Accepted { channel, .. } | Self::Completed { channel, .. } => *channel,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPattern {
    pub pattern: Pattern,
    pub timing: Timing,
}

#[derive(Clone, Copy, Debug)]
enum PatternHsmEvent {
    Sample { now_ms: u64, sample: RawSample },
}

#[derive(Default)]
struct DispatchContext {
    event: Option<PatternEvent>,
}

/// Swipe-style capture of a repeat-free channel sequence plus its rhythm.
///
/// A channel is taken when it becomes the active channel, differs from the
/// previously taken one and is not already in the sequence. Lifting and
/// retouching the same pad cannot be told apart from holding it, so a pad
/// counts at most once per capture.
pub struct PatternCapture {
    machine: statig::blocking::StateMachine<PatternHsm>,
}

impl PatternCapture {
    pub fn new(profile: &AuthProfile) -> Self {
        Self {
            machine: PatternHsm::new(profile).state_machine(),
        }
    }

    pub fn tick(&mut self, now_ms: u64, sample: RawSample) -> Option<PatternEvent> {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(
            &PatternHsmEvent::Sample { now_ms, sample },
            &mut context,
        );
        context.event
    }

    pub fn entered(&self) -> &[Channel] {
        &self.machine.inner().pattern
    }

    pub fn timing(&self) -> &[u32] {
        &self.machine.inner().timing
    }

    pub fn is_complete(&self) -> bool {
        self.machine.inner().is_full()
    }

    pub fn captured(&self) -> Option<CapturedPattern> {
        let inner = self.machine.inner();
        inner.is_full().then(|| CapturedPattern {
            pattern: inner.pattern.clone(),
            timing: inner.timing.clone(),
        })
    }
}

struct PatternHsm {
    debouncer: ChannelDebouncer,
    target: usize,
    pattern: Pattern,
    timing: Timing,
    last_accepted: Option<Channel>,
    last_accept_ms: u64,
}

impl PatternHsm {
    fn new(profile: &AuthProfile) -> Self {
        Self {
            debouncer: ChannelDebouncer::new(profile),
            target: profile.pattern_len.clamp(1, MAX_PATTERN_LEN),
            pattern: Pattern::new(),
            timing: Timing::new(),
            last_accepted: None,
            last_accept_ms: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.pattern.len() >= self.target
    }

    fn is_new_element(&self, channel: Channel) -> bool {
        self.last_accepted != Some(channel) && !self.pattern.contains(&channel)
    }

    fn accept(&mut self, now_ms: u64, channel: Channel) -> Option<Option<u32>> {
        let segment_ms = if self.pattern.is_empty() {
            None
        } else {
            let elapsed = now_ms.saturating_sub(self.last_accept_ms);
            Some(elapsed.min(u32::MAX as u64) as u32)
        };
        if let Some(segment) = segment_ms {
            self.timing.push(segment).ok()?;
        }
        self.pattern.push(channel).ok()?;
        self.last_accepted = Some(channel);
        self.last_accept_ms = now_ms;
        Some(segment_ms)
    }
}

#[state_machine(initial = "State::collecting()")]
impl PatternHsm {
    #[state]
    fn collecting(
        &mut self,
        context: &mut DispatchContext,
        event: &PatternHsmEvent,
    ) -> Outcome<State> {
        match event {
            PatternHsmEvent::Sample { now_ms, sample } => {
                let Some(channel) = self.debouncer.tick(*sample) else {
                    return Handled;
                };
                if !self.is_new_element(channel) {
                    return Handled;
                }
                let Some(segment_ms) = self.accept(*now_ms, channel) else {
                    return Transition(State::complete());
                };
                log::trace!("pattern: accepted {}/{}", self.pattern.len(), self.target);
                if self.is_full() {
                    context.event = Some(PatternEvent::Completed {
                        channel,
                        segment_ms,
                    });
                    Transition(State::complete())
                } else {
                    context.event = Some(PatternEvent::Accepted {
                        channel,
                        segment_ms,
                    });
                    Handled
                }
            }
        }
    }

    #[state]
    fn complete(
        &mut self,
        context: &mut DispatchContext,
        event: &PatternHsmEvent,
    ) -> Outcome<State> {
        let _ = (context, event);
        Handled
    }
}

#[cfg(test)]
mod tests;
