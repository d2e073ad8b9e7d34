use crate::config::AuthProfile;

use super::debounce::ChannelDebouncer;
use super::types::{Channel, RawSample};

/// Step form of "wait for a single press", used for menu navigation.
///
/// Reports a channel the first tick it becomes the active channel. A held
/// channel is reported once; it re-arms only after no channel is active or a
/// different channel takes over.
#[derive(Clone, Copy, Debug)]
pub struct PressDetector {
    debouncer: ChannelDebouncer,
    last_reported: Option<Channel>,
}

impl PressDetector {
    pub fn new(profile: &AuthProfile) -> Self {
        Self {
            debouncer: ChannelDebouncer::new(profile),
            last_reported: None,
        }
    }

    pub fn tick(&mut self, sample: RawSample) -> Option<Channel> {
        match self.debouncer.tick(sample) {
            Some(channel) if self.last_reported != Some(channel) => {
                self.last_reported = Some(channel);
                Some(channel)
            }
            Some(_) => None,
            None => {
                self.last_reported = None;
                None
            }
        }
    }
}
