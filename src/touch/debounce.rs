use crate::config::{AuthProfile, CHANNEL_COUNT};

use super::types::{Channel, RawSample};

/// Leaky-integrator level per channel, clamped to `[0, ceiling]`.
///
/// Levels persist across polls for the lifetime of one capture; they only
/// decay through released samples and are never zeroed mid-sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelAggregate {
    levels: [i16; CHANNEL_COUNT],
    ceiling: i16,
}

impl ChannelAggregate {
    pub const fn new(ceiling: i16) -> Self {
        Self {
            levels: [0; CHANNEL_COUNT],
            ceiling,
        }
    }

    pub fn update(&mut self, sample: RawSample) {
        for (level, &touched) in self.levels.iter_mut().zip(sample.touched.iter()) {
            let next = if touched {
                level.saturating_add(1)
            } else {
                level.saturating_sub(1)
            };
            *level = next.clamp(0, self.ceiling);
        }
    }

    pub fn level(&self, channel: Channel) -> i16 {
        self.levels[channel.index()]
    }

    pub fn levels(&self) -> [i16; CHANNEL_COUNT] {
        self.levels
    }

    /// Channel with the strictly highest level above `threshold`.
    ///
    /// The scan compares with `>` against a running maximum seeded with the
    /// threshold, so ties go to the lowest channel index and nothing at or
    /// below the threshold is ever reported.
    pub fn leader(&self, threshold: i16) -> Option<Channel> {
        let mut best = threshold;
        let mut leader = None;
        for channel in Channel::ALL {
            let level = self.levels[channel.index()];
            if level > best {
                best = level;
                leader = Some(channel);
            }
        }
        leader
    }

    pub fn all_at_or_below(&self, threshold: i16) -> bool {
        self.levels.iter().all(|&level| level <= threshold)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChannelDebouncer {
    aggregate: ChannelAggregate,
    activation_threshold: i16,
    release_threshold: i16,
}

impl ChannelDebouncer {
    pub fn new(profile: &AuthProfile) -> Self {
        Self {
            aggregate: ChannelAggregate::new(profile.aggregate_ceiling),
            activation_threshold: profile.activation_threshold,
            release_threshold: profile.release_threshold,
        }
    }

    /// Folds one poll into the aggregate and returns the active channel, if any.
    pub fn tick(&mut self, sample: RawSample) -> Option<Channel> {
        self.aggregate.update(sample);
        self.active()
    }

    pub fn active(&self) -> Option<Channel> {
        self.aggregate.leader(self.activation_threshold)
    }

    /// True once every channel has decayed to the release threshold.
    pub fn fully_released(&self) -> bool {
        self.aggregate.all_at_or_below(self.release_threshold)
    }

    pub fn aggregate(&self) -> &ChannelAggregate {
        &self.aggregate
    }
}
