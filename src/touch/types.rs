use heapless::Vec;

use crate::config::{CHANNEL_COUNT, MAX_PATTERN_LEN, MAX_SEGMENTS};

/// Ordered, repeat-free channel sequence.
pub type Pattern = Vec<Channel, MAX_PATTERN_LEN>;
/// Milliseconds between consecutive pattern elements.
pub type Timing = Vec<u32, MAX_SEGMENTS>;

/// One of the five capacitive pads, in sensor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
    Center = 4,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Up,
        Channel::Right,
        Channel::Down,
        Channel::Left,
        Channel::Center,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// User-facing identifier in `1..=5`; also the digit this pad enters.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_number(number: u8) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::from_index(index as usize))
    }
}

/// Raw per-channel touch levels for one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSample {
    pub touched: [bool; CHANNEL_COUNT],
}

impl RawSample {
    pub const RELEASED: Self = Self {
        touched: [false; CHANNEL_COUNT],
    };

    pub const fn new(touched: [bool; CHANNEL_COUNT]) -> Self {
        Self { touched }
    }

    pub fn only(channel: Channel) -> Self {
        let mut touched = [false; CHANNEL_COUNT];
        touched[channel.index()] = true;
        Self { touched }
    }

    pub fn with(mut self, channel: Channel) -> Self {
        self.touched[channel.index()] = true;
        self
    }

    pub fn is_touched(&self, channel: Channel) -> bool {
        self.touched[channel.index()]
    }

    pub fn any(&self) -> bool {
        self.touched.iter().any(|&touched| touched)
    }
}
