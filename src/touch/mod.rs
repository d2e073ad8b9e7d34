mod debounce;
mod digits;
mod driver;
mod pattern;
mod press;
mod types;

pub use debounce::{ChannelAggregate, ChannelDebouncer};
pub use digits::{DigitCapture, DigitEvent};
pub use driver::{CaptureError, ProgressSink, TouchDriver};
pub use pattern::{CapturedPattern, PatternCapture, PatternEvent};
pub use press::PressDetector;
pub use types::{Channel, Pattern, RawSample, Timing};
