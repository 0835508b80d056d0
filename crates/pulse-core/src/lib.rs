//! Pulse-Core: Foundation types for logic-analyzer pulse extraction
//!
//! Sample matrix container and error taxonomy shared by the capture and
//! processing crates.

pub mod error;
pub mod matrix;

pub use error::{PulseError, PulseResult};
pub use matrix::{ChannelSeries, SampleMatrix};
