//! Pulse-Engine: pulse extraction for multi-channel logic captures
//!
//! Four-stage pipeline applied independently per channel: median denoising,
//! first-difference edge detection, start-polarity resolution, and edge
//! pairing into pulse records.

pub mod analyzer;
pub mod config;
pub mod denoise;
pub mod edges;
pub mod polarity;
pub mod segment;

pub use analyzer::{ChannelAnalysis, ChannelReport, PulseAnalyzer};
pub use config::{EngineConfig, WidthSelection};
pub use denoise::median_filter;
pub use edges::{edge_indices, first_difference};
pub use polarity::{is_rising_signal, starts_mid_pulse};
pub use segment::{segment_pulses, PulseRecord};
