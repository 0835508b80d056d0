//! Pulse-Capture: sample acquisition for the pulse-extraction engine
//!
//! Loads logic-analyzer traces from CSV files, captures them live through an
//! external CLI tool, and generates synthetic traces for tests and demos.

pub mod capture;
pub mod loader;
pub mod patterns;

pub use capture::{AnalyzerController, CaptureConfig};
pub use loader::parse_trace_csv;
pub use patterns::{synthetic_matrix, TraceGenerator, TracePattern};
