//! Error handling for the pulse-extraction workspace
//!
//! Channel-scoped failures are represented as values so that one malformed
//! channel never aborts the processing of its siblings.

use core::fmt;

/// Result type alias for pulse-extraction operations
pub type PulseResult<T> = Result<T, PulseError>;

/// Error type for capture validation and per-channel processing
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PulseError {
    /// Median filter window is unusable for a channel
    InvalidFilterWindow {
        /// Requested window size
        window: usize,
        /// Length of the channel the window was applied to
        samples: usize,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// A capture row or column does not match the matrix shape
    ShapeMismatch {
        /// Channel (or row) that broke the shape
        label: String,
        /// Expected cell count
        expected: usize,
        /// Actual cell count
        actual: usize,
    },

    /// Invalid engine or capture configuration
    ConfigurationError {
        /// Description of the configuration problem
        message: String,
    },

    /// A processing worker failed outside the pure pipeline
    ProcessingError {
        /// Description of the failure
        message: String,
    },

    /// Lookup of a channel name that is not in the capture
    ChannelNotFound {
        /// Requested channel name
        name: String,
    },
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PulseError::InvalidFilterWindow { window, samples, reason } => {
                write!(
                    f,
                    "Invalid filter window {} for {} samples: {}",
                    window, samples, reason
                )
            }
            PulseError::ShapeMismatch { label, expected, actual } => {
                write!(
                    f,
                    "Shape mismatch at '{}': expected {} cells, got {}",
                    label, expected, actual
                )
            }
            PulseError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            PulseError::ProcessingError { message } => {
                write!(f, "Processing error: {}", message)
            }
            PulseError::ChannelNotFound { name } => {
                write!(f, "Channel '{}' not found in capture", name)
            }
        }
    }
}

impl std::error::Error for PulseError {}
