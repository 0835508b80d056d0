//! PulseAnalyzer: per-channel pulse extraction over one capture
//!
//! The analyzer is constructed once from a captured matrix and is read-only
//! afterwards; every derived structure is recomputed wholesale from the raw
//! capture, never updated incrementally. Channels are independent, so the
//! engine offers both a sequential pass and a task-per-channel fan-out that
//! must produce identical results.

use crate::config::EngineConfig;
use crate::denoise::median_filter;
use crate::edges::{edge_indices, first_difference};
use crate::polarity::{is_rising_signal, starts_mid_pulse};
use crate::segment::{segment_pulses, PulseRecord};
use pulse_core::{PulseError, PulseResult, SampleMatrix};
use serde::Serialize;
use tracing::debug;

/// Everything the pipeline derives for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAnalysis {
    /// Denoised levels, same length as the raw channel
    pub filtered: Vec<u8>,
    /// First-difference series over the filtered levels
    pub pivots: Vec<i8>,
    /// Start-polarity classification for the observation window
    pub started_mid_pulse: bool,
    /// Whether the channel carries rising pulses
    pub rising: bool,
    /// Complete pulses in temporal order
    pub pulses: Vec<PulseRecord>,
}

impl ChannelAnalysis {
    /// Run the four pipeline stages over one channel.
    ///
    /// An empty channel short-circuits to the empty analysis; a non-empty
    /// channel shorter than the filter window is a channel-scoped error.
    pub fn compute(levels: &[u8], window: usize) -> PulseResult<Self> {
        if levels.is_empty() {
            return Ok(ChannelAnalysis {
                filtered: Vec::new(),
                pivots: Vec::new(),
                started_mid_pulse: false,
                rising: false,
                pulses: Vec::new(),
            });
        }

        let filtered = median_filter(levels, window)?;
        let pivots = first_difference(&filtered);
        let edges = edge_indices(&pivots);
        let started_mid_pulse = starts_mid_pulse(&edges);
        let rising = is_rising_signal(&pivots, started_mid_pulse);
        let pulses = segment_pulses(&edges, started_mid_pulse);

        Ok(ChannelAnalysis {
            filtered,
            pivots,
            started_mid_pulse,
            rising,
            pulses,
        })
    }

    /// Number of complete pulses
    pub fn pulse_count(&self) -> usize {
        self.pulses.len()
    }

    /// (start, end) edge-index pairs, one per pulse
    pub fn pulse_points(&self) -> Vec<(usize, usize)> {
        self.pulses.iter().map(|p| (p.start, p.end)).collect()
    }

    /// Pulse widths in sample indices, one per pulse
    pub fn pulse_widths(&self) -> Vec<usize> {
        self.pulses.iter().map(|p| p.width).collect()
    }
}

/// Outcome of processing one channel, keyed by its capture name
#[derive(Debug, Clone)]
pub struct ChannelReport {
    /// Channel name, in capture column order
    pub name: String,
    /// Analysis or the channel-scoped error that stopped it
    pub outcome: PulseResult<ChannelAnalysis>,
}

/// Flat per-channel summary for reports and JSON export
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub pulse_count: usize,
    pub rising: bool,
    pub widths: Vec<usize>,
    /// Present when the channel failed to process
    pub error: Option<String>,
}

/// Pulse-extraction results for a whole capture
#[derive(Debug, Clone)]
pub struct PulseAnalyzer {
    channels: Vec<ChannelReport>,
}

impl PulseAnalyzer {
    /// Process every channel of a capture sequentially.
    ///
    /// A failing channel is recorded in its report slot and never aborts its
    /// siblings.
    pub fn analyze(matrix: &SampleMatrix, config: &EngineConfig) -> Self {
        let channels = matrix
            .channels()
            .map(|ch| ChannelReport {
                name: ch.name.clone(),
                outcome: ChannelAnalysis::compute(&ch.levels, config.filter_window),
            })
            .collect();

        debug!(
            channels = matrix.channel_count(),
            samples = matrix.sample_count(),
            window = config.filter_window,
            "capture analyzed"
        );
        PulseAnalyzer { channels }
    }

    /// Process channels concurrently, one blocking task per channel.
    ///
    /// The stages are pure and channel-local, so no synchronization is needed
    /// beyond the join barrier; results are identical to [`Self::analyze`].
    pub async fn analyze_parallel(matrix: &SampleMatrix, config: &EngineConfig) -> Self {
        let window = config.filter_window;
        let mut tasks = tokio::task::JoinSet::new();

        for (idx, ch) in matrix.channels().enumerate() {
            let levels = ch.levels.clone();
            tasks.spawn_blocking(move || (idx, ChannelAnalysis::compute(&levels, window)));
        }

        let mut slots: Vec<Option<PulseResult<ChannelAnalysis>>> =
            (0..matrix.channel_count()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            if let Ok((idx, outcome)) = joined {
                slots[idx] = Some(outcome);
            }
        }

        let channels = matrix
            .channels()
            .zip(slots)
            .map(|(ch, slot)| ChannelReport {
                name: ch.name.clone(),
                outcome: slot.unwrap_or_else(|| {
                    Err(PulseError::ProcessingError {
                        message: format!("worker for channel '{}' terminated abnormally", ch.name),
                    })
                }),
            })
            .collect();

        PulseAnalyzer { channels }
    }

    /// Per-channel reports in capture column order
    pub fn reports(&self) -> &[ChannelReport] {
        &self.channels
    }

    /// Analysis of one channel looked up by name.
    ///
    /// Returns the stored channel error if that channel failed to process.
    pub fn channel(&self, name: &str) -> PulseResult<&ChannelAnalysis> {
        let report = self
            .channels
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| PulseError::ChannelNotFound { name: name.to_string() })?;
        report.outcome.as_ref().map_err(|e| e.clone())
    }

    /// Pulse counts per channel; a failed channel counts zero
    pub fn pulse_counts(&self) -> Vec<(&str, usize)> {
        self.channels
            .iter()
            .map(|r| {
                let count = r.outcome.as_ref().map(|a| a.pulse_count()).unwrap_or(0);
                (r.name.as_str(), count)
            })
            .collect()
    }

    /// (start, end) pulse views per channel; empty for failed channels
    pub fn pulse_points(&self) -> Vec<(&str, Vec<(usize, usize)>)> {
        self.channels
            .iter()
            .map(|r| {
                let points = r.outcome.as_ref().map(|a| a.pulse_points()).unwrap_or_default();
                (r.name.as_str(), points)
            })
            .collect()
    }

    /// Width-only pulse views per channel; empty for failed channels
    pub fn pulse_widths(&self) -> Vec<(&str, Vec<usize>)> {
        self.channels
            .iter()
            .map(|r| {
                let widths = r.outcome.as_ref().map(|a| a.pulse_widths()).unwrap_or_default();
                (r.name.as_str(), widths)
            })
            .collect()
    }

    /// Rising-pulse classification per channel; false for failed channels
    pub fn rising_signals(&self) -> Vec<(&str, bool)> {
        self.channels
            .iter()
            .map(|r| {
                let rising = r.outcome.as_ref().map(|a| a.rising).unwrap_or(false);
                (r.name.as_str(), rising)
            })
            .collect()
    }

    /// Denoised series per channel for plotting; empty for failed channels
    pub fn filtered_series(&self) -> Vec<(&str, &[u8])> {
        self.channels
            .iter()
            .map(|r| {
                let filtered = r
                    .outcome
                    .as_ref()
                    .map(|a| a.filtered.as_slice())
                    .unwrap_or(&[]);
                (r.name.as_str(), filtered)
            })
            .collect()
    }

    /// Channels that failed to process, with their errors
    pub fn failures(&self) -> Vec<(&str, &PulseError)> {
        self.channels
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|e| (r.name.as_str(), e)))
            .collect()
    }

    /// Flat summaries for console output and JSON export
    pub fn summaries(&self) -> Vec<ChannelSummary> {
        self.channels
            .iter()
            .map(|r| match &r.outcome {
                Ok(a) => ChannelSummary {
                    name: r.name.clone(),
                    pulse_count: a.pulse_count(),
                    rising: a.rising,
                    widths: a.pulse_widths(),
                    error: None,
                },
                Err(e) => ChannelSummary {
                    name: r.name.clone(),
                    pulse_count: 0,
                    rising: false,
                    widths: Vec::new(),
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }
}
