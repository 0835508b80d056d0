//! SampleMatrix: container for one multi-channel logic capture
//!
//! Rows are time-ordered samples, columns are named channels. Cell values are
//! normalized to {0, 1} at construction: anything nonzero is a logic high.
//! The matrix is validated once and read-only afterwards.

use crate::error::{PulseError, PulseResult};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One named binary channel of a capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSeries {
    /// Channel name as reported by the acquisition source
    pub name: String,
    /// Logic levels, one per sample, each 0 or 1
    pub levels: Vec<u8>,
}

/// Rectangular multi-channel capture with stable column order
#[derive(Debug, Clone)]
pub struct SampleMatrix {
    /// Unique identifier for this capture
    pub id: Uuid,
    /// Capture creation time (epoch milliseconds)
    pub created_at: u64,
    channels: Vec<ChannelSeries>,
    sample_count: usize,
}

impl SampleMatrix {
    /// Build a matrix from per-channel columns.
    ///
    /// All columns must have the same length. Cells are reduced to logic
    /// levels with a zero test, so any numeric cell type works.
    pub fn from_columns<T: Zero>(columns: Vec<(String, Vec<T>)>) -> PulseResult<Self> {
        let sample_count = columns.first().map(|(_, v)| v.len()).unwrap_or(0);

        let mut channels = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != sample_count {
                return Err(PulseError::ShapeMismatch {
                    label: name,
                    expected: sample_count,
                    actual: values.len(),
                });
            }
            let levels = values
                .iter()
                .map(|v| u8::from(!v.is_zero()))
                .collect();
            channels.push(ChannelSeries { name, levels });
        }

        Ok(SampleMatrix {
            id: Uuid::new_v4(),
            created_at: epoch_millis(),
            channels,
            sample_count,
        })
    }

    /// Build a matrix from time-ordered rows under a header of channel names.
    ///
    /// Every row must have exactly one cell per channel; a ragged row fails
    /// the whole construction before any processing can run.
    pub fn from_rows<T: Zero>(names: Vec<String>, rows: Vec<Vec<T>>) -> PulseResult<Self> {
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != names.len() {
                return Err(PulseError::ShapeMismatch {
                    label: format!("row {}", row_idx),
                    expected: names.len(),
                    actual: row.len(),
                });
            }
        }

        let sample_count = rows.len();
        let channels = names
            .into_iter()
            .enumerate()
            .map(|(col, name)| ChannelSeries {
                name,
                levels: rows.iter().map(|row| u8::from(!row[col].is_zero())).collect(),
            })
            .collect();

        Ok(SampleMatrix {
            id: Uuid::new_v4(),
            created_at: epoch_millis(),
            channels,
            sample_count,
        })
    }

    /// Number of channels (columns)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel (rows)
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// True when the capture holds no samples or no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() || self.sample_count == 0
    }

    /// Channel names in capture column order
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name.as_str()).collect()
    }

    /// Iterate channels in capture column order
    pub fn channels(&self) -> impl Iterator<Item = &ChannelSeries> {
        self.channels.iter()
    }

    /// Levels of a channel looked up by name
    pub fn channel(&self, name: &str) -> PulseResult<&[u8]> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.levels.as_slice())
            .ok_or_else(|| PulseError::ChannelNotFound { name: name.to_string() })
    }
}

fn epoch_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
