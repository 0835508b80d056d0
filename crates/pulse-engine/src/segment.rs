//! Pulse segmentation: pairing edges into (start, end, width) records

use serde::{Deserialize, Serialize};

/// One complete pulse, bounded by two edges of the filtered series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseRecord {
    /// Edge index opening the pulse
    pub start: usize,
    /// Edge index closing the pulse
    pub end: usize,
    /// Sample-index distance between the bounding edges
    pub width: usize,
}

/// Pair consecutive edges into pulse records.
///
/// A channel that started idle pairs `(e0, e1), (e2, e3), ...`. A channel
/// that started mid-pulse treats its first edge as the close of a pulse cut
/// off by the window and pairs `(e1, e2), (e3, e4), ...` instead. An
/// unmatched trailing edge is an incomplete pulse at the end of the window
/// and is dropped, never reported.
pub fn segment_pulses(edge_indices: &[usize], started_mid_pulse: bool) -> Vec<PulseRecord> {
    let points = if started_mid_pulse {
        edge_indices.get(1..).unwrap_or(&[])
    } else {
        edge_indices
    };

    points
        .chunks_exact(2)
        .map(|pair| PulseRecord {
            start: pair[0],
            end: pair[1],
            width: pair[1] - pair[0],
        })
        .collect()
}
