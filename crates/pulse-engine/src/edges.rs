//! Edge detection over filtered channel series
//!
//! An edge is a nonzero first difference between neighboring samples: +1 for
//! a rising transition into high, -1 for a falling transition into low. Edge
//! positions index the filtered series, not the raw capture.

/// First-difference series of a filtered {0, 1} channel.
///
/// Output length is `series.len() - 1`; empty and single-sample inputs yield
/// an empty series.
pub fn first_difference(series: &[u8]) -> Vec<i8> {
    if series.len() < 2 {
        return Vec::new();
    }
    series
        .windows(2)
        .map(|pair| pair[1] as i8 - pair[0] as i8)
        .collect()
}

/// Indices of all nonzero entries of a first-difference series
pub fn edge_indices(pivots: &[i8]) -> Vec<usize> {
    pivots
        .iter()
        .enumerate()
        .filter(|(_, &p)| p != 0)
        .map(|(i, _)| i)
        .collect()
}
