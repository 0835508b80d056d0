//! Start-polarity resolution for a channel's observation window
//!
//! Whether the capture window opened inside an active pulse is not directly
//! observable. It is inferred from the gaps between successive edges: with
//! pulses and idle intervals of distinguishable widths, the alternating gap
//! sums reveal which edge kind opens a pulse and which one closes it. This is
//! a duty-cycle heuristic, not a proof; near 50% duty it can misclassify, and
//! downstream consumers depend on this exact tie-break.

/// Classify whether the window began inside an already-open pulse.
///
/// Gaps are the differences between successive edge indices. A strictly
/// smaller sum of the gaps at even positions (0, 2, 4, ...) than at odd
/// positions classifies the channel as started mid-pulse; equal sums count as
/// started idle. Fewer than two edges always classify as started idle.
pub fn starts_mid_pulse(edge_indices: &[usize]) -> bool {
    let mut even_sum = 0usize;
    let mut odd_sum = 0usize;

    for (pos, pair) in edge_indices.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if pos % 2 == 0 {
            even_sum += gap;
        } else {
            odd_sum += gap;
        }
    }

    even_sum < odd_sum
}

/// Whether the channel carries rising (active-high) pulses.
///
/// A channel started idle opens its first pulse with its first edge, so the
/// pulses are rising exactly when that edge is rising. A channel started
/// mid-pulse closes a pulse with its first edge, which inverts the reading.
/// A channel with no edges reports `false`.
pub fn is_rising_signal(pivots: &[i8], started_mid_pulse: bool) -> bool {
    let first_edge_is_rising = match pivots.iter().find(|&&p| p != 0) {
        Some(&p) => p > 0,
        None => return false,
    };
    first_edge_is_rising ^ started_mid_pulse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_sum_classification() {
        // gaps [3, 4, 5, 6]: even positions 3+5=8, odd positions 4+6=10
        assert!(starts_mid_pulse(&[2, 5, 9, 14, 20]));
    }

    #[test]
    fn test_wider_even_gaps_classify_idle() {
        // gaps [12, 8, 12, 8]: even sum 24 > odd sum 16
        assert!(!starts_mid_pulse(&[0, 12, 20, 32, 40]));
    }

    #[test]
    fn test_equal_sums_classify_idle() {
        // gaps [5, 5]: 5 < 5 is false
        assert!(!starts_mid_pulse(&[3, 8, 13]));
    }

    #[test]
    fn test_few_edges_classify_idle() {
        assert!(!starts_mid_pulse(&[]));
        assert!(!starts_mid_pulse(&[7]));
        // single gap lands on an even position, odd sum stays zero
        assert!(!starts_mid_pulse(&[7, 19]));
    }

    #[test]
    fn test_rising_from_idle_start() {
        let pivots = [0i8, 1, 0, -1, 0];
        assert!(is_rising_signal(&pivots, false));
        assert!(!is_rising_signal(&pivots, true));
    }

    #[test]
    fn test_rising_from_mid_pulse_start() {
        // First edge falls: it closes a high pulse cut off by the window
        let pivots = [0i8, -1, 0, 1, 0, -1];
        assert!(is_rising_signal(&pivots, true));
        assert!(!is_rising_signal(&pivots, false));
    }

    #[test]
    fn test_no_edges_reports_not_rising() {
        assert!(!is_rising_signal(&[0i8, 0, 0], false));
        assert!(!is_rising_signal(&[], true));
    }
}
