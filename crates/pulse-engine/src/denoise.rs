//! Sliding-window median filter for binary channel series
//!
//! Suppresses isolated acquisition glitches while leaving real logic
//! transitions intact, provided true pulses span more than half the window.

use pulse_core::{PulseError, PulseResult};

/// Apply a centered median filter of odd width `window` to a {0, 1} series.
///
/// The window is zero-padded past both ends, so the first and last
/// `window / 2` outputs see implicit low samples beyond the capture. Output
/// length always equals input length.
///
/// Fails when `window` is zero, even, or larger than the series.
pub fn median_filter(series: &[u8], window: usize) -> PulseResult<Vec<u8>> {
    if window == 0 || window % 2 == 0 {
        return Err(PulseError::InvalidFilterWindow {
            window,
            samples: series.len(),
            reason: "window must be a positive odd integer",
        });
    }
    if window > series.len() {
        return Err(PulseError::InvalidFilterWindow {
            window,
            samples: series.len(),
            reason: "window exceeds series length",
        });
    }

    let half = window / 2;
    let mut filtered = Vec::with_capacity(series.len());

    for i in 0..series.len() {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(series.len());
        // Samples outside [lo, hi) are the zero padding, so the median of the
        // window is high exactly when ones form a strict majority of it.
        let ones: usize = series[lo..hi].iter().map(|&v| v as usize).sum();
        filtered.push(u8::from(ones > window / 2));
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_high_is_idempotent() {
        // Even at the padded boundaries a strict majority of the window is
        // real ones, so a constant-high series passes through untouched
        for window in [1, 3, 5, 7, 9] {
            let series = vec![1u8; 50];
            let filtered = median_filter(&series, window).unwrap();
            assert_eq!(filtered, series, "window {}", window);
        }
    }

    #[test]
    fn test_constant_low_is_idempotent() {
        let series = vec![0u8; 30];
        let filtered = median_filter(&series, 7).unwrap();
        assert_eq!(filtered, series);
    }

    #[test]
    fn test_single_sample_glitch_removed() {
        let mut series = vec![0u8; 21];
        series[10] = 1;
        let filtered = median_filter(&series, 3).unwrap();
        assert_eq!(filtered, vec![0u8; 21]);
    }

    #[test]
    fn test_dropout_inside_pulse_repaired() {
        // A one-sample low glitch inside a wide high pulse
        let mut series = vec![0u8; 4];
        series.extend(vec![1u8; 12]);
        series.extend(vec![0u8; 4]);
        let mut noisy = series.clone();
        noisy[9] = 0;

        let filtered = median_filter(&noisy, 3).unwrap();
        assert_eq!(filtered, series);
    }

    #[test]
    fn test_wide_pulse_survives() {
        let mut series = vec![0u8; 10];
        series.extend(vec![1u8; 10]);
        series.extend(vec![0u8; 10]);
        let filtered = median_filter(&series, 5).unwrap();
        assert_eq!(filtered, series);
    }

    #[test]
    fn test_zero_padding_at_boundaries() {
        // High at both ends: padding zeros outvote the edge samples for W=5
        let series = vec![1u8; 4];
        let result = median_filter(&series, 5);
        assert!(result.is_err()); // window exceeds length here

        let series = vec![1u8; 5];
        let filtered = median_filter(&series, 5).unwrap();
        // index 0 sees [pad, pad, 1, 1, 1] -> 3 ones of 5 -> high
        // index 1 sees [pad, 1, 1, 1, 1] -> high
        assert_eq!(filtered, vec![1, 1, 1, 1, 1]);

        let series = vec![1u8, 1, 0, 0, 0];
        let filtered = median_filter(&series, 5).unwrap();
        // index 0 sees [pad, pad, 1, 1, 0] -> 2 ones of 5 -> low
        assert_eq!(filtered[0], 0);
    }

    #[test]
    fn test_even_window_rejected() {
        let err = median_filter(&[0, 1, 0, 1], 2).unwrap_err();
        assert!(matches!(err, PulseError::InvalidFilterWindow { window: 2, .. }));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(median_filter(&[0, 1], 0).is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let err = median_filter(&[0, 1, 0], 5).unwrap_err();
        match err {
            PulseError::InvalidFilterWindow { window, samples, .. } => {
                assert_eq!(window, 5);
                assert_eq!(samples, 3);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_window_one_is_identity() {
        let series = vec![0u8, 1, 1, 0, 1];
        assert_eq!(median_filter(&series, 1).unwrap(), series);
    }
}
