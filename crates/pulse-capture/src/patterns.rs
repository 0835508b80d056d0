//! Synthetic trace patterns for tests and demos
//!
//! Generates binary channel series shaped like real analyzer captures,
//! optionally corrupted with isolated glitch samples the denoiser is
//! expected to remove.

use pulse_core::{PulseResult, SampleMatrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Predefined binary trace shapes
#[derive(Debug, Clone, Copy)]
pub enum TracePattern {
    /// Constant logic level
    Constant { level: u8 },
    /// Periodic pulses: `high` samples on, `low` samples off, shifted by
    /// `phase` samples into the cycle
    Square { high: usize, low: usize, phase: usize },
    /// Groups of narrow pulses separated by long idle stretches
    Burst {
        pulse_width: usize,
        pulse_gap: usize,
        pulses_per_burst: usize,
        idle: usize,
    },
}

impl TracePattern {
    /// Logic level at a given sample index
    pub fn level_at(&self, index: usize) -> u8 {
        match self {
            TracePattern::Constant { level } => u8::from(*level != 0),

            TracePattern::Square { high, low, phase } => {
                let period = high + low;
                if period == 0 {
                    return 0;
                }
                let pos = (index + phase) % period;
                u8::from(pos < *high)
            }

            TracePattern::Burst { pulse_width, pulse_gap, pulses_per_burst, idle } => {
                let burst_len = pulses_per_burst * (pulse_width + pulse_gap);
                let cycle = burst_len + idle;
                if cycle == 0 {
                    return 0;
                }
                let pos = index % cycle;
                if pos >= burst_len {
                    return 0;
                }
                u8::from(pos % (pulse_width + pulse_gap) < *pulse_width)
            }
        }
    }

    /// Render the clean pattern over `samples` indices
    pub fn generate(&self, samples: usize) -> Vec<u8> {
        (0..samples).map(|i| self.level_at(i)).collect()
    }
}

/// Pattern renderer with seeded single-sample glitch injection
pub struct TraceGenerator {
    pattern: TracePattern,
    glitch_probability: f64,
    rng: StdRng,
}

impl TraceGenerator {
    pub fn new(pattern: TracePattern, glitch_probability: f64, seed: u64) -> Self {
        TraceGenerator {
            pattern,
            glitch_probability: glitch_probability.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Render `samples` levels, flipping isolated samples at the configured
    /// probability. Flipped neighbors stay untouched so glitches remain one
    /// sample wide.
    pub fn generate(&mut self, samples: usize) -> Vec<u8> {
        let mut levels = self.pattern.generate(samples);
        let mut last_flip: Option<usize> = None;

        for i in 0..levels.len() {
            let adjacent = matches!(last_flip, Some(j) if i - j <= 1);
            if !adjacent && self.rng.gen::<f64>() < self.glitch_probability {
                levels[i] ^= 1;
                last_flip = Some(i);
            }
        }
        levels
    }
}

/// Build a multi-channel capture from one pattern per channel
pub fn synthetic_matrix(
    patterns: Vec<(String, TracePattern)>,
    samples: usize,
    glitch_probability: f64,
    seed: u64,
) -> PulseResult<SampleMatrix> {
    let columns = patterns
        .into_iter()
        .enumerate()
        .map(|(idx, (name, pattern))| {
            let mut generator =
                TraceGenerator::new(pattern, glitch_probability, seed.wrapping_add(idx as u64));
            (name, generator.generate(samples))
        })
        .collect();
    SampleMatrix::from_columns(columns)
}
