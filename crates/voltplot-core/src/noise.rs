//! Bounded random noise paths for the tolerance diagram.
//!
//! A noise path is a jagged random walk pinned to a signal level, bounded
//! by a linear envelope that widens from zero to the full tolerance across
//! the walk. Generation is lazy and restartable: every traversal draws
//! fresh randomness from the caller's RNG, nothing is persisted.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default number of steps in a noise walk.
pub const DEFAULT_STEPS: usize = 35;

/// One sample of a noise path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoisePoint {
    /// Fractional position along the walk in `[0, 1]`.
    pub position: f32,
    /// Sampled voltage.
    pub volts: f32,
}

/// Which signal level a noise band is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NoiseBand {
    /// Noise riding on a low signal; spikes upward from `level`.
    Bottom {
        /// Anchor voltage (the low output level).
        level: f32,
    },
    /// Noise riding on a high signal; spikes downward from `level`.
    Top {
        /// Anchor voltage (the high output level).
        level: f32,
    },
}

impl NoiseBand {
    /// Anchor voltage of the band.
    #[must_use]
    pub const fn level(&self) -> f32 {
        match self {
            Self::Bottom { level } | Self::Top { level } => *level,
        }
    }
}

/// Generator for bounded noise walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseSampler {
    steps: usize,
}

impl Default for NoiseSampler {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
        }
    }
}

impl NoiseSampler {
    /// Create a sampler producing `steps + 1` points per walk.
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self {
            steps: steps.max(1),
        }
    }

    /// Number of steps per walk.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Start a fresh walk over `band` with the given tolerance.
    ///
    /// The first point is pinned at the anchor level; subsequent points are
    /// uniform between the anchor and the linear envelope. A negative
    /// tolerance (transiently possible mid-repair) is treated as zero.
    pub fn walk<'r, R: Rng>(
        &self,
        band: NoiseBand,
        tolerance: f32,
        rng: &'r mut R,
    ) -> NoiseWalk<'r, R> {
        NoiseWalk {
            band,
            tolerance: tolerance.max(0.0),
            steps: self.steps,
            index: 0,
            rng,
        }
    }
}

/// Iterator over one noise walk. See [`NoiseSampler::walk`].
pub struct NoiseWalk<'r, R: Rng> {
    band: NoiseBand,
    tolerance: f32,
    steps: usize,
    index: usize,
    rng: &'r mut R,
}

impl<R: Rng> Iterator for NoiseWalk<'_, R> {
    type Item = NoisePoint;

    fn next(&mut self) -> Option<NoisePoint> {
        if self.index > self.steps {
            return None;
        }
        let position = self.index as f32 / self.steps as f32;
        let reach = self.tolerance * position;
        let volts = if self.index == 0 || reach <= 0.0 {
            self.band.level()
        } else {
            match self.band {
                NoiseBand::Bottom { level } => self.rng.gen_range(level..=level + reach),
                NoiseBand::Top { level } => self.rng.gen_range(level - reach..=level),
            }
        };
        self.index += 1;
        Some(NoisePoint { position, volts })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps + 1 - self.index;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_walk_length_and_pinned_start() {
        let sampler = NoiseSampler::default();
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<_> = sampler
            .walk(NoiseBand::Bottom { level: 1.0 }, 0.5, &mut rng)
            .collect();
        assert_eq!(points.len(), DEFAULT_STEPS + 1);
        assert_eq!(points[0].volts, 1.0);
        assert_eq!(points[0].position, 0.0);
        assert_eq!(points.last().unwrap().position, 1.0);
    }

    #[test]
    fn test_bottom_band_bounds() {
        let sampler = NoiseSampler::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            for p in sampler.walk(NoiseBand::Bottom { level: 1.0 }, 0.75, &mut rng) {
                assert!(p.volts >= 1.0, "below anchor: {}", p.volts);
                assert!(p.volts <= 1.75 + 1e-6, "above tolerance: {}", p.volts);
            }
        }
    }

    #[test]
    fn test_top_band_bounds_mirrored() {
        let sampler = NoiseSampler::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            for p in sampler.walk(NoiseBand::Top { level: 4.0 }, 0.75, &mut rng) {
                assert!(p.volts <= 4.0, "above anchor: {}", p.volts);
                assert!(p.volts >= 3.25 - 1e-6, "below tolerance: {}", p.volts);
            }
        }
    }

    #[test]
    fn test_envelope_limits_early_steps() {
        let sampler = NoiseSampler::new(10);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let points: Vec<_> = sampler
                .walk(NoiseBand::Bottom { level: 0.0 }, 1.0, &mut rng)
                .collect();
            // Step i may reach at most tolerance * i / steps
            for (i, p) in points.iter().enumerate() {
                let reach = i as f32 / 10.0;
                assert!(p.volts <= reach + 1e-6);
            }
        }
    }

    #[test]
    fn test_zero_and_negative_tolerance_stay_flat() {
        let sampler = NoiseSampler::default();
        let mut rng = StdRng::seed_from_u64(9);
        for tol in [0.0, -1.0] {
            assert!(sampler
                .walk(NoiseBand::Top { level: 2.0 }, tol, &mut rng)
                .all(|p| p.volts == 2.0));
        }
    }

    #[test]
    fn test_walks_are_fresh_per_call() {
        let sampler = NoiseSampler::default();
        let mut rng = StdRng::seed_from_u64(1);
        let a: Vec<_> = sampler
            .walk(NoiseBand::Bottom { level: 1.0 }, 1.0, &mut rng)
            .collect();
        let b: Vec<_> = sampler
            .walk(NoiseBand::Bottom { level: 1.0 }, 1.0, &mut rng)
            .collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_size_hint() {
        let sampler = NoiseSampler::new(35);
        let mut rng = StdRng::seed_from_u64(5);
        let walk = sampler.walk(NoiseBand::Bottom { level: 0.0 }, 1.0, &mut rng);
        assert_eq!(walk.size_hint(), (36, Some(36)));
    }
}
