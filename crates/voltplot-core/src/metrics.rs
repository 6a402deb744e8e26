//! Quantities derived from the threshold set.
//!
//! Everything here is a pure function of a [`ThresholdValues`] snapshot;
//! derived metrics have no identity of their own and are recomputed
//! whenever a threshold changes.

use crate::threshold::ThresholdValues;
use crate::volts::{LOGIC_LEVEL_HI, LOGIC_LEVEL_LO};
use serde::{Deserialize, Serialize};

/// A closed voltage interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Lower bound in volts.
    pub lo: f32,
    /// Upper bound in volts.
    pub hi: f32,
}

impl Band {
    /// Create a band.
    #[must_use]
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    /// Width of the band in volts.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.hi - self.lo
    }

    /// Whether a voltage lies inside the band (inclusive).
    #[must_use]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Which noise band currently limits the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToleranceSide {
    /// High-signal band (`Voh - Vih` is the smaller gap).
    Top,
    /// Low-signal band (`Vil - Vol` is the smaller gap).
    Bottom,
}

/// Noise margins and forbidden zones for one threshold snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Input voltages read as logic 0: `[0, Vil]`.
    pub forbidden_low: Band,
    /// Input voltages read as logic 1: `[Vih, 5]`.
    pub forbidden_high: Band,
    /// Output swing `[Vol, Voh]` bounding both zones on the other axis.
    pub output_band: Band,
    /// `Voh - Vih`.
    pub margin_top: f32,
    /// `Vil - Vol`.
    pub margin_bottom: f32,
    /// The noise margin: the smaller of the two gaps.
    pub tolerance: f32,
    /// Which band produced the margin; ties favor Top.
    pub side: ToleranceSide,
}

impl DerivedMetrics {
    /// Compute all derived quantities from a threshold snapshot.
    #[must_use]
    pub fn from_thresholds(v: &ThresholdValues) -> Self {
        let margin_top = v.voh - v.vih;
        let margin_bottom = v.vil - v.vol;
        let side = if margin_top <= margin_bottom {
            ToleranceSide::Top
        } else {
            ToleranceSide::Bottom
        };
        Self {
            forbidden_low: Band::new(LOGIC_LEVEL_LO, v.vil),
            forbidden_high: Band::new(v.vih, LOGIC_LEVEL_HI),
            output_band: Band::new(v.vol, v.voh),
            margin_top,
            margin_bottom,
            tolerance: margin_top.min(margin_bottom),
            side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::ThresholdSet;

    fn metrics(vol: f32, vil: f32, vih: f32, voh: f32) -> DerivedMetrics {
        let set = ThresholdSet::new(vol, vil, vih, voh);
        DerivedMetrics::from_thresholds(&set.values())
    }

    #[test]
    fn test_margins_symmetric_case() {
        let m = metrics(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.margin_top, 1.0);
        assert_eq!(m.margin_bottom, 1.0);
        assert_eq!(m.tolerance, 1.0);
        // Tie favors Top
        assert_eq!(m.side, ToleranceSide::Top);
    }

    #[test]
    fn test_bottom_side_when_smaller() {
        let m = metrics(1.0, 1.5, 3.0, 4.5);
        assert_eq!(m.margin_bottom, 0.5);
        assert_eq!(m.margin_top, 1.5);
        assert_eq!(m.tolerance, 0.5);
        assert_eq!(m.side, ToleranceSide::Bottom);
    }

    #[test]
    fn test_top_side_when_smaller() {
        let m = metrics(0.5, 2.0, 3.8, 4.0);
        assert_eq!(m.side, ToleranceSide::Top);
        assert!((m.tolerance - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_forbidden_zones_span_rails() {
        let m = metrics(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.forbidden_low, Band::new(0.0, 2.0));
        assert_eq!(m.forbidden_high, Band::new(3.0, 5.0));
        assert_eq!(m.output_band, Band::new(1.0, 4.0));
    }

    #[test]
    fn test_band_helpers() {
        let b = Band::new(1.0, 4.0);
        assert_eq!(b.width(), 3.0);
        assert!(b.contains(1.0));
        assert!(b.contains(4.0));
        assert!(!b.contains(4.1));
    }
}
