//! Voltage space: conversion and clamping between volts and a pixel axis.
//!
//! All public setters on thresholds and pixel-derived values route through
//! [`clip`] before conversion; this is the single place out-of-range input
//! is sanitized. Out-of-range voltages saturate, they never error.

use serde::{Deserialize, Serialize};

/// Logic low rail in volts.
pub const LOGIC_LEVEL_LO: f32 = 0.0;

/// Logic high rail in volts.
pub const LOGIC_LEVEL_HI: f32 = 5.0;

/// Clamp a voltage to the `[LOGIC_LEVEL_LO, LOGIC_LEVEL_HI]` rails.
///
/// Idempotent: `clip(clip(v)) == clip(v)`.
#[must_use]
pub fn clip(v: f32) -> f32 {
    v.clamp(LOGIC_LEVEL_LO, LOGIC_LEVEL_HI)
}

/// A strictly linear, invertible mapping between volts and a pixel range.
///
/// Horizontal axes grow with the pixel coordinate; vertical axes grow
/// against it (screen-space y increases downward while volts increase
/// upward). The mapping has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltAxis {
    /// Pixel coordinate of the start of the track.
    start: f32,
    /// Pixel length of the track; always positive.
    span: f32,
    /// Whether volts grow against the pixel coordinate.
    flipped: bool,
}

impl VoltAxis {
    /// Axis where volts grow with the pixel coordinate (plot x axis).
    #[must_use]
    pub fn horizontal(start: f32, span: f32) -> Self {
        debug_assert!(span > 0.0);
        Self {
            start,
            span,
            flipped: false,
        }
    }

    /// Axis where volts grow against the pixel coordinate (plot y axis).
    ///
    /// `start` is the pixel coordinate of the high rail (top of the plot).
    #[must_use]
    pub fn vertical(start: f32, span: f32) -> Self {
        debug_assert!(span > 0.0);
        Self {
            start,
            span,
            flipped: true,
        }
    }

    /// Pixel range covered by the track as `(min, max)`.
    #[must_use]
    pub fn pixel_range(&self) -> (f32, f32) {
        (self.start, self.start + self.span)
    }

    /// Map a voltage to a pixel coordinate, clipping to the rails first.
    #[must_use]
    pub fn volts_to_axis(&self, v: f32) -> f32 {
        let t = clip(v) / LOGIC_LEVEL_HI;
        if self.flipped {
            self.start + self.span * (1.0 - t)
        } else {
            self.start + self.span * t
        }
    }

    /// Map a pixel coordinate back to a voltage.
    ///
    /// The coordinate is clamped to the track range before conversion, so
    /// pointer positions outside the track can never produce a voltage
    /// outside the rails.
    #[must_use]
    pub fn axis_to_volts(&self, p: f32) -> f32 {
        let t = ((p - self.start) / self.span).clamp(0.0, 1.0);
        let t = if self.flipped { 1.0 - t } else { t };
        t * LOGIC_LEVEL_HI
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clip_saturates() {
        assert_eq!(clip(-1.0), 0.0);
        assert_eq!(clip(6.0), 5.0);
        assert_eq!(clip(2.5), 2.5);
    }

    #[test]
    fn test_horizontal_mapping() {
        let axis = VoltAxis::horizontal(50.0, 580.0);
        assert_eq!(axis.volts_to_axis(0.0), 50.0);
        assert_eq!(axis.volts_to_axis(5.0), 630.0);
        assert_eq!(axis.volts_to_axis(2.5), 340.0);
    }

    #[test]
    fn test_vertical_mapping_inverts_direction() {
        let axis = VoltAxis::vertical(50.0, 580.0);
        // High rail at the top of the plot
        assert_eq!(axis.volts_to_axis(5.0), 50.0);
        assert_eq!(axis.volts_to_axis(0.0), 630.0);
    }

    #[test]
    fn test_axis_to_volts_clamps_pixel_range() {
        let axis = VoltAxis::horizontal(50.0, 580.0);
        assert_eq!(axis.axis_to_volts(-1000.0), 0.0);
        assert_eq!(axis.axis_to_volts(10_000.0), 5.0);
    }

    #[test]
    fn test_volts_to_axis_clips_input() {
        let axis = VoltAxis::horizontal(0.0, 100.0);
        assert_eq!(axis.volts_to_axis(-3.0), 0.0);
        assert_eq!(axis.volts_to_axis(99.0), 100.0);
    }

    #[test]
    fn test_pixel_range() {
        let axis = VoltAxis::vertical(20.0, 580.0);
        assert_eq!(axis.pixel_range(), (20.0, 600.0));
    }

    proptest! {
        #[test]
        fn prop_round_trip_horizontal(v in 0.0f32..=5.0) {
            let axis = VoltAxis::horizontal(50.0, 580.0);
            let back = axis.axis_to_volts(axis.volts_to_axis(v));
            prop_assert!((back - v).abs() < 1e-4);
        }

        #[test]
        fn prop_round_trip_vertical(v in 0.0f32..=5.0) {
            let axis = VoltAxis::vertical(50.0, 580.0);
            let back = axis.axis_to_volts(axis.volts_to_axis(v));
            prop_assert!((back - v).abs() < 1e-4);
        }

        #[test]
        fn prop_clip_idempotent(v in -100.0f32..=100.0) {
            prop_assert_eq!(clip(clip(v)), clip(v));
        }

        #[test]
        fn prop_axis_to_volts_always_in_rails(p in -10_000.0f32..=10_000.0) {
            let axis = VoltAxis::horizontal(50.0, 580.0);
            let v = axis.axis_to_volts(p);
            prop_assert!((LOGIC_LEVEL_LO..=LOGIC_LEVEL_HI).contains(&v));
        }
    }
}
