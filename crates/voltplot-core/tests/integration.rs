//! Integration tests for voltplot-core.
//!
//! These tests verify the public API works correctly end-to-end: the
//! threshold repair cascade feeding derived metrics feeding noise walks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use voltplot_core::{
    clip, Band, Color, DerivedMetrics, NoiseBand, NoiseSampler, Point, Rect, Threshold,
    ThresholdSet, ToleranceSide, VoltAxis, NUDGE,
};

// =============================================================================
// Threshold -> Metrics Pipeline
// =============================================================================

#[test]
fn test_drag_pipeline_updates_metrics() {
    let mut set = ThresholdSet::default();
    let before = DerivedMetrics::from_thresholds(&set.values());
    assert_eq!(before.tolerance, 1.0);

    // Dragging Vih up shrinks the top margin
    set.set_active(Threshold::Vih);
    set.set_value(Threshold::Vih, 3.8);
    let after = DerivedMetrics::from_thresholds(&set.values());
    assert!((after.margin_top - 0.2).abs() < 1e-6);
    assert_eq!(after.side, ToleranceSide::Top);
    assert!(after.tolerance < before.tolerance);
}

#[test]
fn test_cascade_keeps_metrics_nonnegative_after_settle() {
    let mut set = ThresholdSet::default();
    set.set_active(Threshold::Voh);
    // Crush everything down to the low rail
    set.set_value(Threshold::Voh, 0.0);
    while set.repair() {}

    assert!(set.is_ordered());
    let m = DerivedMetrics::from_thresholds(&set.values());
    assert!(m.margin_top >= 0.0);
    assert!(m.margin_bottom >= 0.0);
    assert!(m.tolerance >= 0.0);
}

#[test]
fn test_forbidden_zones_track_thresholds() {
    let mut set = ThresholdSet::default();
    set.set_value(Threshold::Vil, 1.5);
    set.set_value(Threshold::Vih, 3.5);

    let m = DerivedMetrics::from_thresholds(&set.values());
    assert_eq!(m.forbidden_low, Band::new(0.0, 1.5));
    assert_eq!(m.forbidden_high, Band::new(3.5, 5.0));
    assert!(m.forbidden_low.contains(0.0));
    assert!(!m.forbidden_low.contains(1.6));
}

// =============================================================================
// Metrics -> Noise Pipeline
// =============================================================================

#[test]
fn test_noise_walk_respects_live_tolerance() {
    let mut set = ThresholdSet::default();
    set.set_value(Threshold::Vil, 1.25);
    let m = DerivedMetrics::from_thresholds(&set.values());
    assert!((m.tolerance - 0.25).abs() < 1e-6);

    let sampler = NoiseSampler::default();
    let mut rng = StdRng::seed_from_u64(11);
    let level = set.get(Threshold::Vol);
    for p in sampler.walk(NoiseBand::Bottom { level }, m.tolerance, &mut rng) {
        assert!(p.volts >= level);
        assert!(p.volts <= level + m.tolerance + 1e-6);
        // A noisy low signal must never cross into the high input region
        assert!(p.volts < set.get(Threshold::Vih));
    }
}

#[test]
fn test_collapsed_margin_silences_noise() {
    // Vil dragged onto Vol leaves no bottom margin at all
    let mut set = ThresholdSet::default();
    set.set_value(Threshold::Vil, set.get(Threshold::Vol));
    let m = DerivedMetrics::from_thresholds(&set.values());
    assert_eq!(m.tolerance, 0.0);

    let sampler = NoiseSampler::default();
    let mut rng = StdRng::seed_from_u64(11);
    assert!(sampler
        .walk(NoiseBand::Top { level: 4.0 }, m.tolerance, &mut rng)
        .all(|p| p.volts == 4.0));
}

// =============================================================================
// Axis Mapping with Drag Coordinates
// =============================================================================

#[test]
fn test_pointer_to_threshold_round_trip() {
    // Vertical track: dragging to the top pixel must yield the high rail
    let axis = VoltAxis::vertical(40.0, 520.0);
    let mut set = ThresholdSet::default();

    set.set_value(Threshold::Voh, axis.axis_to_volts(40.0));
    assert_eq!(set.get(Threshold::Voh), 5.0);

    set.set_value(Threshold::Voh, axis.axis_to_volts(560.0));
    // Voh hit the low rail, the cascade pulled the rest below it
    assert!(set.is_ordered());
    assert!(set.get(Threshold::Vih) <= set.get(Threshold::Voh));
    assert!(set.get(Threshold::Vol) <= NUDGE * 3.0);
}

#[test]
fn test_pointer_outside_track_saturates() {
    let axis = VoltAxis::horizontal(40.0, 520.0);
    assert_eq!(clip(axis.axis_to_volts(-500.0)), 0.0);
    assert_eq!(clip(axis.axis_to_volts(5000.0)), 5.0);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_threshold_set_serialization() {
    let mut set = ThresholdSet::default();
    set.set_active(Threshold::Vih);
    set.set_value(Threshold::Vih, 3.3);

    let json = serde_json::to_string(&set).expect("serialize");
    let loaded: ThresholdSet = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(loaded.values(), set.values());
    assert_eq!(loaded.active(), Some(Threshold::Vih));
}

#[test]
fn test_metrics_serialization() {
    let m = DerivedMetrics::from_thresholds(&ThresholdSet::default().values());
    let json = serde_json::to_string(&m).expect("serialize");
    let loaded: DerivedMetrics = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(loaded, m);
}

// =============================================================================
// Foundational Types
// =============================================================================

#[test]
fn test_rect_hit_testing_for_handles() {
    let handle = Rect::new(100.0, 200.0, 20.0, 20.0);
    assert!(handle.contains_point(&Point::new(110.0, 210.0)));
    assert!(handle.contains_point(&Point::new(100.0, 200.0)));
    assert!(!handle.contains_point(&Point::new(90.0, 210.0)));
}

#[test]
fn test_color_roundtrip_hex() {
    let original = Color::from_hex("#743d3d").expect("valid hex");
    let hex = original.to_hex();
    let parsed = Color::from_hex(&hex).expect("valid hex");

    // Allow small rounding differences
    assert!((original.r - parsed.r).abs() < 0.01);
    assert!((original.g - parsed.g).abs() < 0.01);
    assert!((original.b - parsed.b).abs() < 0.01);
}
