//! Pointer-to-threshold drag state machine.
//!
//! One controller serves one axis group: the pair of thresholds sharing a
//! slider track. It resolves which threshold a pointer coordinate addresses,
//! latches that threshold for the duration of a drag, and routes mapped
//! voltages into the shared [`ThresholdSet`]. Handlers are synchronous and
//! single-threaded.

use serde::{Deserialize, Serialize};
use voltplot_core::threshold::{Threshold, ThresholdSet};
use voltplot_core::volts::VoltAxis;

/// Interaction phase of one track's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    /// Pointer is outside the track.
    #[default]
    Idle,
    /// Pointer is over the track; the nearest threshold is highlighted.
    Hovering(Threshold),
    /// Button held; every pointer move re-targets this threshold.
    Dragging(Threshold),
}

/// Drag state machine for one pair of thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragController {
    pair: [Threshold; 2],
    phase: DragPhase,
}

impl DragController {
    /// Create a controller for a threshold pair.
    ///
    /// Order matters: distance ties resolve toward `pair[0]`.
    #[must_use]
    pub const fn new(pair: [Threshold; 2]) -> Self {
        Self {
            pair,
            phase: DragPhase::Idle,
        }
    }

    /// The threshold pair served by this controller.
    #[must_use]
    pub const fn pair(&self) -> [Threshold; 2] {
        self.pair
    }

    /// Current interaction phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The threshold currently hovered or dragged, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Threshold> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Hovering(t) | DragPhase::Dragging(t) => Some(t),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Nearest threshold to a track coordinate by 1-D distance.
    ///
    /// Ties resolve toward the first-listed threshold of the pair (`<=`).
    #[must_use]
    pub fn closest(&self, coord: f32, axis: &VoltAxis, set: &ThresholdSet) -> Threshold {
        let [first, second] = self.pair;
        let d_first = (axis.volts_to_axis(set.get(first)) - coord).abs();
        let d_second = (axis.volts_to_axis(set.get(second)) - coord).abs();
        if d_first <= d_second {
            first
        } else {
            second
        }
    }

    /// Pointer moved over the track without the button held.
    ///
    /// Returns the threshold to highlight; the partner is implicitly
    /// un-highlighted. Ignored while dragging.
    pub fn hover(&mut self, coord: f32, axis: &VoltAxis, set: &ThresholdSet) -> Threshold {
        if let DragPhase::Dragging(t) = self.phase {
            return t;
        }
        let t = self.closest(coord, axis, set);
        self.phase = DragPhase::Hovering(t);
        t
    }

    /// Button pressed on the track: latch the nearest threshold and apply
    /// the pointer's voltage immediately.
    pub fn press(
        &mut self,
        coord: f32,
        axis: &VoltAxis,
        set: &mut ThresholdSet,
    ) -> Threshold {
        let t = self.closest(coord, axis, set);
        self.phase = DragPhase::Dragging(t);
        set.set_active(t);
        set.set_value(t, axis.axis_to_volts(coord));
        t
    }

    /// Pointer moved with the button held: re-map and apply.
    ///
    /// Returns the latched threshold, or `None` when not dragging.
    pub fn drag(
        &mut self,
        coord: f32,
        axis: &VoltAxis,
        set: &mut ThresholdSet,
    ) -> Option<Threshold> {
        let DragPhase::Dragging(t) = self.phase else {
            return None;
        };
        set.set_value(t, axis.axis_to_volts(coord));
        Some(t)
    }

    /// Button released: back to idle.
    pub fn release(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Pointer left the track: back to idle, both highlights cleared.
    pub fn leave(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_controller() -> DragController {
        DragController::new([Threshold::Vil, Threshold::Vih])
    }

    #[test]
    fn test_initial_phase_idle() {
        let ctl = input_controller();
        assert_eq!(ctl.phase(), DragPhase::Idle);
        assert!(ctl.target().is_none());
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn test_closest_picks_nearer_threshold() {
        let ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let set = ThresholdSet::default(); // Vil=2 -> px 200, Vih=3 -> px 300

        assert_eq!(ctl.closest(210.0, &axis, &set), Threshold::Vil);
        assert_eq!(ctl.closest(290.0, &axis, &set), Threshold::Vih);
    }

    #[test]
    fn test_closest_tie_breaks_to_first_listed() {
        let ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let set = ThresholdSet::default();

        // Exactly between Vil (px 200) and Vih (px 300)
        assert_eq!(ctl.closest(250.0, &axis, &set), Threshold::Vil);
    }

    #[test]
    fn test_hover_highlights_nearest() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let set = ThresholdSet::default();

        let t = ctl.hover(290.0, &axis, &set);
        assert_eq!(t, Threshold::Vih);
        assert_eq!(ctl.phase(), DragPhase::Hovering(Threshold::Vih));
    }

    #[test]
    fn test_press_latches_and_applies_value() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let mut set = ThresholdSet::default();

        let t = ctl.press(150.0, &axis, &mut set);
        assert_eq!(t, Threshold::Vil);
        assert!(ctl.is_dragging());
        assert_eq!(set.active(), Some(Threshold::Vil));
        assert!((set.get(Threshold::Vil) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_drag_keeps_latched_threshold() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let mut set = ThresholdSet::default();

        ctl.press(150.0, &axis, &mut set);
        // Move past Vih's position: still dragging Vil
        let t = ctl.drag(350.0, &axis, &mut set);
        assert_eq!(t, Some(Threshold::Vil));
        assert!((set.get(Threshold::Vil) - 3.5).abs() < 1e-5);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let mut set = ThresholdSet::default();

        assert!(ctl.drag(350.0, &axis, &mut set).is_none());
        assert_eq!(set.get(Threshold::Vil), 2.0);
    }

    #[test]
    fn test_hover_during_drag_does_not_retarget() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let mut set = ThresholdSet::default();

        ctl.press(150.0, &axis, &mut set);
        let t = ctl.hover(290.0, &axis, &set);
        assert_eq!(t, Threshold::Vil);
        assert_eq!(ctl.phase(), DragPhase::Dragging(Threshold::Vil));
    }

    #[test]
    fn test_release_and_leave_reset() {
        let mut ctl = input_controller();
        let axis = VoltAxis::horizontal(0.0, 500.0);
        let mut set = ThresholdSet::default();

        ctl.press(150.0, &axis, &mut set);
        ctl.release();
        assert_eq!(ctl.phase(), DragPhase::Idle);

        ctl.hover(290.0, &axis, &set);
        ctl.leave();
        assert_eq!(ctl.phase(), DragPhase::Idle);
        assert!(ctl.target().is_none());
    }

    #[test]
    fn test_vertical_pair_uses_screen_space() {
        let ctl = DragController::new([Threshold::Vol, Threshold::Voh]);
        let axis = VoltAxis::vertical(0.0, 500.0);
        let set = ThresholdSet::default(); // Vol=1 -> px 400, Voh=4 -> px 100

        assert_eq!(ctl.closest(390.0, &axis, &set), Threshold::Vol);
        assert_eq!(ctl.closest(110.0, &axis, &set), Threshold::Voh);
    }
}
