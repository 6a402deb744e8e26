//! Transfer-function plot with draggable threshold markers.
//!
//! The plot owns the [`ThresholdSet`], both volt axes, the cached
//! [`DerivedMetrics`], and a random transfer curve. Per frame the update
//! order is fixed: drag deltas were applied synchronously by event handlers,
//! then one repair pass runs, then metrics and the curve regenerate only if
//! a drag marked the plot dirty since the last clean frame.

use crate::theme::PlotTheme;
use crate::track::TrackStrip;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;
use voltplot_core::metrics::DerivedMetrics;
use voltplot_core::threshold::{Threshold, ThresholdSet, ThresholdValues, MAX_SETTLE_PASSES};
use voltplot_core::volts::{VoltAxis, LOGIC_LEVEL_HI, LOGIC_LEVEL_LO};
use voltplot_core::widget::{AccessibleRole, LayoutResult};
use voltplot_core::{Canvas, Constraints, Event, Point, Rect, Size, TypeId, Widget};

/// Message emitted when a drag changes a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdChanged {
    /// The threshold that moved.
    pub threshold: Threshold,
    /// Its voltage after clipping and repair.
    pub volts: f32,
}

/// Width of the gutter holding each slider track, in pixels.
const TRACK_GUTTER: f32 = 40.0;

/// Interactive plot of a gate's transfer function under the static
/// discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPlot {
    thresholds: ThresholdSet,
    input_track: TrackStrip,
    output_track: TrackStrip,
    theme: PlotTheme,
    bounds: Rect,
    plot_rect: Rect,
    x_axis: VoltAxis,
    y_axis: VoltAxis,
    metrics: DerivedMetrics,
    /// Transfer curve in volt space: x is input volts, y is output volts.
    curve: Vec<Point>,
    dirty: bool,
    unordered_frames: usize,
}

impl Default for TransferPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferPlot {
    /// Create a plot with default thresholds (1, 2, 3, 4) and theme.
    #[must_use]
    pub fn new() -> Self {
        let thresholds = ThresholdSet::default();
        let metrics = DerivedMetrics::from_thresholds(&thresholds.values());
        Self {
            thresholds,
            input_track: TrackStrip::input(),
            output_track: TrackStrip::output(),
            theme: PlotTheme::default(),
            bounds: Rect::default(),
            plot_rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            x_axis: VoltAxis::horizontal(0.0, 1.0),
            y_axis: VoltAxis::vertical(0.0, 1.0),
            metrics,
            curve: Vec::new(),
            dirty: true,
            unordered_frames: 0,
        }
    }

    /// Replace the theme.
    #[must_use]
    pub fn theme(mut self, theme: PlotTheme) -> Self {
        self.theme = theme;
        self
    }

    /// The threshold set.
    #[must_use]
    pub const fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Metrics as of the last clean frame.
    #[must_use]
    pub const fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    /// Whether a change is pending recompute on the next tick.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The current transfer curve in volt space.
    #[must_use]
    pub fn curve(&self) -> &[Point] {
        &self.curve
    }

    /// The inner plot area (excluding track gutters).
    #[must_use]
    pub const fn plot_rect(&self) -> Rect {
        self.plot_rect
    }

    /// Set a threshold programmatically, as a drag would.
    pub fn set_threshold(&mut self, t: Threshold, volts: f32) {
        self.thresholds.set_active(t);
        self.thresholds.set_value(t, volts);
        self.dirty = true;
    }

    /// Advance one frame: repair, then recompute metrics and regenerate the
    /// curve if dirty. Returns whether anything was recomputed.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.thresholds.repair() {
            self.dirty = true;
        }
        if self.thresholds.is_ordered() {
            self.unordered_frames = 0;
        } else {
            self.unordered_frames += 1;
            if self.unordered_frames >= MAX_SETTLE_PASSES {
                log::warn!(
                    "threshold ordering still violated after {} repair passes: {:?}",
                    self.unordered_frames,
                    self.thresholds.values()
                );
            }
        }
        if !self.dirty {
            return false;
        }
        self.metrics = DerivedMetrics::from_thresholds(&self.thresholds.values());
        self.curve = Self::random_curve(&self.thresholds.values(), rng);
        self.dirty = false;
        true
    }

    /// A plausible random transfer curve for the current thresholds.
    ///
    /// The curve starts above `Voh` on the left edge, stays there until
    /// `Vil`, wanders through the forbidden middle, and sits below `Vol`
    /// from `Vih` to the right edge. Interval bounds are clamped so a
    /// transiently unordered set cannot produce an inverted range.
    fn random_curve<R: Rng>(v: &ThresholdValues, rng: &mut R) -> Vec<Point> {
        let top_lo = v.voh.min(LOGIC_LEVEL_HI);
        let bot_hi = v.vol.max(LOGIC_LEVEL_LO);
        let mid_lo = v.vil.min(v.vih);
        let mid_hi = v.vil.max(v.vih);

        let mut points = Vec::with_capacity(7);
        points.push(Point::new(
            LOGIC_LEVEL_LO,
            rng.gen_range(top_lo..=LOGIC_LEVEL_HI),
        ));
        points.push(Point::new(v.vil, rng.gen_range(top_lo..=LOGIC_LEVEL_HI)));

        let mut middle: Vec<Point> = (0..rng.gen_range(0..=3))
            .map(|_| {
                Point::new(
                    rng.gen_range(mid_lo..=mid_hi),
                    rng.gen_range(LOGIC_LEVEL_LO..=LOGIC_LEVEL_HI),
                )
            })
            .collect();
        middle.sort_by(|a, b| a.x.total_cmp(&b.x));
        points.extend(middle);

        points.push(Point::new(v.vih, rng.gen_range(LOGIC_LEVEL_LO..=bot_hi)));
        points.push(Point::new(
            LOGIC_LEVEL_HI,
            rng.gen_range(LOGIC_LEVEL_LO..=bot_hi),
        ));
        points
    }

    /// Pixel rectangle covering a volt-space region of the plot.
    fn volt_rect(&self, x_lo: f32, x_hi: f32, y_lo: f32, y_hi: f32) -> Rect {
        Rect::from_points(
            Point::new(self.x_axis.volts_to_axis(x_lo), self.y_axis.volts_to_axis(y_hi)),
            Point::new(self.x_axis.volts_to_axis(x_hi), self.y_axis.volts_to_axis(y_lo)),
        )
    }

    fn paint_forbidden_zones(&self, canvas: &mut dyn Canvas) {
        let m = &self.metrics;
        let low = self.volt_rect(
            m.forbidden_low.lo,
            m.forbidden_low.hi,
            m.output_band.lo,
            m.output_band.hi,
        );
        let high = self.volt_rect(
            m.forbidden_high.lo,
            m.forbidden_high.hi,
            m.output_band.lo,
            m.output_band.hi,
        );
        canvas.fill_rect(low, self.theme.forbidden);
        canvas.fill_rect(high, self.theme.forbidden);
    }

    fn paint_guides(&self, canvas: &mut dyn Canvas) {
        let v = self.thresholds.values();
        let dash = self.theme.guide_dash;
        for volts in [v.vil, v.vih] {
            let x = self.x_axis.volts_to_axis(volts);
            canvas.draw_dashed_line(
                Point::new(x, self.plot_rect.y),
                Point::new(x, self.plot_rect.bottom()),
                self.theme.guide,
                1.0,
                &dash,
            );
        }
        for volts in [v.vol, v.voh] {
            let y = self.y_axis.volts_to_axis(volts);
            canvas.draw_dashed_line(
                Point::new(self.plot_rect.x, y),
                Point::new(self.plot_rect.right(), y),
                self.theme.guide,
                1.0,
                &dash,
            );
        }
    }

    fn paint_curve(&self, canvas: &mut dyn Canvas) {
        if self.curve.len() < 2 {
            return;
        }
        let pixels: Vec<Point> = self
            .curve
            .iter()
            .map(|p| {
                Point::new(
                    self.x_axis.volts_to_axis(p.x),
                    self.y_axis.volts_to_axis(p.y),
                )
            })
            .collect();
        canvas.push_clip(self.plot_rect);
        canvas.draw_path(&pixels, self.theme.curve, 2.0);
        canvas.pop_clip();
    }
}

impl Widget for TransferPlot {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(640.0, 640.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.plot_rect = Rect::new(
            bounds.x + TRACK_GUTTER,
            bounds.y,
            (bounds.width - TRACK_GUTTER).max(1.0),
            (bounds.height - TRACK_GUTTER).max(1.0),
        );
        self.x_axis = VoltAxis::horizontal(self.plot_rect.x, self.plot_rect.width);
        self.y_axis = VoltAxis::vertical(self.plot_rect.y, self.plot_rect.height);

        self.output_track.layout(Rect::new(
            self.plot_rect.x - self.theme.track_thickness,
            self.plot_rect.y,
            self.theme.track_thickness,
            self.plot_rect.height,
        ));
        self.input_track.layout(Rect::new(
            self.plot_rect.x,
            self.plot_rect.bottom(),
            self.plot_rect.width,
            self.theme.track_thickness,
        ));
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.plot_rect, self.theme.background);
        self.paint_forbidden_zones(canvas);
        self.paint_guides(canvas);
        self.paint_curve(canvas);
        self.output_track.paint(canvas, &self.thresholds, &self.theme);
        self.input_track.paint(canvas, &self.thresholds, &self.theme);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let changed = self
            .output_track
            .handle_event(event, &mut self.thresholds)
            .or_else(|| self.input_track.handle_event(event, &mut self.thresholds));
        let threshold = changed?;
        self.dirty = true;
        Some(Box::new(ThresholdChanged {
            threshold,
            volts: self.thresholds.get(threshold),
        }))
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Transfer function plot")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
