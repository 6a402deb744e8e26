//! Noise-tolerance diagram.
//!
//! Shows a noisy signal riding on one of the output levels, bounded by the
//! current noise margin. Both band paths are kept alive; toggling the
//! digital input only flips which one is painted visibly, so a toggle never
//! allocates.

use crate::theme::PlotTheme;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::any::Any;
use voltplot_core::metrics::DerivedMetrics;
use voltplot_core::noise::{NoiseBand, NoiseSampler};
use voltplot_core::threshold::ThresholdValues;
use voltplot_core::volts::VoltAxis;
use voltplot_core::widget::{AccessibleRole, LayoutResult};
use voltplot_core::{Canvas, Constraints, Event, Point, Rect, Size, TypeId, Widget};

/// Widget painting the active noise band between the output levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseBandView {
    sampler: NoiseSampler,
    theme: PlotTheme,
    /// Logic state of the driven wire's input. High input means the
    /// inverter drives the wire low, so the bottom band is the live one.
    digital_in: bool,
    lo_level: f32,
    hi_level: f32,
    tolerance: f32,
    bounds: Rect,
    y_axis: VoltAxis,
    /// Pixel-space paths, regenerated together when dirty.
    bottom_path: Vec<Point>,
    top_path: Vec<Point>,
    dirty: bool,
}

impl Default for NoiseBandView {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseBandView {
    /// Create a view with default levels and an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sampler: NoiseSampler::default(),
            theme: PlotTheme::default(),
            digital_in: false,
            lo_level: 1.0,
            hi_level: 4.0,
            tolerance: 1.0,
            bounds: Rect::default(),
            y_axis: VoltAxis::vertical(0.0, 1.0),
            bottom_path: Vec::new(),
            top_path: Vec::new(),
            dirty: true,
        }
    }

    /// Replace the theme.
    #[must_use]
    pub fn theme(mut self, theme: PlotTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Flip which band is painted visibly. Does not regenerate anything.
    pub fn set_digital_in(&mut self, digital_in: bool) {
        self.digital_in = digital_in;
    }

    /// Current digital input state.
    #[must_use]
    pub const fn digital_in(&self) -> bool {
        self.digital_in
    }

    /// Whether a regenerate is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The band currently painted visibly.
    #[must_use]
    pub fn active_band(&self) -> NoiseBand {
        if self.digital_in {
            NoiseBand::Bottom {
                level: self.lo_level,
            }
        } else {
            NoiseBand::Top {
                level: self.hi_level,
            }
        }
    }

    /// Adopt the latest output levels and noise margin.
    pub fn update(&mut self, values: &ThresholdValues, metrics: &DerivedMetrics) {
        let changed = (self.lo_level, self.hi_level, self.tolerance)
            != (values.vol, values.voh, metrics.tolerance);
        if changed {
            self.lo_level = values.vol;
            self.hi_level = values.voh;
            self.tolerance = metrics.tolerance;
            self.dirty = true;
        }
    }

    /// Regenerate both band paths if dirty. Returns whether paths changed.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) -> bool {
        if !self.dirty {
            return false;
        }
        self.bottom_path = self.walk_pixels(
            NoiseBand::Bottom {
                level: self.lo_level,
            },
            rng,
        );
        self.top_path = self.walk_pixels(
            NoiseBand::Top {
                level: self.hi_level,
            },
            rng,
        );
        self.dirty = false;
        true
    }

    fn walk_pixels<R: Rng>(&self, band: NoiseBand, rng: &mut R) -> Vec<Point> {
        self.sampler
            .walk(band, self.tolerance, rng)
            .map(|p| {
                Point::new(
                    self.bounds.x + p.position * self.bounds.width,
                    self.y_axis.volts_to_axis(p.volts),
                )
            })
            .collect()
    }

    fn paint_level_line(&self, canvas: &mut dyn Canvas, volts: f32) {
        let y = self.y_axis.volts_to_axis(volts);
        canvas.draw_line(
            Point::new(self.bounds.x, y),
            Point::new(self.bounds.right(), y),
            self.theme.guide,
            1.0,
        );
    }
}

impl Widget for NoiseBandView {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(240.0, 640.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.y_axis = VoltAxis::vertical(bounds.y, bounds.height.max(1.0));
        // Pixel paths depend on bounds
        self.dirty = true;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.theme.background);
        self.paint_level_line(canvas, self.lo_level);
        self.paint_level_line(canvas, self.hi_level);

        let visible = self.theme.noise;
        let hidden = self.theme.noise.with_alpha(0.0);
        let (bottom_color, top_color) = if self.digital_in {
            (visible, hidden)
        } else {
            (hidden, visible)
        };
        if self.bottom_path.len() >= 2 {
            canvas.draw_path(&self.bottom_path, bottom_color, 1.5);
        }
        if self.top_path.len() >= 2 {
            canvas.draw_path(&self.top_path, top_color, 1.5);
        }
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn accessible_name(&self) -> Option<&str> {
        Some("Noise tolerance diagram")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Image
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
