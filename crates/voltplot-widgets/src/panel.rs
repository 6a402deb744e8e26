//! Frame-tick composition of the discipline widgets.
//!
//! Single-threaded and cooperative: pointer events mutate state
//! synchronously, and `tick` drives the per-frame sequence in a fixed
//! order: toggle timer, threshold repair, metrics/curve recompute if
//! dirty, then noise regeneration if dirty.

use crate::noise_band::NoiseBandView;
use crate::plot::TransferPlot;
use crate::schematic::Schematic;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::any::Any;
use voltplot_core::widget::LayoutResult;
use voltplot_core::{Canvas, Constraints, Event, Rect, Size, TypeId, Widget};

/// Height reserved for the schematic strip, in pixels.
const SCHEMATIC_HEIGHT: f32 = 120.0;

/// Width reserved for the noise diagram column, in pixels.
const NOISE_WIDTH: f32 = 240.0;

/// The full static-discipline panel: schematic on top, transfer plot on the
/// left, noise diagram on the right.
#[derive(Debug, Clone)]
pub struct DisciplinePanel {
    plot: TransferPlot,
    noise: NoiseBandView,
    schematic: Schematic,
    rng: StdRng,
    bounds: Rect,
}

impl Default for DisciplinePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DisciplinePanel {
    /// Create a panel with an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a panel with a fixed RNG seed (deterministic output).
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            plot: TransferPlot::new(),
            noise: NoiseBandView::new(),
            schematic: Schematic::new(),
            rng,
            bounds: Rect::default(),
        }
    }

    /// The transfer plot.
    #[must_use]
    pub const fn plot(&self) -> &TransferPlot {
        &self.plot
    }

    /// Mutable access to the transfer plot (programmatic threshold edits).
    pub fn plot_mut(&mut self) -> &mut TransferPlot {
        &mut self.plot
    }

    /// The noise diagram.
    #[must_use]
    pub const fn noise(&self) -> &NoiseBandView {
        &self.noise
    }

    /// The schematic.
    #[must_use]
    pub const fn schematic(&self) -> &Schematic {
        &self.schematic
    }

    /// Advance one frame by `dt` seconds.
    ///
    /// Returns whether anything changed (a repaint is warranted).
    pub fn tick(&mut self, dt: f32) -> bool {
        let flipped = self.schematic.tick(dt);
        if flipped {
            self.noise.set_digital_in(self.schematic.digital_in());
        }

        let recomputed = self.plot.tick(&mut self.rng);
        if recomputed {
            self.noise
                .update(&self.plot.thresholds().values(), self.plot.metrics());
        }
        let regenerated = self.noise.regenerate(&mut self.rng);

        flipped || recomputed || regenerated
    }
}

impl Widget for DisciplinePanel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(880.0, 760.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let schematic_h = SCHEMATIC_HEIGHT.min(bounds.height * 0.25);
        let noise_w = NOISE_WIDTH.min(bounds.width * 0.35);
        let body_y = bounds.y + schematic_h;
        let body_h = (bounds.height - schematic_h).max(1.0);

        self.schematic
            .layout(Rect::new(bounds.x, bounds.y, bounds.width, schematic_h));
        self.plot.layout(Rect::new(
            bounds.x,
            body_y,
            (bounds.width - noise_w).max(1.0),
            body_h,
        ));
        self.noise.layout(Rect::new(
            bounds.x + bounds.width - noise_w,
            body_y,
            noise_w,
            body_h,
        ));
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.schematic.paint(canvas);
        self.plot.paint(canvas);
        self.noise.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        // Only the plot is interactive; messages pass through unchanged.
        self.plot.event(event)
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
        Some("Static discipline panel")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
