//! Toggling inverter-pair schematic.
//!
//! Two cascaded inverters joined by the wire whose noise immunity the rest
//! of the panel illustrates. A fixed-period timer, advanced by the frame
//! tick, flips the digital input; the flag is read by the noise view and
//! written only here.

use crate::theme::PlotTheme;
use serde::{Deserialize, Serialize};
use std::any::Any;
use voltplot_core::widget::{AccessibleRole, LayoutResult};
use voltplot_core::{Canvas, Color, Constraints, Event, Point, Rect, Size, TextStyle, TypeId, Widget};

/// Default toggle period in seconds.
pub const TOGGLE_PERIOD: f32 = 1.0;

/// Fixed-period repeating timer advanced by frame ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToggleTimer {
    period: f32,
    elapsed: f32,
}

impl Default for ToggleTimer {
    fn default() -> Self {
        Self::new(TOGGLE_PERIOD)
    }
}

impl ToggleTimer {
    /// Create a timer with the given period in seconds.
    #[must_use]
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            elapsed: 0.0,
        }
    }

    /// Configured period in seconds.
    #[must_use]
    pub const fn period(&self) -> f32 {
        self.period
    }

    /// Advance by `dt` seconds; returns whether the timer fired.
    ///
    /// At most one fire per call: a frame stall longer than the period
    /// produces a single toggle, not a burst.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.period {
            self.elapsed %= self.period;
            true
        } else {
            false
        }
    }
}

/// Schematic of two inverters driving the observed wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    theme: PlotTheme,
    timer: ToggleTimer,
    digital_in: bool,
    bounds: Rect,
}

impl Default for Schematic {
    fn default() -> Self {
        Self::new()
    }
}

impl Schematic {
    /// Create a schematic with the default 1 s toggle period.
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: PlotTheme::default(),
            timer: ToggleTimer::default(),
            digital_in: false,
            bounds: Rect::default(),
        }
    }

    /// Replace the toggle timer.
    #[must_use]
    pub const fn timer(mut self, timer: ToggleTimer) -> Self {
        self.timer = timer;
        self
    }

    /// Current digital input state.
    #[must_use]
    pub const fn digital_in(&self) -> bool {
        self.digital_in
    }

    /// Advance the toggle timer; returns whether the input flipped.
    pub fn tick(&mut self, dt: f32) -> bool {
        let fired = self.timer.tick(dt);
        if fired {
            self.digital_in = !self.digital_in;
        }
        fired
    }

    /// Inverter symbol at `apex_x` along the wire: triangle plus bubble.
    fn paint_inverter(&self, canvas: &mut dyn Canvas, apex_x: f32, wire_y: f32, size: f32) {
        let triangle = [
            Point::new(apex_x, wire_y),
            Point::new(apex_x - size, wire_y - size / 2.0),
            Point::new(apex_x - size, wire_y + size / 2.0),
        ];
        canvas.fill_polygon(&triangle, Color::WHITE);
        canvas.fill_circle(
            Point::new(apex_x + size * 0.12, wire_y),
            size * 0.12,
            Color::WHITE,
        );
    }
}

impl Widget for Schematic {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(480.0, 120.0))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let wire_y = self.bounds.center().y;
        let gate = (self.bounds.height * 0.5).max(8.0);

        canvas.draw_line(
            Point::new(self.bounds.x, wire_y),
            Point::new(self.bounds.right(), wire_y),
            Color::BLACK,
            2.0,
        );
        self.paint_inverter(canvas, self.bounds.x + self.bounds.width * 0.3, wire_y, gate);
        self.paint_inverter(canvas, self.bounds.x + self.bounds.width * 0.7, wire_y, gate);

        let style = TextStyle {
            size: 12.0,
            ..TextStyle::default()
        };
        canvas.draw_text(
            "IN",
            Point::new(self.bounds.x + 2.0, wire_y - 6.0),
            &style,
        );
        canvas.draw_text(
            "OUT",
            Point::new(self.bounds.right() - 26.0, wire_y - 6.0),
            &style,
        );
        canvas.draw_text(
            if self.digital_in { "1" } else { "0" },
            Point::new(self.bounds.x + 2.0, wire_y + 16.0),
            &style,
        );
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
        Some("Inverter pair schematic")
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Image
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
