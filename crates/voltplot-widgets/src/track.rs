//! Slider track strips for one threshold pair.
//!
//! A strip is not a standalone widget: its event handling mutates the plot's
//! shared [`ThresholdSet`], which the widget event signature cannot thread
//! through, so the plot owns its strips and forwards events to them.

use crate::drag::DragController;
use crate::theme::PlotTheme;
use serde::{Deserialize, Serialize};
use voltplot_core::threshold::{Threshold, ThresholdSet};
use voltplot_core::volts::VoltAxis;
use voltplot_core::{Canvas, Event, MouseButton, Point, Rect, TextStyle};

/// One slider track: the strip rectangle, its volt axis, and the drag
/// controller for the two thresholds riding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackStrip {
    pair: [Threshold; 2],
    vertical: bool,
    bounds: Rect,
    axis: VoltAxis,
    controller: DragController,
    highlight: Option<Threshold>,
}

impl TrackStrip {
    /// Horizontal strip for the input pair (Vil, Vih).
    #[must_use]
    pub fn input() -> Self {
        Self::with_pair([Threshold::Vil, Threshold::Vih], false)
    }

    /// Vertical strip for the output pair (Vol, Voh).
    #[must_use]
    pub fn output() -> Self {
        Self::with_pair([Threshold::Vol, Threshold::Voh], true)
    }

    fn with_pair(pair: [Threshold; 2], vertical: bool) -> Self {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        Self {
            pair,
            vertical,
            bounds,
            axis: Self::axis_for(bounds, vertical),
            controller: DragController::new(pair),
            highlight: None,
        }
    }

    fn axis_for(bounds: Rect, vertical: bool) -> VoltAxis {
        if vertical {
            VoltAxis::vertical(bounds.y, bounds.height)
        } else {
            VoltAxis::horizontal(bounds.x, bounds.width)
        }
    }

    /// Position the strip and rebuild its volt axis.
    pub fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.axis = Self::axis_for(bounds, self.vertical);
    }

    /// Strip bounds.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The strip's volt axis.
    #[must_use]
    pub const fn axis(&self) -> &VoltAxis {
        &self.axis
    }

    /// The threshold currently highlighted, if any.
    #[must_use]
    pub const fn highlight(&self) -> Option<Threshold> {
        self.highlight
    }

    /// Whether a drag against this strip is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    fn coord(&self, position: Point) -> f32 {
        if self.vertical {
            position.y
        } else {
            position.x
        }
    }

    /// Feed one input event through the drag controller.
    ///
    /// Returns the threshold whose value changed, if any.
    pub fn handle_event(&mut self, event: &Event, set: &mut ThresholdSet) -> Option<Threshold> {
        match event {
            Event::MouseMove { position } => {
                if self.controller.is_dragging() {
                    let changed = self.controller.drag(self.coord(*position), &self.axis, set);
                    if let Some(t) = changed {
                        self.highlight = Some(t);
                    }
                    return changed;
                }
                if self.bounds.contains_point(position) {
                    let t = self.controller.hover(self.coord(*position), &self.axis, set);
                    self.highlight = Some(t);
                } else if self.highlight.is_some() {
                    self.controller.leave();
                    self.highlight = None;
                }
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if !self.bounds.contains_point(position) {
                    return None;
                }
                let t = self.controller.press(self.coord(*position), &self.axis, set);
                self.highlight = Some(t);
                Some(t)
            }
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                self.controller.release();
                None
            }
            Event::MouseLeave => {
                self.controller.leave();
                self.highlight = None;
                None
            }
            _ => None,
        }
    }

    /// Paint the strip, both handles, and their labels.
    pub fn paint(&self, canvas: &mut dyn Canvas, set: &ThresholdSet, theme: &PlotTheme) {
        canvas.fill_rect(self.bounds, theme.track_fill());

        let label_style = TextStyle {
            size: 10.0,
            color: theme.text,
            ..TextStyle::default()
        };

        for t in self.pair {
            let pixel = self.axis.volts_to_axis(set.get(t));
            let color = if self.highlight == Some(t) {
                theme.handle_highlight
            } else {
                theme.handle
            };
            canvas.fill_polygon(&self.handle_triangle(pixel, theme), color);
            canvas.draw_text(t.label(), self.label_position(pixel, theme), &label_style);
        }
    }

    /// Triangular handle pointing into the plot.
    fn handle_triangle(&self, pixel: f32, theme: &PlotTheme) -> [Point; 3] {
        let hw = theme.handle_half_width;
        if self.vertical {
            [
                Point::new(self.bounds.right(), pixel),
                Point::new(self.bounds.x, pixel - hw),
                Point::new(self.bounds.x, pixel + hw),
            ]
        } else {
            [
                Point::new(pixel, self.bounds.y),
                Point::new(pixel - hw, self.bounds.bottom()),
                Point::new(pixel + hw, self.bounds.bottom()),
            ]
        }
    }

    fn label_position(&self, pixel: f32, theme: &PlotTheme) -> Point {
        if self.vertical {
            Point::new(self.bounds.x + 1.0, pixel - theme.handle_half_width - 2.0)
        } else {
            Point::new(pixel - 11.0, self.bounds.bottom() - 2.0)
        }
    }
}
