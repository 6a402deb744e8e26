//! Draw commands emitted through the [`Canvas`](crate::Canvas) abstraction.
//!
//! All rendering reduces to these primitives.

use crate::{Color, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Dash pattern (empty = solid)
    pub dash: Vec<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            dash: Vec::new(),
        }
    }
}

impl StrokeStyle {
    /// Solid stroke with a color and width.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Dashed stroke with a color, width, and dash pattern.
    #[must_use]
    pub fn dashed(color: Color, width: f32, dash: &[f32]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }

    /// Check whether the stroke is dashed.
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

/// Box style for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline or polygon)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: crate::widget::TextStyle,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a stroked rectangle.
    #[must_use]
    pub fn stroked_rect(bounds: Rect, stroke: StrokeStyle) -> Self {
        Self::Rect {
            bounds,
            style: BoxStyle::stroke(stroke),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
        assert!(!style.is_dashed());
    }

    #[test]
    fn test_stroke_style_dashed() {
        let style = StrokeStyle::dashed(Color::WHITE, 1.0, &[2.0, 4.0]);
        assert!(style.is_dashed());
        assert_eq!(style.dash, vec![2.0, 4.0]);
    }

    #[test]
    fn test_box_style_fill() {
        let style = BoxStyle::fill(Color::BLACK);
        assert_eq!(style.fill, Some(Color::BLACK));
        assert!(style.stroke.is_none());
    }

    #[test]
    fn test_box_style_stroke() {
        let stroke = StrokeStyle::solid(Color::WHITE, 2.0);
        let style = BoxStyle::stroke(stroke.clone());
        assert!(style.fill.is_none());
        assert_eq!(style.stroke, Some(stroke));
    }

    #[test]
    fn test_draw_command_filled_rect() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLACK);
        match cmd {
            DrawCommand::Rect { bounds, style } => {
                assert_eq!(bounds.width, 100.0);
                assert_eq!(style.fill, Some(Color::BLACK));
            }
            _ => panic!("Expected Rect command"),
        }
    }

    #[test]
    fn test_draw_command_line() {
        let style = StrokeStyle::default();
        let cmd = DrawCommand::line(Point::new(0.0, 0.0), Point::new(100.0, 100.0), style);
        match cmd {
            DrawCommand::Path { points, closed, .. } => {
                assert_eq!(points.len(), 2);
                assert!(!closed);
            }
            _ => panic!("Expected Path command"),
        }
    }

    #[test]
    fn test_draw_command_serde_round_trip() {
        let cmd = DrawCommand::filled_circle(Point::new(5.0, 5.0), 3.0, Color::WHITE);
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
