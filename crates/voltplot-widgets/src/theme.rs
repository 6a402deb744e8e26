//! Immutable color and layout constants shared by the plot widgets.

use serde::{Deserialize, Serialize};
use voltplot_core::Color;

/// Colors and layout constants for the discipline widgets.
///
/// Constructed once and passed by reference; nothing mutates a theme after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotTheme {
    /// Plot background.
    pub background: Color,
    /// Forbidden-zone fill.
    pub forbidden: Color,
    /// Slider track strip (drawn translucent).
    pub track: Color,
    /// Slider handle fill.
    pub handle: Color,
    /// Handle fill while hovered or dragged.
    pub handle_highlight: Color,
    /// Dashed threshold guide lines.
    pub guide: Color,
    /// Transfer curve stroke.
    pub curve: Color,
    /// Noise path stroke.
    pub noise: Color,
    /// Label text.
    pub text: Color,
    /// Track strip thickness in pixels.
    pub track_thickness: f32,
    /// Half-width of a triangular slider handle in pixels.
    pub handle_half_width: f32,
    /// Dash pattern for guide lines.
    pub guide_dash: [f32; 2],
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            // #848494
            background: Color::rgb(0.518, 0.518, 0.580),
            // #743d3d
            forbidden: Color::rgb(0.455, 0.239, 0.239),
            // #b3b3b3
            track: Color::rgb(0.702, 0.702, 0.702),
            handle: Color::rgb(0.85, 0.85, 0.85),
            handle_highlight: Color::rgb(0.30, 0.45, 1.0),
            guide: Color::rgb(0.90, 0.90, 0.90),
            curve: Color::WHITE,
            noise: Color::rgb(0.90, 0.84, 0.25),
            text: Color::WHITE,
            track_thickness: 16.0,
            handle_half_width: 7.0,
            guide_dash: [4.0, 4.0],
        }
    }
}

impl PlotTheme {
    /// Track color at its painted translucency.
    #[must_use]
    pub fn track_fill(&self) -> Color {
        self.track.with_alpha(0.5)
    }
}
