//! Core types and the static-discipline model for Voltplot.
//!
//! This crate provides foundational types used throughout Voltplot:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - The drawing abstraction: [`Canvas`], [`RecordingCanvas`]
//!
//! and the domain core:
//! - [`volts`]: conversion and clamping between volts and pixel axes
//! - [`threshold`]: the four ordered thresholds and their repair cascade
//! - [`metrics`]: noise margins and forbidden zones
//! - [`noise`]: bounded random noise walks

mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod draw;
pub mod metrics;
pub mod noise;
pub mod threshold;
pub mod volts;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use event::{Event, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use metrics::{Band, DerivedMetrics, ToleranceSide};
pub use noise::{NoiseBand, NoisePoint, NoiseSampler, DEFAULT_STEPS};
pub use threshold::{Threshold, ThresholdSet, ThresholdValues, NUDGE};
pub use volts::{clip, VoltAxis, LOGIC_LEVEL_HI, LOGIC_LEVEL_LO};
pub use widget::{
    AccessibleRole, Canvas, FontStyle, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
