//! Interactive widgets for the Voltplot static-discipline panel.
//!
//! The transfer plot owns the threshold model and its slider tracks; the
//! noise view and schematic render derived state; the panel composes them
//! and drives the per-frame update order.

pub mod drag;
pub mod noise_band;
pub mod panel;
pub mod plot;
pub mod schematic;
pub mod theme;
pub mod track;

pub use drag::{DragController, DragPhase};
pub use noise_band::NoiseBandView;
pub use panel::DisciplinePanel;
pub use plot::{ThresholdChanged, TransferPlot};
pub use schematic::{Schematic, ToggleTimer, TOGGLE_PERIOD};
pub use theme::PlotTheme;
pub use track::TrackStrip;
