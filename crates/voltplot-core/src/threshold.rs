//! The four ordered voltage thresholds and their constraint-repair logic.
//!
//! The static discipline requires `Vol <= Vil <= Vih <= Voh`. When the user
//! drags one threshold the ordering can break; a directional repair pass
//! nudges the neighbors back into place. Repair is a single pass per edit
//! (and one more per frame tick), not a fixed-point iteration: re-invoking
//! it every frame is what settles the set while a drag is in progress.

use crate::volts::clip;
use serde::{Deserialize, Serialize};

/// Fixed nudge applied by the repair pass, in volts.
pub const NUDGE: f32 = 0.01;

/// Maximum repair passes needed for an arbitrary single edit to settle.
pub const MAX_SETTLE_PASSES: usize = 4;

/// One of the four static-discipline voltage thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Threshold {
    /// Output-low: highest voltage a driving gate emits for logic 0.
    Vol,
    /// Input-low: highest voltage a receiving gate reads as logic 0.
    Vil,
    /// Input-high: lowest voltage a receiving gate reads as logic 1.
    Vih,
    /// Output-high: lowest voltage a driving gate emits for logic 1.
    Voh,
}

impl Threshold {
    /// All thresholds in ascending voltage order.
    pub const ALL: [Self; 4] = [Self::Vol, Self::Vil, Self::Vih, Self::Voh];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vol => "VOL",
            Self::Vil => "VIL",
            Self::Vih => "VIH",
            Self::Voh => "VOH",
        }
    }

    /// Whether this is an output threshold (Vol/Voh, vertical track).
    #[must_use]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Vol | Self::Voh)
    }

    /// The other threshold sharing this one's track.
    #[must_use]
    pub const fn partner(self) -> Self {
        match self {
            Self::Vol => Self::Voh,
            Self::Voh => Self::Vol,
            Self::Vil => Self::Vih,
            Self::Vih => Self::Vil,
        }
    }
}

/// Snapshot of the four threshold voltages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdValues {
    /// Output-low voltage.
    pub vol: f32,
    /// Input-low voltage.
    pub vil: f32,
    /// Input-high voltage.
    pub vih: f32,
    /// Output-high voltage.
    pub voh: f32,
}

/// The four ordered thresholds, mutated only through [`ThresholdSet::set_value`].
///
/// Created once per plot instance and never destroyed independently of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSet {
    vol: f32,
    vil: f32,
    vih: f32,
    voh: f32,
    active: Option<Threshold>,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self::new(1.0, 2.0, 3.0, 4.0)
    }
}

impl ThresholdSet {
    /// Create a set from four voltages, each clipped to the rails.
    #[must_use]
    pub fn new(vol: f32, vil: f32, vih: f32, voh: f32) -> Self {
        Self {
            vol: clip(vol),
            vil: clip(vil),
            vih: clip(vih),
            voh: clip(voh),
            active: None,
        }
    }

    /// Record which threshold the user is currently manipulating.
    ///
    /// The per-frame repair pass is keyed off this threshold.
    pub fn set_active(&mut self, t: Threshold) {
        self.active = Some(t);
    }

    /// The threshold last marked active, if any.
    #[must_use]
    pub const fn active(&self) -> Option<Threshold> {
        self.active
    }

    /// Get one threshold's voltage.
    #[must_use]
    pub const fn get(&self, t: Threshold) -> f32 {
        match t {
            Threshold::Vol => self.vol,
            Threshold::Vil => self.vil,
            Threshold::Vih => self.vih,
            Threshold::Voh => self.voh,
        }
    }

    /// Snapshot all four voltages.
    #[must_use]
    pub const fn values(&self) -> ThresholdValues {
        ThresholdValues {
            vol: self.vol,
            vil: self.vil,
            vih: self.vih,
            voh: self.voh,
        }
    }

    /// Set threshold `t` to `clip(v)`, then run one repair pass keyed on `t`.
    pub fn set_value(&mut self, t: Threshold, v: f32) {
        let v = clip(v);
        match t {
            Threshold::Vol => self.vol = v,
            Threshold::Vil => self.vil = v,
            Threshold::Vih => self.vih = v,
            Threshold::Voh => self.voh = v,
        }
        self.repair_from(t);
    }

    /// Run one repair pass keyed on the active threshold.
    ///
    /// Called once per frame tick; returns whether anything moved. A no-op
    /// when no threshold has been active yet.
    pub fn repair(&mut self) -> bool {
        match self.active {
            Some(t) => self.repair_from(t),
            None => false,
        }
    }

    /// Whether the ordering invariant currently holds.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.vol <= self.vil && self.vil <= self.vih && self.vih <= self.voh
    }

    /// One directional repair pass keyed on the edited threshold.
    ///
    /// Moving a threshold pushes its overtaken neighbors ahead of it by
    /// `NUDGE`, cascading away from the edit. Several branches are believed
    /// unreachable because the track bounds already limit the drag; they are
    /// kept because that claim is not a proven invariant.
    fn repair_from(&mut self, t: Threshold) -> bool {
        let before = (self.vol, self.vil, self.vih, self.voh);
        match t {
            Threshold::Vol => {
                if self.vol > self.vil {
                    self.vil = self.vol + NUDGE;
                }
                if self.vil > self.vih {
                    self.vih = self.vil + NUDGE;
                }
                if self.vih > self.voh {
                    self.voh = self.vih + NUDGE;
                }
            }
            Threshold::Vil => {
                if self.vol > self.vil {
                    self.vol = self.vil - NUDGE;
                }
                if self.vil > self.vih {
                    self.vih = self.vil + NUDGE;
                }
                // May be dead code: the shared track makes it hard to push
                // Vih past Voh, but that is a UI claim, not an invariant.
                if self.vih > self.voh {
                    self.voh = self.vih + NUDGE;
                }
            }
            Threshold::Vih => {
                if self.vih > self.voh {
                    self.voh = self.vih + NUDGE;
                }
                if self.vil > self.vih {
                    self.vil = self.vih - NUDGE;
                }
                // May be dead code: see the note on Vil.
                if self.vol >= self.vil {
                    self.vol = self.vil - NUDGE;
                }
            }
            Threshold::Voh => {
                if self.vih > self.voh {
                    self.vih = self.voh - NUDGE;
                }
                if self.vil > self.vih {
                    self.vil = self.vih - NUDGE;
                }
                if self.vol > self.vil {
                    self.vol = self.vil - NUDGE;
                }
            }
        }
        before != (self.vol, self.vil, self.vih, self.voh)
    }
}
