//! Which Japan layer is on screen.
//!
//! In automatic mode the layer follows the map zoom level; in manual mode it
//! follows the user's last pick. State is an immutable value: every event
//! produces a new [`ViewState`] and says whether the visible layer changed,
//! which is the caller's cue to run the fade.

use crate::error::{Error, Result};
use crate::record::DatasetKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opacity animation length after every layer change
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JapanLayer {
    Prefecture,
    Company,
    Municipality,
}

impl JapanLayer {
    pub const ALL: [JapanLayer; 3] = [
        JapanLayer::Prefecture,
        JapanLayer::Company,
        JapanLayer::Municipality,
    ];

    pub fn dataset_kind(self) -> DatasetKind {
        match self {
            JapanLayer::Prefecture => DatasetKind::Prefecture,
            JapanLayer::Company => DatasetKind::Company,
            JapanLayer::Municipality => DatasetKind::Municipality,
        }
    }

    fn from_rank(rank: usize) -> Self {
        match rank {
            0 => JapanLayer::Prefecture,
            1 => JapanLayer::Company,
            _ => JapanLayer::Municipality,
        }
    }

    fn rank(self) -> usize {
        self as usize
    }
}

impl fmt::Display for JapanLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.dataset_kind(), f)
    }
}

/// Zoom levels where the automatic mode switches layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomThresholds {
    /// `zoom >= company` shows companies
    pub company: f64,
    /// `zoom >= municipality` shows municipalities
    pub municipality: f64,
    /// Deadband around each threshold. 0 switches on every crossing.
    pub hysteresis: f64,
}

impl Default for ZoomThresholds {
    fn default() -> Self {
        Self {
            company: 8.0,
            municipality: 10.0,
            hysteresis: 0.0,
        }
    }
}

impl ZoomThresholds {
    /// Both thresholds finite with `company < municipality`, and a deadband
    /// narrower than half the gap so every layer stays reachable.
    pub fn validate(&self) -> Result<()> {
        if !(self.company.is_finite() && self.municipality.is_finite()) {
            return Err(Error::InvalidThresholds(format!(
                "thresholds must be finite, got company={} municipality={}",
                self.company, self.municipality
            )));
        }
        if self.company >= self.municipality {
            return Err(Error::InvalidThresholds(format!(
                "company ({}) must be below municipality ({})",
                self.company, self.municipality
            )));
        }
        let half_gap = (self.municipality - self.company) / 2.0;
        if !(self.hysteresis >= 0.0 && self.hysteresis < half_gap) {
            return Err(Error::InvalidThresholds(format!(
                "hysteresis must be in [0, {half_gap}), got {}",
                self.hysteresis
            )));
        }
        Ok(())
    }

    /// Layer for `zoom` with no memory of the current layer
    pub fn layer_for(&self, zoom: f64) -> JapanLayer {
        if zoom >= self.municipality {
            JapanLayer::Municipality
        } else if zoom >= self.company {
            JapanLayer::Company
        } else {
            JapanLayer::Prefecture
        }
    }

    /// Layer for `zoom` given the layer currently shown. With a deadband of
    /// `h`, crossing upward needs `zoom >= t + h` and downward `zoom < t - h`.
    pub fn layer_from(&self, current: JapanLayer, zoom: f64) -> JapanLayer {
        let h = self.hysteresis.max(0.0);
        if h == 0.0 {
            return self.layer_for(zoom);
        }

        let rank = [self.company, self.municipality]
            .iter()
            .enumerate()
            .filter(|&(i, &t)| {
                let above_now = current.rank() > i;
                if above_now {
                    zoom >= t - h
                } else {
                    zoom >= t + h
                }
            })
            .count();
        JapanLayer::from_rank(rank)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Automatic,
    Manual,
}

/// Inputs to the selector
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    /// A zoom gesture finished at this level
    Zoomed(f64),
    /// The user picked a layer
    Selected(JapanLayer),
    SetMode(SelectionMode),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub mode: SelectionMode,
    pub zoom: f64,
    /// Layer shown while in automatic mode
    pub auto_layer: JapanLayer,
    /// Last layer picked by the user, shown while in manual mode
    pub manual_layer: JapanLayer,
}

/// Outcome of applying one event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: ViewState,
    /// True when the visible layer differs from before; start the fade
    pub layer_changed: bool,
}

impl ViewState {
    pub fn new(zoom: f64, thresholds: &ZoomThresholds) -> Self {
        Self {
            mode: SelectionMode::Automatic,
            zoom,
            auto_layer: thresholds.layer_for(zoom),
            manual_layer: JapanLayer::Prefecture,
        }
    }

    pub fn active_layer(&self) -> JapanLayer {
        match self.mode {
            SelectionMode::Automatic => self.auto_layer,
            SelectionMode::Manual => self.manual_layer,
        }
    }

    pub fn apply(self, event: ViewEvent, thresholds: &ZoomThresholds) -> Transition {
        let before = self.active_layer();
        let mut next = self;
        match event {
            ViewEvent::Zoomed(zoom) => {
                next.zoom = zoom;
                if next.mode == SelectionMode::Automatic {
                    next.auto_layer = thresholds.layer_from(self.auto_layer, zoom);
                }
            }
            ViewEvent::Selected(layer) => next.manual_layer = layer,
            ViewEvent::SetMode(mode) => {
                next.mode = mode;
                if mode == SelectionMode::Automatic {
                    // zoom may have moved while manual
                    next.auto_layer = thresholds.layer_for(next.zoom);
                }
            }
        }
        Transition {
            state: next,
            layer_changed: next.active_layer() != before,
        }
    }
}
