//! Economic indicators as scaled, color-coded markers on braille world and
//! Japan maps.
//!
//! The core is pure: [`viz`] turns a magnitude into a radius, a bucket
//! color and a share of a reference total, and [`view`] picks the Japan
//! layer from the zoom level. [`dataset`] loads records with per-kind
//! fallbacks; [`app`] and [`ui`] draw them in the terminal.

pub mod app;
pub mod braille;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod geodata;
pub mod map;
pub mod marker;
pub mod record;
pub mod sources;
pub mod stats;
pub mod ui;
pub mod view;
pub mod viz;

pub use error::{Error, Result};
