use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building tables, validating config, or decoding data.
///
/// The scaling, classification and share functions never fail; everything
/// here happens once, at configuration or load time.
#[derive(Debug, Error)]
pub enum Error {
    #[error("classification table is empty")]
    EmptyTable,

    #[error("classification bounds must be strictly descending: {previous} then {next}")]
    UnorderedBounds { previous: f64, next: f64 },

    #[error("classification bound {0} is negative or not finite")]
    InvalidBound(f64),

    #[error("classification table must end with a catch-all bound of 0, found {0}")]
    MissingCatchAll(f64),

    #[error("color {0} is reserved for the no-data sentinel")]
    SentinelCollision(String),

    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    #[error("invalid radius config: {0}")]
    InvalidRadius(String),

    #[error("invalid zoom thresholds: {0}")]
    InvalidThresholds(String),

    #[error("failed to decode {kind} envelope: {message}")]
    Envelope { kind: &'static str, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid GeoJSON in {path}: {source}")]
    GeoJson {
        path: PathBuf,
        #[source]
        source: Box<geojson::Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
