//! Loading the four economic datasets.
//!
//! Each kind is read from `<dir>/<endpoint>.json` on its own. Any failure
//! (missing file, bad JSON, non-success status, no rows) is logged and
//! replaced by that kind's fallback array; the other kinds are unaffected.

pub mod api;
pub mod fallback;

use crate::record::{DatasetContext, DatasetKind, MagnitudeRecord};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a dataset's records came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    Api(PathBuf),
    Fallback { reason: String },
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Api(path) => write!(f, "api ({})", path.display()),
            DataOrigin::Fallback { reason } => write!(f, "fallback ({reason})"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedDataset {
    pub context: DatasetContext,
    pub origin: DataOrigin,
}

impl LoadedDataset {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, DataOrigin::Fallback { .. })
    }
}

/// One loaded dataset per kind
#[derive(Clone, Debug)]
pub struct Datasets {
    pub country: LoadedDataset,
    pub prefecture: LoadedDataset,
    pub company: LoadedDataset,
    pub municipality: LoadedDataset,
}

impl Datasets {
    pub fn get(&self, kind: DatasetKind) -> &LoadedDataset {
        match kind {
            DatasetKind::Country => &self.country,
            DatasetKind::Prefecture => &self.prefecture,
            DatasetKind::Company => &self.company,
            DatasetKind::Municipality => &self.municipality,
        }
    }

    /// Only the embedded arrays; no I/O
    pub fn fallback() -> Self {
        Self::load(None)
    }

    /// Load all four kinds in parallel
    pub fn load(dir: Option<&Path>) -> Self {
        let ((country, prefecture), (company, municipality)) = rayon::join(
            || {
                rayon::join(
                    || load_dataset(DatasetKind::Country, dir),
                    || load_dataset(DatasetKind::Prefecture, dir),
                )
            },
            || {
                rayon::join(
                    || load_dataset(DatasetKind::Company, dir),
                    || load_dataset(DatasetKind::Municipality, dir),
                )
            },
        );
        Self {
            country,
            prefecture,
            company,
            municipality,
        }
    }
}

/// Load one kind, falling back to its embedded array on any failure
pub fn load_dataset(kind: DatasetKind, dir: Option<&Path>) -> LoadedDataset {
    let outcome = match dir {
        Some(dir) => read_api_file(kind, dir),
        None => Err("no data directory configured".to_string()),
    };

    match outcome {
        Ok((path, records)) => {
            info!(%kind, count = records.len(), path = %path.display(), "loaded dataset");
            LoadedDataset {
                context: DatasetContext::new(kind, records),
                origin: DataOrigin::Api(path),
            }
        }
        Err(reason) => {
            if dir.is_some() {
                warn!(%kind, %reason, "using fallback dataset");
            } else {
                debug!(%kind, "using fallback dataset");
            }
            LoadedDataset {
                context: DatasetContext::new(kind, fallback::fallback_records(kind)),
                origin: DataOrigin::Fallback { reason },
            }
        }
    }
}

fn read_api_file(kind: DatasetKind, dir: &Path) -> Result<(PathBuf, Vec<MagnitudeRecord>), String> {
    let path = dir.join(format!("{}.json", kind.endpoint()));
    let mut body = fs::read(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(%kind, bytes = body.len(), path = %path.display(), "read envelope");

    match api::decode(kind, &mut body) {
        Ok(Ok(records)) if !records.is_empty() => Ok((path, records)),
        Ok(Ok(_)) => Err("no record had valid coordinates".to_string()),
        Ok(Err(api::Rejection::Status(status))) => Err(format!("status {status:?}")),
        Ok(Err(api::Rejection::NoData)) => Err("envelope carried no data".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
