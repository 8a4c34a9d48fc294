use crate::error::{Error, Result};
use crate::record::DatasetKind;
use crate::view::ZoomThresholds;
use crate::viz::{Bucket, ClassificationTable, RadiusConfig, Rgb, ShareConfig, ShareReference};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Japan's nominal GDP (540 trillion yen) in million yen, the reference for
/// company and municipality shares.
pub const JAPAN_GDP_MILLION_YEN: f64 = 540_000_000.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub view: ViewConfig,
    pub map: MapConfig,
    pub layers: LayersConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory with `countries.json`, `prefectures.json`, ... envelopes.
    /// Without it every dataset uses its fallback.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    #[serde(flatten)]
    pub thresholds: ZoomThresholds,
    pub fade_ms: u64,
    pub world: StartView,
    pub japan: StartView,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            thresholds: ZoomThresholds::default(),
            fade_ms: crate::view::FADE_DURATION.as_millis() as u64,
            world: StartView {
                lat: 20.0,
                lon: 0.0,
                zoom: 2.0,
            },
            japan: StartView {
                lat: 36.2048,
                lon: 138.2529,
                zoom: 6.0,
            },
        }
    }
}

impl ViewConfig {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Initial map center and zoom level
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Natural Earth GeoJSON directory for coastlines and borders
    pub geojson_dir: PathBuf,
    /// Braille pixels per radius unit
    pub marker_scale: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            geojson_dir: PathBuf::from("data"),
            marker_scale: 0.25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coloring {
    /// Fixed thresholds from the layer's table
    Buckets,
    /// Continuous ramp over the dataset's log range
    Gradient,
}

/// Everything needed to turn one kind's records into markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerStyle {
    pub radius: RadiusConfig,
    pub coloring: Coloring,
    pub buckets: ClassificationTable,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayersConfig {
    pub country: LayerStyle,
    pub prefecture: LayerStyle,
    pub company: LayerStyle,
    pub municipality: LayerStyle,
}

impl LayersConfig {
    pub fn get(&self, kind: DatasetKind) -> &LayerStyle {
        match kind {
            DatasetKind::Country => &self.country,
            DatasetKind::Prefecture => &self.prefecture,
            DatasetKind::Company => &self.company,
            DatasetKind::Municipality => &self.municipality,
        }
    }
}

impl Default for LayersConfig {
    fn default() -> Self {
        Self {
            country: LayerStyle {
                radius: RadiusConfig::dataset_relative(10.0, 60.0),
                coloring: Coloring::Gradient,
                buckets: table(&[
                    (25e12, 0xef4444),
                    (5e12, 0xeab308),
                    (1e12, 0x22c55e),
                    (0.0, 0x3b82f6),
                ]),
                share: ShareConfig {
                    reference: ShareReference::DatasetSum,
                    precision: 1,
                },
            },
            prefecture: LayerStyle {
                radius: RadiusConfig::fixed_log(5.0, 50.0, 1000.0, 8.0),
                coloring: Coloring::Buckets,
                buckets: table(&[
                    (100.0, 0x800026),
                    (50.0, 0xbd0026),
                    (30.0, 0xe31a1c),
                    (20.0, 0xfc4e2a),
                    (15.0, 0xfd8d3c),
                    (10.0, 0xfeb24c),
                    (5.0, 0xfed976),
                    (0.0, 0xffeda0),
                ]),
                share: ShareConfig {
                    reference: ShareReference::DatasetSum,
                    precision: 1,
                },
            },
            company: LayerStyle {
                radius: RadiusConfig::fixed_log(3.0, 40.0, 1.0, 5.0),
                coloring: Coloring::Buckets,
                buckets: table(&[
                    (30e6, 0x4a0e4e),
                    (20e6, 0x762a83),
                    (15e6, 0x9970ab),
                    (10e6, 0xc2a5cf),
                    (5e6, 0xe7d4e8),
                    (1e6, 0xd9f0d3),
                    (0.5e6, 0xa6dba0),
                    (0.0, 0x5aae61),
                ]),
                share: ShareConfig {
                    reference: ShareReference::Fixed {
                        total: JAPAN_GDP_MILLION_YEN,
                    },
                    precision: 2,
                },
            },
            municipality: LayerStyle {
                radius: RadiusConfig::fixed_log(3.0, 35.0, 1.0, 4.0),
                coloring: Coloring::Buckets,
                buckets: table(&[
                    (400e6, 0x08519c),
                    (150e6, 0x3182bd),
                    (100e6, 0x6baed6),
                    (70e6, 0x9ecae1),
                    (50e6, 0xc6dbef),
                    (30e6, 0xdeebf7),
                    (0.0, 0xf7fbff),
                ]),
                share: ShareConfig {
                    reference: ShareReference::Fixed {
                        total: JAPAN_GDP_MILLION_YEN,
                    },
                    precision: 2,
                },
            },
        }
    }
}

/// Built-in tables; their validity is checked by `test_defaults_are_valid`.
fn table(rows: &[(f64, u32)]) -> ClassificationTable {
    ClassificationTable::from_trusted(
        rows.iter()
            .map(|&(bound, rgb)| Bucket {
                bound,
                color: Rgb::from_u32(rgb),
            })
            .collect(),
    )
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the parts serde cannot: radius bounds, zoom thresholds and
    /// scale factors.
    pub fn validate(&self) -> Result<()> {
        self.view.thresholds.validate()?;
        for kind in DatasetKind::ALL {
            self.layers.get(kind).radius.validate()?;
        }
        if !(self.map.marker_scale > 0.0 && self.map.marker_scale.is_finite()) {
            return Err(Error::InvalidRadius(format!(
                "marker_scale must be positive, got {}",
                self.map.marker_scale
            )));
        }
        Ok(())
    }
}
