use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family of entities a dataset holds. Selects units, radius config
/// and classification table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Country,
    Prefecture,
    Company,
    Municipality,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Country,
        DatasetKind::Prefecture,
        DatasetKind::Company,
        DatasetKind::Municipality,
    ];

    /// Endpoint / file stem, e.g. `countries` for `countries.json`
    pub fn endpoint(self) -> &'static str {
        match self {
            DatasetKind::Country => "countries",
            DatasetKind::Prefecture => "prefectures",
            DatasetKind::Company => "companies",
            DatasetKind::Municipality => "municipalities",
        }
    }

    /// Unit the magnitude is expressed in
    pub fn unit(self) -> &'static str {
        match self {
            DatasetKind::Country => "USD",
            DatasetKind::Prefecture => "trillion yen",
            DatasetKind::Company | DatasetKind::Municipality => "million yen",
        }
    }

    /// What the secondary count measures
    pub fn secondary_label(self) -> &'static str {
        match self {
            DatasetKind::Company => "employees",
            _ => "population",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatasetKind::Country => "country",
            DatasetKind::Prefecture => "prefecture",
            DatasetKind::Company => "company",
            DatasetKind::Municipality => "municipality",
        };
        f.write_str(name)
    }
}

/// Latitude/longitude in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Returns `None` unless both values are finite and inside WGS84 range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }
}

/// One visualizable entity: a country, prefecture, company or municipality.
#[derive(Clone, Debug, PartialEq)]
pub struct MagnitudeRecord {
    /// Stable identifier (ISO3 code for countries, the name otherwise)
    pub id: String,
    pub name: String,
    pub kind: DatasetKind,
    /// Non-negative value in the kind's unit. Missing values load as 0.
    pub magnitude: f64,
    /// Population or employee count; display only
    pub secondary: Option<f64>,
    /// Per-capita or per-employee figure as supplied by the source
    pub per_unit: Option<f64>,
    /// Region (countries) or prefecture (companies)
    pub group: Option<String>,
    pub coordinates: Coordinates,
}

impl MagnitudeRecord {
    /// Per-capita (or per-employee) value: the supplied figure when present,
    /// otherwise magnitude / secondary.
    pub fn per_unit_value(&self) -> Option<f64> {
        self.per_unit.filter(|v| v.is_finite()).or_else(|| {
            self.secondary
                .filter(|&s| s > 0.0 && self.magnitude > 0.0)
                .map(|s| self.magnitude / s)
        })
    }
}

/// The active record set plus the statistics derived from it.
///
/// Built once per load or view switch; all scaling against "the dataset"
/// reads these cached values.
#[derive(Clone, Debug)]
pub struct DatasetContext {
    kind: DatasetKind,
    records: Vec<MagnitudeRecord>,
    /// Smallest positive magnitude (0 when there is none)
    min: f64,
    max: f64,
    total: f64,
}

impl DatasetContext {
    pub fn new(kind: DatasetKind, records: Vec<MagnitudeRecord>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = 0.0_f64;
        let mut total = 0.0;
        for record in &records {
            let m = record.magnitude;
            if m > 0.0 && m.is_finite() {
                min = min.min(m);
                max = max.max(m);
                total += m;
            }
        }
        if !min.is_finite() {
            min = 0.0;
        }

        Self {
            kind,
            records,
            min,
            max,
            total,
        }
    }

    pub fn empty(kind: DatasetKind) -> Self {
        Self::new(kind, Vec::new())
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn records(&self) -> &[MagnitudeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Sum of all positive magnitudes
    pub fn total(&self) -> f64 {
        self.total
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(kind: DatasetKind, name: &str, magnitude: f64) -> MagnitudeRecord {
        MagnitudeRecord {
            id: name.to_string(),
            name: name.to_string(),
            kind,
            magnitude,
            secondary: None,
            per_unit: None,
            group: None,
            coordinates: Coordinates { lat: 35.0, lon: 139.0 },
        }
    }

    pub(crate) fn context(kind: DatasetKind, magnitudes: &[f64]) -> DatasetContext {
        let records = magnitudes
            .iter()
            .enumerate()
            .map(|(i, &m)| record(kind, &format!("r{i}"), m))
            .collect();
        DatasetContext::new(kind, records)
    }

    #[test]
    fn test_context_stats_skip_zero() {
        let ctx = context(DatasetKind::Country, &[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(ctx.min(), 10.0);
        assert_eq!(ctx.max(), 30.0);
        assert_eq!(ctx.total(), 60.0);
        assert_eq!(ctx.len(), 4);
    }

    #[test]
    fn test_empty_context() {
        let ctx = DatasetContext::empty(DatasetKind::Prefecture);
        assert!(ctx.is_empty());
        assert_eq!(ctx.min(), 0.0);
        assert_eq!(ctx.max(), 0.0);
        assert_eq!(ctx.total(), 0.0);
    }

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(35.6, 139.6).is_some());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
        assert!(Coordinates::new(91.0, 0.0).is_none());
        assert!(Coordinates::new(0.0, -181.0).is_none());
    }

    #[test]
    fn test_per_unit_prefers_supplied_value() {
        let mut r = record(DatasetKind::Company, "Nintendo", 1_700_000.0);
        r.secondary = Some(7_000.0);
        assert!((r.per_unit_value().unwrap() - 242.857).abs() < 0.001);
        r.per_unit = Some(242.9);
        assert_eq!(r.per_unit_value(), Some(242.9));
    }
}
