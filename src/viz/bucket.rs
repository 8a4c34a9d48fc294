use crate::error::{Error, Result};
use crate::viz::color::Rgb;
use serde::{Deserialize, Serialize};

/// One threshold row: magnitudes at or above `bound` take `color`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub bound: f64,
    pub color: Rgb,
}

/// Ordered `(lower bound inclusive, color)` rows, strictly descending,
/// ending with the catch-all bound 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bucket>", into = "Vec<Bucket>")]
pub struct ClassificationTable {
    buckets: Vec<Bucket>,
}

/// A legend row: `[lower, upper)` with `upper == None` for the top bucket
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: Rgb,
}

impl ClassificationTable {
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        let last = buckets.last().ok_or(Error::EmptyTable)?;
        if last.bound != 0.0 {
            return Err(Error::MissingCatchAll(last.bound));
        }
        for bucket in &buckets {
            if !(bucket.bound >= 0.0 && bucket.bound.is_finite()) {
                return Err(Error::InvalidBound(bucket.bound));
            }
            if bucket.color == Rgb::NEUTRAL {
                return Err(Error::SentinelCollision(bucket.color.to_hex()));
            }
        }
        for pair in buckets.windows(2) {
            if pair[1].bound >= pair[0].bound {
                return Err(Error::UnorderedBounds {
                    previous: pair[0].bound,
                    next: pair[1].bound,
                });
            }
        }
        Ok(Self { buckets })
    }

    /// Skips validation; only for the built-in tables, which are covered by
    /// tests.
    pub(crate) fn from_trusted(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    /// Build from `(bound, "#rrggbb")` pairs
    pub fn from_hex(rows: &[(f64, &str)]) -> Result<Self> {
        let buckets = rows
            .iter()
            .map(|&(bound, hex)| Ok(Bucket { bound, color: Rgb::from_hex(hex)? }))
            .collect::<Result<Vec<_>>>()?;
        Self::new(buckets)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.buckets.iter().map(|b| b.color)
    }

    /// Rows for a legend, highest bucket first
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut upper = None;
        self.buckets
            .iter()
            .map(|b| {
                let entry = LegendEntry {
                    lower: b.bound,
                    upper,
                    color: b.color,
                };
                upper = Some(b.bound);
                entry
            })
            .collect()
    }
}

impl TryFrom<Vec<Bucket>> for ClassificationTable {
    type Error = Error;

    fn try_from(value: Vec<Bucket>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ClassificationTable> for Vec<Bucket> {
    fn from(value: ClassificationTable) -> Self {
        value.buckets
    }
}

/// Color of the first bucket whose bound does not exceed `magnitude`.
///
/// Zero, negative and NaN magnitudes mean "no data" and get
/// [`Rgb::NEUTRAL`] rather than the lowest bucket.
pub fn classify(magnitude: f64, table: &ClassificationTable) -> Rgb {
    if !(magnitude > 0.0) {
        return Rgb::NEUTRAL;
    }
    table
        .buckets
        .iter()
        .find(|b| b.bound <= magnitude)
        .or(table.buckets.last())
        .map_or(Rgb::NEUTRAL, |b| b.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: Rgb = Rgb::new(0xaa, 0, 0);
    const B: Rgb = Rgb::new(0, 0xbb, 0);
    const C: Rgb = Rgb::new(0, 0, 0xcc);

    fn abc() -> ClassificationTable {
        ClassificationTable::new(vec![
            Bucket { bound: 100.0, color: A },
            Bucket { bound: 50.0, color: B },
            Bucket { bound: 0.0, color: C },
        ])
        .unwrap()
    }

    #[test]
    fn test_three_bucket_scenario() {
        let table = abc();
        assert_eq!(classify(75.0, &table), B);
        assert_eq!(classify(100.0, &table), A);
        assert_eq!(classify(0.0, &table), Rgb::NEUTRAL);
        assert_eq!(classify(49.999, &table), C);
        assert_eq!(classify(1e9, &table), A);
    }

    #[test]
    fn test_missing_magnitude_is_neutral() {
        let table = abc();
        assert_eq!(classify(f64::NAN, &table), Rgb::NEUTRAL);
        assert_eq!(classify(-1.0, &table), Rgb::NEUTRAL);
    }

    #[test]
    fn test_boundaries() {
        let table = abc();
        for bucket in table.buckets().iter().filter(|b| b.bound > 0.0) {
            assert_eq!(classify(bucket.bound, &table), bucket.color);
            assert_ne!(classify(bucket.bound - 1e-9, &table), bucket.color);
        }
    }

    #[test]
    fn test_prefecture_table() {
        let table = ClassificationTable::from_hex(&[
            (100.0, "#800026"),
            (50.0, "#BD0026"),
            (30.0, "#E31A1C"),
            (20.0, "#FC4E2A"),
            (15.0, "#FD8D3C"),
            (10.0, "#FEB24C"),
            (5.0, "#FED976"),
            (0.0, "#FFEDA0"),
        ])
        .unwrap();
        assert_eq!(classify(104.3, &table).to_hex(), "#800026");
        assert_eq!(classify(39.4, &table).to_hex(), "#e31a1c");
        assert_eq!(classify(2.2, &table).to_hex(), "#ffeda0");
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(ClassificationTable::new(vec![]), Err(Error::EmptyTable)));
        assert!(matches!(
            ClassificationTable::from_hex(&[(10.0, "#aa0000"), (5.0, "#00bb00")]),
            Err(Error::MissingCatchAll(_))
        ));
        assert!(matches!(
            ClassificationTable::from_hex(&[(10.0, "#aa0000"), (10.0, "#00bb00"), (0.0, "#0000cc")]),
            Err(Error::UnorderedBounds { .. })
        ));
        assert!(matches!(
            ClassificationTable::from_hex(&[(10.0, "#cccccc"), (0.0, "#0000cc")]),
            Err(Error::SentinelCollision(_))
        ));
        assert!(matches!(
            ClassificationTable::from_hex(&[(f64::INFINITY, "#aa0000"), (0.0, "#0000cc")]),
            Err(Error::InvalidBound(_))
        ));
    }

    #[test]
    fn test_legend_ranges() {
        let legend = abc().legend();
        assert_eq!(legend.len(), 3);
        assert_eq!((legend[0].lower, legend[0].upper), (100.0, None));
        assert_eq!((legend[1].lower, legend[1].upper), (50.0, Some(100.0)));
        assert_eq!((legend[2].lower, legend[2].upper), (0.0, Some(50.0)));
    }

    proptest! {
        #[test]
        fn classify_is_total(magnitude in 0.0f64..1e6) {
            let table = abc();
            let color = classify(magnitude, &table);
            prop_assert!(color == Rgb::NEUTRAL || table.colors().any(|c| c == color));
            if magnitude > 0.0 {
                prop_assert_ne!(color, Rgb::NEUTRAL);
            }
        }
    }
}
