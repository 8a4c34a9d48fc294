//! Static datasets used when the API data cannot be read.
//!
//! The arrays live in `data/fallback/` as envelope JSON, the same shape the
//! API serves, and are compiled into the binary.

use super::api;
use crate::record::{DatasetKind, MagnitudeRecord};
use tracing::error;

const COUNTRIES: &str = include_str!("../../data/fallback/countries.json");
const PREFECTURES: &str = include_str!("../../data/fallback/prefectures.json");
const COMPANIES: &str = include_str!("../../data/fallback/companies.json");
const MUNICIPALITIES: &str = include_str!("../../data/fallback/municipalities.json");

pub fn fallback_body(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Country => COUNTRIES,
        DatasetKind::Prefecture => PREFECTURES,
        DatasetKind::Company => COMPANIES,
        DatasetKind::Municipality => MUNICIPALITIES,
    }
}

/// Decode the embedded array for `kind`. An unreadable array (a packaging
/// bug) is logged and yields no records rather than failing the render.
pub fn fallback_records(kind: DatasetKind) -> Vec<MagnitudeRecord> {
    let mut body = fallback_body(kind).as_bytes().to_vec();
    match api::decode(kind, &mut body) {
        Ok(Ok(records)) => records,
        Ok(Err(rejection)) => {
            error!(%kind, ?rejection, "embedded fallback data rejected");
            Vec::new()
        }
        Err(e) => {
            error!(%kind, error = %e, "embedded fallback data unreadable");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fallback_decodes() {
        for kind in DatasetKind::ALL {
            let records = fallback_records(kind);
            assert!(!records.is_empty(), "{kind} fallback is empty");
            assert!(records.iter().all(|r| r.kind == kind && r.magnitude > 0.0));
        }
    }

    #[test]
    fn test_fallback_sizes() {
        assert_eq!(fallback_records(DatasetKind::Country).len(), 50);
        assert_eq!(fallback_records(DatasetKind::Prefecture).len(), 47);
        assert_eq!(fallback_records(DatasetKind::Municipality).len(), 14);
    }

    #[test]
    fn test_tokyo_is_largest_prefecture() {
        let records = fallback_records(DatasetKind::Prefecture);
        let largest = records
            .iter()
            .max_by(|a, b| a.magnitude.total_cmp(&b.magnitude))
            .unwrap();
        assert_eq!(largest.name, "Tokyo");
        assert_eq!(largest.magnitude, 104.3);
    }
}
