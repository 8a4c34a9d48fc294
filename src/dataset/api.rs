//! Row shapes of the economic data API and their conversion into
//! [`MagnitudeRecord`]s.

use crate::error::{Error, Result};
use crate::record::{Coordinates, DatasetKind, MagnitudeRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// `{ "status": "success", "data": [...] }`. Error bodies carry no status
/// and deserialize with an empty one.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    pub data: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRow {
    pub countryiso3code: String,
    pub name: String,
    pub gdp_current_usd: Option<f64>,
    pub population: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub region: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrefectureRow {
    pub name: String,
    pub gdp_trillion_yen: Option<f64>,
    pub population: Option<f64>,
    pub gdp_per_capita: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRow {
    pub name: String,
    pub revenue_million_yen: Option<f64>,
    pub employees: Option<f64>,
    pub prefecture: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub revenue_per_employee: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MunicipalityRow {
    pub municipality_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: Option<f64>,
    pub gdp_million_yen: Option<f64>,
    pub gdp_per_capita: Option<f64>,
}

/// Fields every row shape can produce
struct RowFields {
    id: String,
    name: String,
    magnitude: Option<f64>,
    secondary: Option<f64>,
    per_unit: Option<f64>,
    group: Option<String>,
    lat: f64,
    lon: f64,
}

impl From<CountryRow> for RowFields {
    fn from(row: CountryRow) -> Self {
        Self {
            id: row.countryiso3code,
            name: row.name,
            magnitude: row.gdp_current_usd,
            secondary: row.population,
            per_unit: row.gdp_per_capita,
            group: row.region,
            lat: row.lat,
            lon: row.lng,
        }
    }
}

impl From<PrefectureRow> for RowFields {
    fn from(row: PrefectureRow) -> Self {
        Self {
            id: row.name.clone(),
            name: row.name,
            magnitude: row.gdp_trillion_yen,
            secondary: row.population,
            per_unit: row.gdp_per_capita,
            group: None,
            lat: row.latitude,
            lon: row.longitude,
        }
    }
}

impl From<CompanyRow> for RowFields {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.name.clone(),
            name: row.name,
            magnitude: row.revenue_million_yen,
            secondary: row.employees,
            per_unit: row.revenue_per_employee,
            group: row.prefecture,
            lat: row.latitude,
            lon: row.longitude,
        }
    }
}

impl From<MunicipalityRow> for RowFields {
    fn from(row: MunicipalityRow) -> Self {
        Self {
            id: row.municipality_name.clone(),
            name: row.municipality_name,
            magnitude: row.gdp_million_yen,
            secondary: row.population,
            per_unit: row.gdp_per_capita,
            group: None,
            lat: row.latitude,
            lon: row.longitude,
        }
    }
}

impl RowFields {
    fn into_record(self, kind: DatasetKind) -> Option<MagnitudeRecord> {
        let Some(coordinates) = Coordinates::new(self.lat, self.lon) else {
            warn!(%kind, name = %self.name, lat = self.lat, lon = self.lon, "dropping record with invalid coordinates");
            return None;
        };
        let magnitude = self
            .magnitude
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(0.0);

        Some(MagnitudeRecord {
            id: self.id,
            name: self.name,
            kind,
            magnitude,
            secondary: self.secondary.filter(|s| s.is_finite() && *s >= 0.0),
            per_unit: self.per_unit.filter(|v| v.is_finite()),
            group: self.group.filter(|g| !g.is_empty()),
            coordinates,
        })
    }
}

/// Why an envelope produced no records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Status(String),
    NoData,
}

/// Records from a well-formed envelope, or why it carried none
pub type Decoded = std::result::Result<Vec<MagnitudeRecord>, Rejection>;

/// Decode an envelope body for `kind`.
///
/// `Ok(Err(_))` means the body parsed but the API reported failure or sent
/// no rows; `Err(_)` means the body is not a valid envelope.
pub fn decode(kind: DatasetKind, body: &mut [u8]) -> Result<Decoded> {
    match kind {
        DatasetKind::Country => decode_rows::<CountryRow>(kind, body),
        DatasetKind::Prefecture => decode_rows::<PrefectureRow>(kind, body),
        DatasetKind::Company => decode_rows::<CompanyRow>(kind, body),
        DatasetKind::Municipality => decode_rows::<MunicipalityRow>(kind, body),
    }
}

fn decode_rows<T>(kind: DatasetKind, body: &mut [u8]) -> Result<Decoded>
where
    T: DeserializeOwned + Into<RowFields>,
{
    let envelope: Envelope<T> = simd_json::serde::from_slice(body).map_err(|e| Error::Envelope {
        kind: kind.endpoint(),
        message: e.to_string(),
    })?;

    if !envelope.is_success() {
        return Ok(Err(Rejection::Status(envelope.status)));
    }
    let rows = match envelope.data {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Ok(Err(Rejection::NoData)),
    };

    Ok(Ok(rows
        .into_iter()
        .filter_map(|row| Into::<RowFields>::into(row).into_record(kind))
        .collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(kind: DatasetKind, json: &str) -> Result<Decoded> {
        let mut bytes = json.as_bytes().to_vec();
        decode(kind, &mut bytes)
    }

    #[test]
    fn test_decode_countries() {
        let records = decode_str(
            DatasetKind::Country,
            r#"{"status":"success","count":1,"data":[
                {"countryiso3code":"JPN","name":"Japan","gdp_current_usd":4940900000000,
                 "population":125800000,"gdp_per_capita":39285,"region":"East Asia & Pacific",
                 "lat":36.2048,"lng":138.2529}
            ]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(records.len(), 1);
        let japan = &records[0];
        assert_eq!(japan.id, "JPN");
        assert_eq!(japan.magnitude, 4.9409e12);
        assert_eq!(japan.secondary, Some(125_800_000.0));
        assert_eq!(japan.group.as_deref(), Some("East Asia & Pacific"));
        assert_eq!(japan.coordinates.lon, 138.2529);
    }

    #[test]
    fn test_missing_magnitude_loads_as_zero() {
        let records = decode_str(
            DatasetKind::Municipality,
            r#"{"status":"success","data":[
                {"municipality_name":"Naha","latitude":26.2125,"longitude":127.68111,"population":320000,"gdp_million_yen":null}
            ]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(records[0].magnitude, 0.0);
        assert_eq!(records[0].per_unit, None);
    }

    #[test]
    fn test_drops_invalid_coordinates() {
        let records = decode_str(
            DatasetKind::Company,
            r#"{"status":"success","data":[
                {"name":"A","revenue_million_yen":10,"latitude":35.0,"longitude":139.0},
                {"name":"B","revenue_million_yen":10,"latitude":135.0,"longitude":139.0}
            ]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            decode_str(DatasetKind::Prefecture, r#"{"status":"error","data":[]}"#).unwrap(),
            Err(Rejection::Status("error".into()))
        );
        assert_eq!(
            decode_str(DatasetKind::Prefecture, r#"{"error":"Prefecture data not found"}"#).unwrap(),
            Err(Rejection::Status(String::new()))
        );
        assert_eq!(
            decode_str(DatasetKind::Prefecture, r#"{"status":"success","data":[]}"#).unwrap(),
            Err(Rejection::NoData)
        );
    }

    #[test]
    fn test_success_without_data_field() {
        assert_eq!(
            decode_str(DatasetKind::Company, r#"{"status":"success"}"#).unwrap(),
            Err(Rejection::NoData)
        );
        assert_eq!(
            decode_str(DatasetKind::Municipality, r#"{"status":"success","data":null}"#).unwrap(),
            Err(Rejection::NoData)
        );
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            decode_str(DatasetKind::Country, "{not json"),
            Err(Error::Envelope { kind: "countries", .. })
        ));
    }
}
