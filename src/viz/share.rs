use crate::record::DatasetContext;
use serde::{Deserialize, Serialize};

/// What a record's magnitude is compared against when computing its share.
///
/// Countries and prefectures are compared to the sum of their peers;
/// companies and municipalities to a fixed national figure in the same
/// unit. Both are kept on purpose: the fixed reference can make shares
/// sum past 100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reference", rename_all = "snake_case")]
pub enum ShareReference {
    DatasetSum,
    Fixed { total: f64 },
}

impl ShareReference {
    pub fn resolve(&self, ctx: &DatasetContext) -> f64 {
        match *self {
            ShareReference::DatasetSum => ctx.total(),
            ShareReference::Fixed { total } => total,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(flatten)]
    pub reference: ShareReference,
    /// Decimal digits kept after rounding
    pub precision: u32,
}

/// Percentage of `total` taken by `magnitude`, rounded to `precision`
/// decimals. A zero (or otherwise unusable) total yields 0. Never negative,
/// not clamped at 100.
pub fn share_of_total(magnitude: f64, total: f64, precision: u32) -> f64 {
    if !(total > 0.0) || !total.is_finite() || !(magnitude > 0.0) {
        return 0.0;
    }
    let percent = magnitude / total * 100.0;
    let scale = 10f64.powi(precision.min(15) as i32);
    ((percent * scale).round() / scale).max(0.0)
}

/// Text form with exactly `precision` decimals, e.g. `50.0`
pub fn format_share(percent: f64, precision: u32) -> String {
    format!("{:.*}", precision as usize, percent)
}
