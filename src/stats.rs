use crate::record::{DatasetContext, DatasetKind, MagnitudeRecord};

/// Aggregate figures for one dataset
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSummary {
    pub kind: DatasetKind,
    pub count: usize,
    pub total_magnitude: f64,
    /// Total population (or employees) over records that report one
    pub total_secondary: f64,
    /// Mean per-capita (per-employee) value over records where it is positive
    pub avg_per_unit: f64,
}

pub fn summarize(ctx: &DatasetContext) -> DatasetSummary {
    let total_secondary = ctx.records().iter().filter_map(|r| r.secondary).sum();

    let per_unit: Vec<f64> = ctx
        .records()
        .iter()
        .filter_map(MagnitudeRecord::per_unit_value)
        .filter(|&v| v > 0.0)
        .collect();
    let avg_per_unit = if per_unit.is_empty() {
        0.0
    } else {
        per_unit.iter().sum::<f64>() / per_unit.len() as f64
    };

    DatasetSummary {
        kind: ctx.kind(),
        count: ctx.len(),
        total_magnitude: ctx.total(),
        total_secondary,
        avg_per_unit,
    }
}

/// Narrow a dataset, e.g. companies in one prefecture above a revenue floor
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordFilter {
    /// Exact match on the record's group (prefecture for companies)
    pub group: Option<String>,
    pub min_magnitude: Option<f64>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.group.is_none() && self.min_magnitude.is_none()
    }

    pub fn matches(&self, record: &MagnitudeRecord) -> bool {
        let group_ok = self
            .group
            .as_deref()
            .is_none_or(|g| record.group.as_deref() == Some(g));
        let magnitude_ok = self.min_magnitude.is_none_or(|min| record.magnitude >= min);
        group_ok && magnitude_ok
    }

    /// New context holding only matching records; min/max/total are
    /// recomputed for the narrowed set.
    pub fn apply(&self, ctx: &DatasetContext) -> DatasetContext {
        if self.is_empty() {
            return ctx.clone();
        }
        let records = ctx
            .records()
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        DatasetContext::new(ctx.kind(), records)
    }
}
