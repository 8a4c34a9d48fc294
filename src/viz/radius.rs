use crate::error::{Error, Result};
use crate::record::DatasetContext;
use serde::{Deserialize, Serialize};

/// How a magnitude is turned into a radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScaleMode {
    /// Natural-log normalised against the dataset's live [min, max]
    DatasetRelative,
    /// `log10(magnitude * unit_factor) * slope`, independent of other records
    FixedLog { unit_factor: f64, slope: f64 },
}

/// Radius bounds and scaling mode for one dataset kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiusConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    #[serde(flatten)]
    pub mode: ScaleMode,
}

impl RadiusConfig {
    pub fn dataset_relative(min_radius: f64, max_radius: f64) -> Self {
        Self {
            min_radius,
            max_radius,
            mode: ScaleMode::DatasetRelative,
        }
    }

    pub fn fixed_log(min_radius: f64, max_radius: f64, unit_factor: f64, slope: f64) -> Self {
        Self {
            min_radius,
            max_radius,
            mode: ScaleMode::FixedLog { unit_factor, slope },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            min_radius,
            max_radius,
            mode,
        } = *self;
        if !(min_radius.is_finite() && max_radius.is_finite()) {
            return Err(Error::InvalidRadius("radius bounds must be finite".into()));
        }
        if min_radius <= 0.0 || min_radius >= max_radius {
            return Err(Error::InvalidRadius(format!(
                "need 0 < min_radius < max_radius, got {min_radius}..{max_radius}"
            )));
        }
        if let ScaleMode::FixedLog { unit_factor, slope } = mode {
            if !(unit_factor > 0.0 && unit_factor.is_finite() && slope > 0.0 && slope.is_finite()) {
                return Err(Error::InvalidRadius(format!(
                    "unit_factor and slope must be positive, got {unit_factor} and {slope}"
                )));
            }
        }
        Ok(())
    }
}

/// Map a magnitude to a marker radius within `[min_radius, max_radius]`.
///
/// Zero, negative and NaN magnitudes get `min_radius` without touching a
/// logarithm. In dataset-relative mode a dataset whose positive magnitudes
/// are all equal (or that has none) also yields `min_radius`.
pub fn scale_radius(magnitude: f64, ctx: &DatasetContext, config: &RadiusConfig) -> f64 {
    let (lo, hi) = (config.min_radius, config.max_radius);
    if !(magnitude > 0.0) {
        return lo;
    }

    let radius = match config.mode {
        ScaleMode::DatasetRelative => {
            let (min, max) = (ctx.min(), ctx.max());
            if !(min > 0.0) || max <= min {
                return lo;
            }
            let normalized = (magnitude.ln() - min.ln()) / (max.ln() - min.ln());
            lo + (hi - lo) * normalized
        }
        ScaleMode::FixedLog { unit_factor, slope } => (magnitude * unit_factor).log10() * slope,
    };

    if radius.is_finite() {
        radius.clamp(lo, hi)
    } else if radius > 0.0 {
        hi
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::context;
    use crate::record::DatasetKind;
    use proptest::prelude::*;

    fn prefecture() -> RadiusConfig {
        RadiusConfig::fixed_log(5.0, 50.0, 1000.0, 8.0)
    }

    #[test]
    fn test_zero_magnitude_is_min_radius() {
        let ctx = context(DatasetKind::Country, &[1.0, 100.0]);
        let world = RadiusConfig::dataset_relative(10.0, 60.0);
        assert_eq!(scale_radius(0.0, &ctx, &world), 10.0);
        assert_eq!(scale_radius(-3.0, &ctx, &world), 10.0);
        assert_eq!(scale_radius(f64::NAN, &ctx, &world), 10.0);
        assert_eq!(scale_radius(0.0, &ctx, &prefecture()), 5.0);
    }

    #[test]
    fn test_dataset_relative_endpoints() {
        let ctx = context(DatasetKind::Country, &[1e9, 1e10, 1e11]);
        let world = RadiusConfig::dataset_relative(10.0, 60.0);
        assert_eq!(scale_radius(1e9, &ctx, &world), 10.0);
        assert_eq!(scale_radius(1e11, &ctx, &world), 60.0);
        // 1e10 sits halfway in log space
        assert!((scale_radius(1e10, &ctx, &world) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_dataset_relative_equal_min_max() {
        let ctx = context(DatasetKind::Country, &[42.0, 42.0, 42.0]);
        let world = RadiusConfig::dataset_relative(10.0, 60.0);
        assert_eq!(scale_radius(42.0, &ctx, &world), 10.0);

        let empty = context(DatasetKind::Country, &[]);
        assert_eq!(scale_radius(42.0, &empty, &world), 10.0);
    }

    #[test]
    fn test_dataset_relative_clamps_outliers() {
        let ctx = context(DatasetKind::Country, &[10.0, 1000.0]);
        let world = RadiusConfig::dataset_relative(10.0, 60.0);
        assert_eq!(scale_radius(1.0, &ctx, &world), 10.0);
        assert_eq!(scale_radius(1e6, &ctx, &world), 60.0);
    }

    #[test]
    fn test_fixed_log_prefecture() {
        let ctx = context(DatasetKind::Prefecture, &[]);
        // Tokyo: log10(104.3 * 1000) * 8 = 40.146...
        let tokyo = scale_radius(104.3, &ctx, &prefecture());
        assert!((tokyo - 40.146).abs() < 0.01, "{tokyo}");
        // Tiny values clamp to the floor
        assert_eq!(scale_radius(0.001, &ctx, &prefecture()), 5.0);
    }

    #[test]
    fn test_fixed_log_company_caps_at_max() {
        let ctx = context(DatasetKind::Company, &[]);
        let company = RadiusConfig::fixed_log(3.0, 40.0, 1.0, 5.0);
        // log10(31_379_152) * 5 = 37.48
        assert!((scale_radius(31_379_152.0, &ctx, &company) - 37.48).abs() < 0.01);
        assert_eq!(scale_radius(1e12, &ctx, &company), 40.0);
    }

    #[test]
    fn test_validate() {
        assert!(prefecture().validate().is_ok());
        assert!(RadiusConfig::dataset_relative(0.0, 10.0).validate().is_err());
        assert!(RadiusConfig::dataset_relative(10.0, 10.0).validate().is_err());
        assert!(RadiusConfig::fixed_log(1.0, 10.0, 0.0, 1.0).validate().is_err());
        assert!(RadiusConfig::fixed_log(1.0, 10.0, 1.0, -1.0).validate().is_err());
    }

    proptest! {
        #[test]
        fn radius_stays_in_bounds(
            magnitudes in prop::collection::vec(0.0f64..1e13, 0..20),
            magnitude in 0.0f64..1e14,
        ) {
            let ctx = context(DatasetKind::Country, &magnitudes);
            for config in [RadiusConfig::dataset_relative(10.0, 60.0), prefecture()] {
                let r = scale_radius(magnitude, &ctx, &config);
                prop_assert!(r.is_finite());
                prop_assert!(r >= config.min_radius && r <= config.max_radius);
            }
        }

        #[test]
        fn radius_is_monotonic(
            magnitudes in prop::collection::vec(1.0f64..1e13, 1..20),
            a in 0.0f64..1e14,
            b in 0.0f64..1e14,
        ) {
            let ctx = context(DatasetKind::Country, &magnitudes);
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            for config in [RadiusConfig::dataset_relative(10.0, 60.0), prefecture()] {
                prop_assert!(scale_radius(small, &ctx, &config) <= scale_radius(large, &ctx, &config));
            }
        }

        #[test]
        fn radius_is_idempotent(
            magnitudes in prop::collection::vec(0.0f64..1e13, 0..20),
            magnitude in 0.0f64..1e14,
        ) {
            let ctx = context(DatasetKind::Country, &magnitudes);
            let config = RadiusConfig::dataset_relative(10.0, 60.0);
            prop_assert_eq!(scale_radius(magnitude, &ctx, &config), scale_radius(magnitude, &ctx, &config));
        }
    }
}
