//! Render attributes for every record of a dataset.

use crate::config::{Coloring, LayerStyle};
use crate::record::{Coordinates, DatasetContext};
use crate::viz::{classify, format_share, gradient_color, scale_radius, share_of_total, Rgb};
use rayon::prelude::*;

/// What the map draws for one record
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    /// Index of the record in its [`DatasetContext`]
    pub index: usize,
    pub coordinates: Coordinates,
    /// Radius in the layer's radius units (web-map screen pixels)
    pub radius: f64,
    pub color: Rgb,
    pub share: f64,
    pub share_text: String,
}

/// Compute radius, color and share for each record.
///
/// Markers come back largest first so that smaller ones are drawn on top.
pub fn build_markers(ctx: &DatasetContext, style: &LayerStyle) -> Vec<Marker> {
    let total = style.share.reference.resolve(ctx);
    let precision = style.share.precision;

    let mut markers: Vec<Marker> = ctx
        .records()
        .par_iter()
        .enumerate()
        .map(|(index, record)| {
            let m = record.magnitude;
            let color = match style.coloring {
                Coloring::Buckets => classify(m, &style.buckets),
                Coloring::Gradient => gradient_color(m, ctx),
            };
            let share = share_of_total(m, total, precision);
            Marker {
                index,
                coordinates: record.coordinates,
                radius: scale_radius(m, ctx, &style.radius),
                color,
                share,
                share_text: format!("{}%", format_share(share, precision)),
            }
        })
        .collect();

    markers.sort_by(|a, b| b.radius.total_cmp(&a.radius));
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayersConfig;
    use crate::dataset::fallback::fallback_records;
    use crate::record::tests::context;
    use crate::record::DatasetKind;

    #[test]
    fn test_prefecture_markers() {
        let layers = LayersConfig::default();
        let ctx = context(DatasetKind::Prefecture, &[10.0, 20.0, 30.0]);
        let markers = build_markers(&ctx, &layers.prefecture);

        assert_eq!(markers.len(), 3);
        // largest first
        assert_eq!(markers[0].index, 2);
        assert_eq!(markers[0].share_text, "50.0%");
        assert!(markers.windows(2).all(|w| w[0].radius >= w[1].radius));
        // log10(30 * 1000) * 8 ~ 35.8
        assert!((markers[0].radius - (30_000f64).log10() * 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_magnitude_is_neutral_and_minimal() {
        let layers = LayersConfig::default();
        let ctx = context(DatasetKind::Municipality, &[0.0, 1_000_000.0]);
        let markers = build_markers(&ctx, &layers.municipality);
        let zero = markers.iter().find(|m| m.index == 0).unwrap();
        assert_eq!(zero.color, Rgb::NEUTRAL);
        assert_eq!(zero.radius, layers.municipality.radius.min_radius);
        assert_eq!(zero.share_text, "0.00%");
    }

    #[test]
    fn test_world_markers_use_gradient() {
        let layers = LayersConfig::default();
        let ctx = DatasetContext::new(DatasetKind::Country, fallback_records(DatasetKind::Country));
        let markers = build_markers(&ctx, &layers.country);
        assert_eq!(markers.len(), ctx.len());
        // the largest economy sits at the top of the ramp
        assert_eq!(markers[0].color, gradient_color(ctx.max(), &ctx));
        assert_eq!(markers[0].radius, layers.country.radius.max_radius);
        let shares: f64 = markers.iter().map(|m| m.share).sum();
        assert!((shares - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_company_share_uses_national_reference() {
        let layers = LayersConfig::default();
        let ctx = context(DatasetKind::Company, &[31_379_152.0]);
        let markers = build_markers(&ctx, &layers.company);
        assert_eq!(markers[0].share_text, "5.81%");
    }
}
