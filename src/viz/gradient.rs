use crate::record::DatasetContext;
use crate::viz::color::Rgb;

/// Position of `magnitude` in the dataset's log range, in [0, 1].
///
/// `None` for magnitudes without data. A degenerate range (no positive
/// magnitudes, or all equal) maps everything to 0.
pub fn log_position(magnitude: f64, ctx: &DatasetContext) -> Option<f64> {
    if !(magnitude > 0.0) {
        return None;
    }
    let (min, max) = (ctx.min(), ctx.max());
    if !(min > 0.0) || max <= min {
        return Some(0.0);
    }
    let t = (magnitude.ln() - min.ln()) / (max.ln() - min.ln());
    Some(if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 })
}

/// Four-stop ramp blue -> green -> yellow -> orange -> red over the
/// dataset's log range. Used for the world map.
pub fn gradient_color(magnitude: f64, ctx: &DatasetContext) -> Rgb {
    match log_position(magnitude, ctx) {
        Some(t) => ramp(t),
        None => Rgb::NEUTRAL,
    }
}

/// Ramp color at position `t` in [0, 1]
pub fn ramp(t: f64) -> Rgb {
    let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    if t < 0.25 {
        let r = t / 0.25;
        Rgb::new(channel(100.0 * r), channel(100.0 + 155.0 * r), 255)
    } else if t < 0.5 {
        let r = (t - 0.25) / 0.25;
        Rgb::new(channel(100.0 + 155.0 * r), 255, channel(255.0 - 255.0 * r))
    } else if t < 0.75 {
        let r = (t - 0.5) / 0.25;
        Rgb::new(255, channel(255.0 - 100.0 * r), 0)
    } else {
        let r = (t - 0.75) / 0.25;
        Rgb::new(255, channel(155.0 - 155.0 * r), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::context;
    use crate::record::DatasetKind;

    #[test]
    fn test_ramp_stops() {
        assert_eq!(ramp(0.0), Rgb::new(0, 100, 255));
        assert_eq!(ramp(0.25), Rgb::new(100, 255, 255));
        assert_eq!(ramp(0.5), Rgb::new(255, 255, 0));
        assert_eq!(ramp(0.75), Rgb::new(255, 155, 0));
        assert_eq!(ramp(1.0), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_gradient_over_dataset() {
        let ctx = context(DatasetKind::Country, &[1e9, 1e11]);
        assert_eq!(gradient_color(1e9, &ctx), Rgb::new(0, 100, 255));
        assert_eq!(gradient_color(1e11, &ctx), Rgb::new(255, 0, 0));
        assert_eq!(gradient_color(1e10, &ctx), Rgb::new(255, 255, 0));
        assert_eq!(gradient_color(0.0, &ctx), Rgb::NEUTRAL);
    }

    #[test]
    fn test_degenerate_range() {
        let ctx = context(DatasetKind::Country, &[5.0, 5.0]);
        assert_eq!(log_position(5.0, &ctx), Some(0.0));
        assert_eq!(log_position(0.0, &ctx), None);
    }
}
