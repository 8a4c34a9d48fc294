//! Label text for markers, tooltips and the summary table.

use crate::record::{DatasetKind, MagnitudeRecord};

/// Compact magnitude: `25T`, `818B`, `12M`, `3K`
pub fn format_short(value: f64) -> String {
    if value >= 1e12 {
        format!("{:.0}T", value / 1e12)
    } else if value >= 1e9 {
        format!("{:.0}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

/// Legend bound in the kind's currency, e.g. `$25T`, `¥100T`, `¥500B`
pub fn format_bound(kind: DatasetKind, value: f64) -> String {
    match kind {
        DatasetKind::Country => format!("${}", format_short(value)),
        DatasetKind::Prefecture => format!("¥{value}T"),
        // million yen
        DatasetKind::Company | DatasetKind::Municipality => format!("¥{}", format_short(value * 1e6)),
    }
}

/// Magnitude with its unit, scaled to something readable
pub fn format_magnitude(kind: DatasetKind, value: f64) -> String {
    match kind {
        DatasetKind::Country => {
            if value >= 1e12 {
                format!("${:.1} trillion", value / 1e12)
            } else if value >= 1e9 {
                format!("${:.0} billion", value / 1e9)
            } else {
                format!("${}", group_thousands(value))
            }
        }
        DatasetKind::Prefecture => format!("¥{value} trillion"),
        DatasetKind::Company | DatasetKind::Municipality => {
            // million yen -> trillion yen past one trillion
            if value >= 1e6 {
                format!("¥{:.2} trillion", value / 1e6)
            } else {
                format!("¥{} million", group_thousands(value))
            }
        }
    }
}

/// Whole number with `,` thousands separators
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Per-capita / per-employee figure with the kind's unit
pub fn format_per_unit(record: &MagnitudeRecord) -> Option<String> {
    let value = record.per_unit_value()?;
    Some(match record.kind {
        DatasetKind::Country => format!("${} per capita", group_thousands(value)),
        DatasetKind::Prefecture => format!("¥{value:.2}M per capita"),
        DatasetKind::Municipality => format!("¥{value:.1}M per capita"),
        DatasetKind::Company => format!("¥{value:.1}M per employee"),
    })
}

/// Marker label, truncated to `max_chars` with a trailing `…`
pub fn short_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = name.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_short() {
        assert_eq!(format_short(25_462_700_000_000.0), "25T");
        assert_eq!(format_short(818_000_000_000.0), "818B");
        assert_eq!(format_short(12_400_000.0), "12M");
        assert_eq!(format_short(3_200.0), "3K");
        assert_eq!(format_short(0.0), "0");
    }

    #[test]
    fn test_format_bound() {
        assert_eq!(format_bound(DatasetKind::Country, 25e12), "$25T");
        assert_eq!(format_bound(DatasetKind::Prefecture, 15.0), "¥15T");
        assert_eq!(format_bound(DatasetKind::Company, 0.5e6), "¥500B");
        assert_eq!(format_bound(DatasetKind::Municipality, 0.0), "¥0");
    }

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(DatasetKind::Country, 4.9409e12), "$4.9 trillion");
        assert_eq!(format_magnitude(DatasetKind::Country, 4.1e11), "$410 billion");
        assert_eq!(format_magnitude(DatasetKind::Prefecture, 104.3), "¥104.3 trillion");
        assert_eq!(format_magnitude(DatasetKind::Company, 31_379_152.0), "¥31.38 trillion");
        assert_eq!(format_magnitude(DatasetKind::Company, 470_000.0), "¥470,000 million");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(14_047_594.0), "14,047,594");
        assert_eq!(group_thousands(-1_234.4), "-1,234");
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Japan", 8), "Japan");
        assert_eq!(short_name("United Arab Emirates", 8), "United …");
    }
}
