//! Display filters used by impact cards and chart tooltips.

/// Fraction to percent text: `0.253` with 1 decimal gives `"25.3%"`.
pub fn format_percentage(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Compact count with a B/M/K suffix and one decimal, e.g. `"2.1B"`.
///
/// Values below one thousand are printed as-is.
pub fn format_large_number(value: f64) -> String {
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value}")
    }
}
