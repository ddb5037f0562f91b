//! Small helpers shared by the CLI and the view: clap value parsers and
//! number and text formatting.

use crate::types::{GenderFilter, TimeRange};

/// clap value parser for `--range`.
pub fn parse_time_range(input: &str) -> Result<TimeRange, String> {
    if input.trim().is_empty() {
        return Err("time range cannot be empty".to_string());
    }
    input.parse()
}

/// clap value parser for `--filter`.
pub fn parse_gender_filter(input: &str) -> Result<GenderFilter, String> {
    if input.trim().is_empty() {
        return Err("filter cannot be empty".to_string());
    }
    input.parse()
}

/// Rounds `value` half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Compact follower counts: 950, 12.3K, 4.1M.
///
/// Rounds to one decimal before picking the unit, so 999 950 reads `1.0M`
/// rather than `1000.0K`.
pub fn human_count(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }

    let tenths_of_k = (n + 50) / 100;
    if tenths_of_k < 10_000 {
        return format!("{}.{}K", tenths_of_k / 10, tenths_of_k % 10);
    }

    let tenths_of_m = (n + 50_000) / 100_000;
    format!("{}.{}M", tenths_of_m / 10, tenths_of_m % 10)
}
