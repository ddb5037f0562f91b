use colored::{ColoredString, Colorize};

use crate::{
    stats::{self, ChartSlice, GenderStats},
    types::Gender,
};

const BAR_WIDTH: usize = 50;

/// Horizontal stacked bar standing in for the pie chart, followed by a
/// legend. `None` when there is nothing to draw.
pub fn render(stats: &GenderStats) -> Option<String> {
    let slices = stats::chart_slices(stats);
    if slices.is_empty() {
        return None;
    }

    let widths = segment_widths(&slices, BAR_WIDTH);
    let bar: String = slices
        .iter()
        .zip(widths)
        .map(|(slice, width)| paint(slice.gender, &"█".repeat(width)).to_string())
        .collect();

    let legend = slices
        .iter()
        .map(|s| {
            format!(
                "{} {} {}% ({} artists)",
                paint(s.gender, "●"),
                s.gender.label(),
                s.share,
                s.value
            )
        })
        .collect::<Vec<_>>()
        .join("   ");

    Some(format!("Gender distribution\n{}\n{}\n", bar, legend))
}

/// Splits `width` cells between slices proportionally. Every slice gets at
/// least one cell and the widths always add up to `width`.
pub fn segment_widths(slices: &[ChartSlice], width: usize) -> Vec<usize> {
    let total: usize = slices.iter().map(|s| s.value).sum();
    if total == 0 || slices.is_empty() {
        return vec![0; slices.len()];
    }

    let mut widths: Vec<usize> = slices
        .iter()
        .map(|s| ((s.value * width) as f64 / total as f64).round().max(1.0) as usize)
        .collect();

    // Rounding can overshoot or undershoot; settle the difference on the
    // widest segment.
    let sum: usize = widths.iter().sum();
    if let Some(widest) = (0..widths.len()).max_by_key(|&i| widths[i]) {
        if sum > width {
            widths[widest] = widths[widest].saturating_sub(sum - width).max(1);
        } else {
            widths[widest] += width - sum;
        }
    }
    widths
}

fn paint(gender: Gender, text: &str) -> ColoredString {
    match gender {
        Gender::Male => text.blue(),
        Gender::Female => text.magenta(),
        Gender::Unknown => text.bright_black(),
    }
}
