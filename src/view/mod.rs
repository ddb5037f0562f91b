//! # View Module
//!
//! Turns data into terminal output. Nothing here talks to the network or
//! mutates state; every function takes what it renders and returns a
//! `String`, so the CLI decides when to print and tests can inspect the text.
//!
//! - [`login`] - the logged-out screen with an optional error notice
//! - [`cards`] - total and per-gender counters with percentages
//! - [`chart`] - a one-line pie replacement with a legend
//! - [`artists`] - the ranked artist table, filtered by gender
//!
//! [`dashboard`] glues the pieces together for one time range.

pub mod artists;
pub mod cards;
pub mod chart;
pub mod login;

use colored::Colorize;

use crate::{
    management::{Phase, Snapshot},
    stats::{self, GenderStats, Tone},
    types::{Artist, GenderFilter, TimeRange},
};

/// Full dashboard for the artists of `range`.
pub fn dashboard(
    range: TimeRange,
    artists: &[Artist],
    filter: GenderFilter,
    cached: &[TimeRange],
) -> String {
    let stats = GenderStats::from_artists(artists);
    let mut out = String::new();

    out.push_str(&header(range, cached));
    out.push('\n');
    out.push_str(&cards::render(&stats));
    out.push('\n');
    if let Some(chart) = chart::render(&stats) {
        out.push_str(&chart);
        out.push('\n');
    }
    out.push_str(&verdict_line(&stats));
    out.push_str("\n\n");
    out.push_str(&artists::render(artists, filter, &stats));
    out
}

/// Title plus the range picker; the selected range is highlighted and
/// ranges already in memory are marked with a dot.
pub fn header(selected: TimeRange, cached: &[TimeRange]) -> String {
    let picker = TimeRange::ALL
        .iter()
        .map(|r| {
            let marker = if cached.contains(r) { "•" } else { " " };
            let entry = format!("[{}] {}{}", r.shortcut(), r.label(), marker);
            if *r == selected {
                entry.bold().underline().to_string()
            } else {
                entry.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    format!(
        "{}\nTop artists, {}\n{}\n",
        "Your gender breakdown".bold(),
        selected.label(),
        picker
    )
}

pub fn verdict_line(stats: &GenderStats) -> String {
    let verdict = stats::verdict(stats.female_pct);
    let text = format!("{} ({:.1}% women)", verdict.message, stats.female_pct);
    match verdict.tone {
        Tone::Bad => text.red().to_string(),
        Tone::Neutral => text.yellow().to_string(),
        Tone::Good => text.green().to_string(),
        Tone::Excellent => text.magenta().bold().to_string(),
    }
}

pub fn loading(range: TimeRange) -> String {
    format!("Analysing your favourite artists ({})...", range.label())
}

/// Whatever the current phase calls for: login screen, loading line,
/// dashboard or the error for the selected range.
pub fn snapshot(snapshot: &Snapshot, filter: GenderFilter) -> String {
    match &snapshot.phase {
        Phase::LoggedOut { notice } => login::render(notice.as_deref()),
        Phase::Loading(range) => loading(*range),
        Phase::Ready(range) => dashboard(*range, &snapshot.artists, filter, &snapshot.cached),
        Phase::Failed { range, message } => format!(
            "{}\n{}\nPress {} to try again.\n",
            header(*range, &snapshot.cached),
            message.red(),
            range.shortcut()
        ),
    }
}
