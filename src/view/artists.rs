use tabled::{Table, settings::Style};

use crate::{
    stats::{self, GenderStats},
    types::{Artist, ArtistTableRow, Gender, GenderFilter},
    utils,
};

const MAX_GENRES: usize = 2;
const NAME_WIDTH: usize = 32;

pub fn rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: utils::truncate(&a.name, NAME_WIDTH),
            gender: a.gender.label().to_string(),
            genres: a
                .genres
                .iter()
                .take(MAX_GENRES)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            popularity: a.popularity,
            followers: utils::human_count(a.followers),
            link: a.external_url.clone(),
        })
        .collect()
}

/// Filter buttons line, e.g. `[All (50)]  Male (31)  Female (12)  Unknown (7)`.
pub fn filter_bar(filter: GenderFilter, stats: &GenderStats) -> String {
    let options = [
        GenderFilter::All,
        GenderFilter::Only(Gender::Male),
        GenderFilter::Only(Gender::Female),
        GenderFilter::Only(Gender::Unknown),
    ];

    options
        .iter()
        .map(|f| {
            let label = match f {
                GenderFilter::All => "All",
                GenderFilter::Only(g) => g.label(),
            };
            let entry = format!("{} ({})", label, stats.count_for(*f));
            if *f == filter {
                format!("[{}]", entry)
            } else {
                entry
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Ranked artists after applying `filter`. Ranks refer to the filtered list.
pub fn render(artists: &[Artist], filter: GenderFilter, stats: &GenderStats) -> String {
    let filtered = stats::filter_artists(artists, filter);
    let mut out = format!(
        "Filter: {}\nArtists ({})\n",
        filter_bar(filter, stats),
        filtered.len()
    );

    if filtered.is_empty() {
        out.push_str("No artists match this filter.\n");
        return out;
    }

    let mut table = Table::new(rows(&filtered));
    table.with(Style::rounded());
    out.push_str(&table.to_string());
    out.push('\n');
    out
}
