use tabled::{Table, settings::Style};

use crate::{
    stats::GenderStats,
    types::{Gender, StatCardRow},
};

pub fn rows(stats: &GenderStats) -> Vec<StatCardRow> {
    let mut rows = vec![StatCardRow {
        label: "Total artists".to_string(),
        count: stats.total,
        share: String::new(),
    }];

    rows.extend(
        [Gender::Male, Gender::Female, Gender::Unknown]
            .into_iter()
            .map(|g| StatCardRow {
                label: g.label().to_string(),
                count: stats.count(g),
                share: format!("{:.1}%", stats.pct(g)),
            }),
    );
    rows
}

pub fn render(stats: &GenderStats) -> String {
    let mut table = Table::new(rows(stats));
    table.with(Style::rounded());
    table.to_string()
}
