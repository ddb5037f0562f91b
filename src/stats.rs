//! Pure statistics over the artists of the selected range.
//!
//! Everything here is a plain function of the artist list: no state, no I/O.
//! The view calls these on every redraw.
//!
//! # Percentages
//!
//! Each share is rounded to one decimal on its own, so the three shares do
//! not always add up to exactly 100. An empty list yields zero everywhere
//! instead of dividing by zero.

use crate::{
    types::{Artist, Gender, GenderFilter},
    utils,
};

/// Counts and shares per gender for one artist list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenderStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub unknown: usize,
    pub male_pct: f64,
    pub female_pct: f64,
    pub unknown_pct: f64,
}

impl GenderStats {
    pub fn from_artists(artists: &[Artist]) -> Self {
        let count = |g: Gender| artists.iter().filter(|a| a.gender == g).count();
        let total = artists.len();
        let male = count(Gender::Male);
        let female = count(Gender::Female);
        let unknown = count(Gender::Unknown);

        Self {
            total,
            male,
            female,
            unknown,
            male_pct: percentage(male, total),
            female_pct: percentage(female, total),
            unknown_pct: percentage(unknown, total),
        }
    }

    pub fn count(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Unknown => self.unknown,
        }
    }

    pub fn pct(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_pct,
            Gender::Female => self.female_pct,
            Gender::Unknown => self.unknown_pct,
        }
    }

    pub fn count_for(&self, filter: GenderFilter) -> usize {
        match filter {
            GenderFilter::All => self.total,
            GenderFilter::Only(g) => self.count(g),
        }
    }
}

/// Share of `part` in `total`, rounded to one decimal. Zero when `total` is.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    utils::round_to(part as f64 / total as f64 * 100.0, 1)
}

/// Artists matching `filter`, in their original (ranked) order.
pub fn filter_artists(artists: &[Artist], filter: GenderFilter) -> Vec<Artist> {
    artists
        .iter()
        .filter(|a| filter.matches(a.gender))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Bad,
    Neutral,
    Good,
    Excellent,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Bad => "bad",
            Tone::Neutral => "neutral",
            Tone::Good => "good",
            Tone::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    /// Exclusive upper bound of the female percentage for this band.
    pub below: f64,
    pub message: &'static str,
    pub tone: Tone,
}

/// Verdict bands, ascending. The first band whose bound is above the female
/// percentage applies; the last one catches everything.
pub const VERDICTS: &[Verdict] = &[
    Verdict {
        below: 1.0,
        message: "Not a single woman in your top artists. Your ears might want to see other people.",
        tone: Tone::Bad,
    },
    Verdict {
        below: 10.0,
        message: "A token woman or two. That is not diversity, that is a cameo.",
        tone: Tone::Bad,
    },
    Verdict {
        below: 20.0,
        message: "Some women made the cut, but they are clearly outnumbered.",
        tone: Tone::Neutral,
    },
    Verdict {
        below: 35.0,
        message: "Getting there. Women have a real seat at your table.",
        tone: Tone::Neutral,
    },
    Verdict {
        below: 50.0,
        message: "Pretty balanced listening. Nice.",
        tone: Tone::Good,
    },
    Verdict {
        below: 80.0,
        message: "Women run your playlists. Excellent taste.",
        tone: Tone::Excellent,
    },
    Verdict {
        below: f64::INFINITY,
        message: "Your top artists are a women's choir. Iconic.",
        tone: Tone::Excellent,
    },
];

/// Picks the verdict for a female share.
///
/// # Arguments
///
/// * `female_pct` - share of women in percent, `0.0..=100.0`
///
/// # Example
///
/// ```
/// let v = verdict(45.0);
/// assert_eq!(v.tone, Tone::Good);
/// ```
pub fn verdict(female_pct: f64) -> &'static Verdict {
    VERDICTS
        .iter()
        .find(|v| female_pct < v.below)
        .unwrap_or(&VERDICTS[VERDICTS.len() - 1])
}

/// One slice of the gender pie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSlice {
    pub gender: Gender,
    pub value: usize,
    /// Share in whole percent, as printed on the slice.
    pub share: u32,
}

/// Pie slices in male, female, unknown order. Empty categories are left out.
pub fn chart_slices(stats: &GenderStats) -> Vec<ChartSlice> {
    [Gender::Male, Gender::Female, Gender::Unknown]
        .into_iter()
        .map(|gender| ChartSlice {
            gender,
            value: stats.count(gender),
            share: whole_percent(stats.count(gender), stats.total),
        })
        .filter(|slice| slice.value > 0)
        .collect()
}

fn whole_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
