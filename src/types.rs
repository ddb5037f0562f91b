//! Data structures shared across topgender.
//!
//! Three groups live here:
//!
//! - value types parsed from the command line and sent on the wire
//!   ([`TimeRange`], [`Gender`], [`GenderFilter`])
//! - JSON bodies of the analysis service ([`Artist`], [`TopArtistsResponse`],
//!   [`LoginResponse`], [`HealthResponse`])
//! - `tabled` rows used by the view ([`StatCardRow`], [`ArtistTableRow`])

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One of the three listening-history windows the service computes top
/// artists over.
///
/// The wire values (`short_term`, `medium_term`, `long_term`) are part of the
/// contract with the service and must not change.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    #[default]
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [
        TimeRange::ShortTerm,
        TimeRange::MediumTerm,
        TimeRange::LongTerm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "last 4 weeks",
            TimeRange::MediumTerm => "last 6 months",
            TimeRange::LongTerm => "last year",
        }
    }

    /// Position in the range picker, starting at 1.
    pub fn shortcut(&self) -> u8 {
        match self {
            TimeRange::ShortTerm => 1,
            TimeRange::MediumTerm => 2,
            TimeRange::LongTerm => 3,
        }
    }

    /// Every range except `self`, in picker order.
    pub fn others(&self) -> Vec<TimeRange> {
        Self::ALL.into_iter().filter(|r| r != self).collect()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "short_term" | "short" | "1" | "4w" => Ok(TimeRange::ShortTerm),
            "medium_term" | "medium" | "2" | "6m" => Ok(TimeRange::MediumTerm),
            "long_term" | "long" | "3" | "1y" => Ok(TimeRange::LongTerm),
            other => Err(format!(
                "invalid time range '{}'; expected short_term, medium_term or long_term",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which artists the dashboard lists. `All` keeps the list untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Only(Gender),
}

impl GenderFilter {
    pub fn matches(&self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(g) => *g == gender,
        }
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderFilter::All => f.write_str("all"),
            GenderFilter::Only(g) => f.write_str(&g.label().to_lowercase()),
        }
    }
}

impl FromStr for GenderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "a" => Ok(GenderFilter::All),
            "male" | "m" => Ok(GenderFilter::Only(Gender::Male)),
            "female" | "f" => Ok(GenderFilter::Only(Gender::Female)),
            "unknown" | "u" => Ok(GenderFilter::Only(Gender::Unknown)),
            other => Err(format!(
                "invalid filter '{}'; expected all, male, female or unknown",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistImage {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// An artist as classified by the service. Never modified after it arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<ArtistImage>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub total: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Tabled)]
pub struct StatCardRow {
    #[tabled(rename = "")]
    pub label: String,
    #[tabled(rename = "Artists")]
    pub count: usize,
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub name: String,
    pub gender: String,
    pub genres: String,
    pub popularity: u32,
    pub followers: String,
    pub link: String,
}
