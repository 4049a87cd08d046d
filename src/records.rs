//! Player records and region classification
//!
//! A `PlayerRecord` holds the base fields exactly as scraped from the
//! leaderboard. Everything else (region, total wins, earnings per win) is
//! derived on demand so it always reflects the current classification rules
//! rather than whatever was on disk.

use serde::{Deserialize, Serialize};
use std::fmt;

/// North American countries for region classification.
const NA_COUNTRIES: [&str; 3] = ["United States", "Canada", "Mexico"];

/// European countries for region classification.
const EU_COUNTRIES: [&str; 22] = [
    "France",
    "England",
    "Germany",
    "Spain",
    "Netherlands",
    "Sweden",
    "Belgium",
    "Denmark",
    "Finland",
    "Norway",
    "Austria",
    "Italy",
    "Poland",
    "Scotland",
    "Wales",
    "Ireland",
    "Northern Ireland",
    "Portugal",
    "Iceland",
    "Lithuania",
    "Switzerland",
    "United Kingdom",
];

/// Coarse geographic region derived from a player's country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Na,
    Eu,
    Other,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Na => "NA",
            Region::Eu => "EU",
            Region::Other => "Other",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a country label into NA, EU, or Other.
///
/// Exact string match against the fixed membership lists; anything else,
/// including the empty string and the scraper's `"Unknown"` placeholder,
/// falls into `Other`. Both the scrape summary and the analysis stage use
/// this same function so the two stages can never disagree.
pub fn classify_region(country: &str) -> Region {
    if NA_COUNTRIES.contains(&country) {
        Region::Na
    } else if EU_COUNTRIES.contains(&country) {
        Region::Eu
    } else {
        Region::Other
    }
}

/// One leaderboard row: a player's country and career placement/earnings
/// totals. Only these base fields are authoritative; see the module docs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    pub country: String,
    pub first_place: u32,
    pub second_place: u32,
    pub third_place: u32,
    pub earnings: f64,
}

impl PlayerRecord {
    pub fn region(&self) -> Region {
        classify_region(&self.country)
    }

    /// Total top-three tournament placements.
    pub fn total_wins(&self) -> u32 {
        self.first_place + self.second_place + self.third_place
    }

    /// Earnings per placement. Players with no placements contribute 0
    /// rather than a division by zero.
    pub fn earnings_per_win(&self) -> f64 {
        let wins = self.total_wins();
        if wins > 0 {
            self.earnings / wins as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, first: u32, second: u32, third: u32, earnings: f64) -> PlayerRecord {
        PlayerRecord {
            player: "test".to_string(),
            country: country.to_string(),
            first_place: first,
            second_place: second,
            third_place: third,
            earnings,
        }
    }

    #[test]
    fn classifies_all_na_countries() {
        for country in NA_COUNTRIES {
            assert_eq!(classify_region(country), Region::Na, "{country}");
        }
    }

    #[test]
    fn classifies_all_eu_countries() {
        for country in EU_COUNTRIES {
            assert_eq!(classify_region(country), Region::Eu, "{country}");
        }
    }

    #[test]
    fn unmatched_countries_are_other() {
        for country in ["Brazil", "Saudi Arabia", "Unknown", "", "united states"] {
            assert_eq!(classify_region(country), Region::Other, "{country:?}");
        }
    }

    #[test]
    fn total_wins_sums_placements() {
        let r = record("France", 3, 2, 1, 10_000.0);
        assert_eq!(r.total_wins(), 6);
        assert!(r.total_wins() >= r.first_place.max(r.second_place).max(r.third_place));
    }

    #[test]
    fn earnings_per_win_guards_zero() {
        let none = record("Canada", 0, 0, 0, 50_000.0);
        assert_eq!(none.earnings_per_win(), 0.0);

        let some = record("Canada", 2, 1, 1, 50_000.0);
        assert!((some.earnings_per_win() - 12_500.0).abs() < 1e-9);
    }
}
