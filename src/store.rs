//! CSV persistence for scraped player records
//!
//! The file carries the base fields plus the derived columns (region,
//! total_wins, earnings_per_win) so it is readable on its own, but the
//! loader recomputes every derived value from the base fields. A stale file
//! therefore never pins an outdated region classification.

use crate::records::PlayerRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk row layout. Column order matters: the header is
/// `player,country,first_place,second_place,third_place,earnings,region,total_wins,earnings_per_win`.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    player: String,
    country: String,
    first_place: u32,
    second_place: u32,
    third_place: u32,
    earnings: f64,
    region: String,
    total_wins: u32,
    earnings_per_win: f64,
}

impl From<&PlayerRecord> for CsvRow {
    fn from(r: &PlayerRecord) -> Self {
        CsvRow {
            player: r.player.clone(),
            country: r.country.clone(),
            first_place: r.first_place,
            second_place: r.second_place,
            third_place: r.third_place,
            earnings: r.earnings,
            region: r.region().to_string(),
            total_wins: r.total_wins(),
            earnings_per_win: r.earnings_per_win(),
        }
    }
}

/// Write all records to `path`, creating parent directories as needed.
pub fn write_records(path: &Path, records: &[PlayerRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Load records from `path`, keeping only the base fields.
pub fn load_records(path: &Path) -> Result<Vec<PlayerRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.context("Failed to read CSV row")?;
        records.push(PlayerRecord {
            player: row.player,
            country: row.country,
            first_place: row.first_place,
            second_place: row.second_place,
            third_place: row.third_place,
            earnings: row.earnings,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord {
                player: "GarrettG".to_string(),
                country: "United States".to_string(),
                first_place: 3,
                second_place: 2,
                third_place: 1,
                earnings: 10_000.0,
            },
            PlayerRecord {
                player: "Fairy Peak!".to_string(),
                country: "France".to_string(),
                first_place: 1,
                second_place: 1,
                third_place: 1,
                earnings: 5_000.0,
            },
            PlayerRecord {
                player: "nobody".to_string(),
                country: "Unknown".to_string(),
                first_place: 0,
                second_place: 0,
                third_place: 0,
                earnings: 0.0,
            },
        ]
    }

    #[test]
    fn round_trip_preserves_base_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");

        let records = sample();
        write_records(&path, &records).unwrap();
        let loaded = load_records(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn file_has_expected_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        write_records(&path, &sample()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(
            header,
            "player,country,first_place,second_place,third_place,earnings,\
             region,total_wins,earnings_per_win"
        );
    }

    #[test]
    fn derived_columns_are_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.csv");
        write_records(&path, &sample()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let first_row = contents.lines().nth(1).unwrap();
        let fields: Vec<&str> = first_row.split(',').collect();
        assert_eq!(fields[6], "NA");
        assert_eq!(fields[7], "6");
    }
}
