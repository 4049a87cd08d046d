//! Scrape the Liquipedia Rocket League player earnings leaderboard and save
//! it as a CSV for the analysis tool.
//!
//! A failed fetch or a page without the expected table is reported and ends
//! the run without writing a file; it is not a process failure.

use anyhow::Result;
use clap::Parser;
use rl_earnings_toolkit::records::{PlayerRecord, Region};
use rl_earnings_toolkit::report::format_money;
use rl_earnings_toolkit::scrape::{self, EARNINGS_URL};
use rl_earnings_toolkit::store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrape-earnings")]
#[command(about = "Scrape the Rocket League player earnings leaderboard from Liquipedia")]
struct Cli {
    /// Output CSV file
    #[arg(short, long, default_value = "../data/rl_player_earnings.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Fetching data from Liquipedia...");
    let html = match scrape::fetch_page(EARNINGS_URL) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(());
        }
    };

    let (players, summary) = match scrape::parse_players(&html) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return Ok(());
        }
    };

    println!("Found {} player rows...", summary.rows_seen);
    println!("Successfully scraped {} players!", players.len());
    if summary.fields_defaulted > 0 {
        log::warn!(
            "{} numeric cells failed to parse and were defaulted",
            summary.fields_defaulted
        );
    }

    store::write_records(&cli.output, &players)?;
    println!("\nData saved to {}", cli.output.display());

    print_summary(&players);
    Ok(())
}

fn print_summary(players: &[PlayerRecord]) {
    let count_of = |region| {
        players
            .iter()
            .filter(|p: &&PlayerRecord| p.region() == region)
            .count()
    };

    println!("\n{}", "=".repeat(50));
    println!("SCRAPING SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Total players scraped: {}", players.len());
    println!("\nPlayers by region:");
    for region in [Region::Na, Region::Eu, Region::Other] {
        println!("  {region}: {}", count_of(region));
    }

    // The leaderboard is sorted by earnings, so the head is the top earners
    println!("\nTop 5 earners:");
    for p in players.iter().take(5) {
        println!(
            "  {} ({}) - ${}",
            p.player,
            p.country,
            format_money(p.earnings)
        );
    }
}
