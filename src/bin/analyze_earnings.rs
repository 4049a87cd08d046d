//! Analyze the scraped earnings CSV: regional comparison, correlation and
//! efficiency reports on stdout, plus three PNG charts.

use anyhow::Result;
use clap::Parser;
use rl_earnings_toolkit::{charts, report, store};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "analyze-earnings")]
#[command(about = "Analyze regional differences and win/earnings correlation in scraped data")]
struct Cli {
    /// Input CSV file produced by scrape-earnings
    #[arg(short, long, default_value = "../data/rl_player_earnings.csv")]
    input: PathBuf,

    /// Directory the chart PNGs are written to
    #[arg(short, long, default_value = "../data/")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Loading data...");
    let records = store::load_records(&cli.input)?;
    println!("Loaded {} players", records.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    report::regional_comparison(&records, &mut out)?;
    report::correlation_analysis(&records, &mut out)?;
    report::efficiency_analysis(&records, &mut out)?;

    report::banner(&mut out, "CREATING VISUALIZATIONS")?;
    out.flush()?;
    charts::render_all(&records, &cli.out_dir)?;
    println!("\nAll visualizations created!");

    report::banner(&mut out, "ANALYSIS COMPLETE!")?;
    Ok(())
}
