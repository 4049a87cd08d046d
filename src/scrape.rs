//! Liquipedia scraping: page fetch, wikitable extraction, row normalization
//!
//! The parser is tied to the fixed column layout of the player earnings
//! leaderboard: rank, player, tournament count, 1st/2nd/3rd placements, and
//! earnings in the last cell. Rows that don't have at least 7 cells are
//! dropped; unparsable numeric cells fall back to zero. Both kinds of
//! degradation are counted in the returned [`ScrapeSummary`].

use crate::records::PlayerRecord;
use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// The leaderboard page this scraper understands.
pub const EARNINGS_URL: &str =
    "https://liquipedia.net/rocketleague/Portal:Statistics/Player_earnings";

/// Browser User-Agent; Liquipedia rejects the default client identity.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Counters for rows and fields that degraded during parsing. The records
/// themselves keep their default values; this exists for observability only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Data rows inspected (header excluded).
    pub rows_seen: usize,
    /// Rows dropped by the minimum-cell-count gate.
    pub rows_skipped: usize,
    /// Numeric cells that failed to parse and defaulted to 0 / 0.0.
    pub fields_defaulted: usize,
}

/// Fetch the raw HTML of `url`. Any non-success status aborts the scrape;
/// there is no retry.
pub fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Request to {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("Unexpected status code {status} from {url}");
    }

    response.text().context("Failed to read response body")
}

/// Extract player records from the first wikitable in the page.
///
/// Returns a structural error when no wikitable exists (no partial output).
/// The first table row is the header and is always skipped.
pub fn parse_players(html: &str) -> Result<(Vec<PlayerRecord>, ScrapeSummary)> {
    lazy_static! {
        static ref TABLE: Selector = Selector::parse("table.wikitable").unwrap();
        static ref ROW: Selector = Selector::parse("tr").unwrap();
        static ref CELL: Selector = Selector::parse("td").unwrap();
        static ref LINK: Selector = Selector::parse("a").unwrap();
    }

    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .context("Could not find earnings table (table.wikitable)")?;

    let mut players = Vec::new();
    let mut summary = ScrapeSummary::default();

    for row in table.select(&ROW).skip(1) {
        let cells: Vec<ElementRef> = row.select(&CELL).collect();
        summary.rows_seen += 1;

        // Row-shape gate: the leaderboard layout needs at least 7 cells.
        if cells.len() < 7 {
            summary.rows_skipped += 1;
            continue;
        }

        players.push(normalize_row(&cells, &LINK, &mut summary));
    }

    if summary.rows_skipped > 0 {
        log::warn!(
            "Skipped {} of {} rows (fewer than 7 cells)",
            summary.rows_skipped,
            summary.rows_seen
        );
    }

    Ok((players, summary))
}

/// Build one record from a row that passed the shape gate.
fn normalize_row(
    cells: &[ElementRef],
    link: &Selector,
    summary: &mut ScrapeSummary,
) -> PlayerRecord {
    let player_cell = &cells[1];
    let raw_name = cell_text(player_cell);

    // Country comes from the title attribute of the flag link.
    let country = player_cell
        .select(link)
        .next()
        .and_then(|a| a.value().attr("title"))
        .unwrap_or("Unknown")
        .to_string();

    let first_place = parse_count(&cells[3], summary);
    let second_place = parse_count(&cells[4], summary);
    let third_place = parse_count(&cells[5], summary);

    // Earnings live in the last cell regardless of trailing extras.
    let earnings_text = cells.last().map(|c| cell_text(c)).unwrap_or_default();
    let earnings = match parse_earnings(&earnings_text) {
        Some(v) => v,
        None => {
            summary.fields_defaulted += 1;
            0.0
        }
    };

    // The player cell concatenates the flag title and the handle, so the
    // country label leaks into the name text. Best-effort strip; a handle
    // that legitimately contains a country name gets mangled too (known
    // limitation).
    let player = if country != "Unknown" && raw_name.contains(&country) {
        raw_name.replace(&country, "").trim().to_string()
    } else {
        raw_name
    };

    PlayerRecord {
        player,
        country,
        first_place,
        second_place,
        third_place,
        earnings,
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn parse_count(cell: &ElementRef, summary: &mut ScrapeSummary) -> u32 {
    match cell_text(cell).parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            summary.fields_defaulted += 1;
            0
        }
    }
}

/// Parse an earnings cell like `"$1,234,567.89"`. Returns `None` when the
/// text is not numeric after stripping the currency formatting.
pub fn parse_earnings(text: &str) -> Option<f64> {
    lazy_static! {
        static ref CURRENCY_CHARS: Regex = Regex::new(r"[$,]").unwrap();
    }
    CURRENCY_CHARS
        .replace_all(text.trim(), "")
        .parse::<f64>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <html><body>
        <table class="wikitable">
          <tr><th>#</th><th>Player</th><th>Trn</th><th>1st</th><th>2nd</th><th>3rd</th><th>Earnings</th></tr>
          <tr>
            <td>1</td>
            <td><a href="/f" title="France"><img src="fr.png"/></a>France Kaydop</td>
            <td>120</td><td>30</td><td>20</td><td>10</td>
            <td>$1,234,567.89</td>
          </tr>
          <tr>
            <td>2</td>
            <td><span>Mystery</span></td>
            <td>50</td><td>N/A</td><td>7</td><td>3</td>
            <td>N/A</td>
          </tr>
          <tr><td>3</td><td>short row</td><td>1</td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_fixture_rows() {
        let (players, summary) = parse_players(FIXTURE).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(summary.rows_seen, 3);
        assert_eq!(summary.rows_skipped, 1);

        let kaydop = &players[0];
        assert_eq!(kaydop.player, "Kaydop");
        assert_eq!(kaydop.country, "France");
        assert_eq!(
            (kaydop.first_place, kaydop.second_place, kaydop.third_place),
            (30, 20, 10)
        );
        assert!((kaydop.earnings - 1_234_567.89).abs() < 1e-6);
    }

    #[test]
    fn missing_flag_link_defaults_country() {
        let (players, summary) = parse_players(FIXTURE).unwrap();
        let mystery = &players[1];
        assert_eq!(mystery.country, "Unknown");
        assert_eq!(mystery.player, "Mystery");
        // "N/A" placement and "N/A" earnings both defaulted
        assert_eq!(mystery.first_place, 0);
        assert_eq!(mystery.earnings, 0.0);
        assert_eq!(summary.fields_defaulted, 2);
    }

    #[test]
    fn missing_table_is_structural_failure() {
        let err = parse_players("<html><body><p>nothing here</p></body></html>")
            .err()
            .expect("expected an error");
        assert!(err.to_string().contains("wikitable"));
    }

    #[test]
    fn earnings_parsing_examples() {
        assert_eq!(parse_earnings("$1,234,567.89"), Some(1_234_567.89));
        assert_eq!(parse_earnings("1000"), Some(1000.0));
        assert_eq!(parse_earnings(" $5,000 "), Some(5000.0));
        assert_eq!(parse_earnings("N/A"), None);
        assert_eq!(parse_earnings(""), None);
    }
}
