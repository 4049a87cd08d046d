//! Printed analyses: regional comparison, correlation, efficiency
//!
//! Each analysis writes a human-readable report to the supplied stream.
//! Only the correlation analysis hands anything back to the caller (the two
//! raw coefficients); everything else is output-only.

use crate::records::{PlayerRecord, Region};
use crate::stats;
use anyhow::Result;
use std::io::Write;

/// Section banner in the style of the printed reports.
pub fn banner(w: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(60))?;
    Ok(())
}

/// `1234567.891` -> `"1,234,567.89"`.
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

fn earnings_of(records: &[PlayerRecord], region: Region) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.region() == region)
        .map(|r| r.earnings)
        .collect()
}

/// Earnings per win for every player in a region (zero-win players count 0).
fn earnings_per_win_of(records: &[PlayerRecord], region: Region) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.region() == region)
        .map(|r| r.earnings_per_win())
        .collect()
}

/// Earnings per win for a region's players that have at least one placement.
fn efficiency_of(records: &[PlayerRecord], region: Region) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.region() == region && r.total_wins() > 0)
        .map(|r| r.earnings_per_win())
        .collect()
}

/// Compare earnings between the NA and EU regions.
pub fn regional_comparison(records: &[PlayerRecord], w: &mut dyn Write) -> Result<()> {
    banner(w, "REGIONAL COMPARISON: NA vs EU")?;

    writeln!(w, "\nRegional Statistics:")?;
    for region in [Region::Na, Region::Eu] {
        let members: Vec<&PlayerRecord> =
            records.iter().filter(|r| r.region() == region).collect();
        let earnings: Vec<f64> = members.iter().map(|r| r.earnings).collect();
        let firsts: u32 = members.iter().map(|r| r.first_place).sum();
        let placements: u32 = members.iter().map(|r| r.total_wins()).sum();
        let epw = earnings_per_win_of(records, region);

        writeln!(
            w,
            "  {region}: players={}, total=${}, mean=${}, median=${}, \
             1st places={firsts}, placements={placements}, avg $/win=${}",
            members.len(),
            format_money(earnings.iter().sum()),
            format_money(stats::mean(&earnings)),
            format_money(stats::median(&earnings)),
            format_money(stats::mean(&epw)),
        )?;
    }

    let na = earnings_of(records, Region::Na);
    let eu = earnings_of(records, Region::Eu);
    let na_epw = earnings_per_win_of(records, Region::Na);
    let eu_epw = earnings_per_win_of(records, Region::Eu);

    writeln!(w, "\n--- Summary ---")?;
    writeln!(w, "NA Players: {}", na.len())?;
    writeln!(w, "EU Players: {}", eu.len())?;
    writeln!(w, "\nNA Total Earnings: ${}", format_money(na.iter().sum()))?;
    writeln!(w, "EU Total Earnings: ${}", format_money(eu.iter().sum()))?;
    writeln!(
        w,
        "\nNA Average Earnings: ${}",
        format_money(stats::mean(&na))
    )?;
    writeln!(
        w,
        "EU Average Earnings: ${}",
        format_money(stats::mean(&eu))
    )?;
    writeln!(
        w,
        "\nNA Avg Earnings Per Win: ${}",
        format_money(stats::mean(&na_epw))
    )?;
    writeln!(
        w,
        "EU Avg Earnings Per Win: ${}",
        format_money(stats::mean(&eu_epw))
    )?;
    Ok(())
}

fn strength_label(r: f64) -> &'static str {
    if r.abs() > 0.7 {
        "Strong"
    } else if r.abs() > 0.4 {
        "Moderate"
    } else {
        "Weak"
    }
}

fn direction_label(r: f64) -> &'static str {
    if r < 0.0 {
        "negative"
    } else {
        "positive"
    }
}

/// Correlation between tournament placements and earnings.
///
/// Returns the overall total-wins and first-place coefficients when they
/// could be computed. Per-region correlation is skipped for regions with
/// 2 or fewer records.
pub fn correlation_analysis(
    records: &[PlayerRecord],
    w: &mut dyn Write,
) -> Result<(Option<f64>, Option<f64>)> {
    banner(w, "CORRELATION ANALYSIS: Wins vs Earnings")?;

    let wins: Vec<f64> = records.iter().map(|r| r.total_wins() as f64).collect();
    let firsts: Vec<f64> = records.iter().map(|r| r.first_place as f64).collect();
    let earnings: Vec<f64> = records.iter().map(|r| r.earnings).collect();

    let corr_total = stats::pearson(&wins, &earnings);
    writeln!(w, "\nTotal Wins vs Earnings:")?;
    match corr_total {
        Some(c) => {
            writeln!(w, "  Correlation (r): {:.4}", c.r)?;
            writeln!(w, "  P-value: {:.4e}", c.p_value)?;
            writeln!(
                w,
                "  Interpretation: {} {} correlation",
                strength_label(c.r),
                direction_label(c.r)
            )?;
        }
        None => writeln!(w, "  Skipped (not enough data)")?,
    }

    let corr_first = stats::pearson(&firsts, &earnings);
    writeln!(w, "\n1st Place Finishes vs Earnings:")?;
    match corr_first {
        Some(c) => {
            writeln!(w, "  Correlation (r): {:.4}", c.r)?;
            writeln!(w, "  P-value: {:.4e}", c.p_value)?;
        }
        None => writeln!(w, "  Skipped (not enough data)")?,
    }

    writeln!(w, "\n--- Correlation by Region ---")?;
    for region in [Region::Na, Region::Eu] {
        let members: Vec<&PlayerRecord> =
            records.iter().filter(|r| r.region() == region).collect();
        if members.len() <= 2 {
            continue;
        }
        let x: Vec<f64> = members.iter().map(|r| r.total_wins() as f64).collect();
        let y: Vec<f64> = members.iter().map(|r| r.earnings).collect();
        if let Some(c) = stats::pearson(&x, &y) {
            writeln!(w, "{region}: r = {:.4} (p = {:.4e})", c.r, c.p_value)?;
        }
    }

    Ok((corr_total.map(|c| c.r), corr_first.map(|c| c.r)))
}

/// Which region earns more per placement, and is the gap significant.
///
/// Players with zero placements are excluded so they don't drag a region's
/// distribution toward zero. The t-test runs only when both groups have
/// more than 2 observations; significance threshold is p < 0.05.
pub fn efficiency_analysis(records: &[PlayerRecord], w: &mut dyn Write) -> Result<()> {
    banner(w, "EFFICIENCY ANALYSIS: Earnings Per Win by Region")?;

    let na = efficiency_of(records, Region::Na);
    let eu = efficiency_of(records, Region::Eu);

    writeln!(w, "\nNA Earnings Per Win:")?;
    writeln!(w, "  Mean: ${}", format_money(stats::mean(&na)))?;
    writeln!(w, "  Median: ${}", format_money(stats::median(&na)))?;
    writeln!(w, "  Players with wins: {}", na.len())?;

    writeln!(w, "\nEU Earnings Per Win:")?;
    writeln!(w, "  Mean: ${}", format_money(stats::mean(&eu)))?;
    writeln!(w, "  Median: ${}", format_money(stats::median(&eu)))?;
    writeln!(w, "  Players with wins: {}", eu.len())?;

    if na.len() > 2 && eu.len() > 2 {
        if let Some(test) = stats::t_test_ind(&na, &eu) {
            writeln!(w, "\nT-test (NA vs EU efficiency):")?;
            writeln!(w, "  t-statistic: {:.4}", test.t)?;
            writeln!(w, "  p-value: {:.4}", test.p_value)?;
            if test.p_value < 0.05 {
                let winner = if stats::mean(&na) > stats::mean(&eu) {
                    "NA"
                } else {
                    "EU"
                };
                writeln!(w, "  Result: {winner} is significantly more efficient!")?;
            } else {
                writeln!(w, "  Result: No significant difference in efficiency")?;
            }
        }
    }

    Ok(())
}
