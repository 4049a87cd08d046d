//! PNG chart rendering for the earnings analysis
//!
//! Three charts, mirroring the printed analyses: a regional bar comparison,
//! a wins-vs-earnings scatter with trend line, and an efficiency box plot.
//! All are write-only; a chart with no underlying data is skipped with a
//! warning rather than rendered empty.

use crate::records::{PlayerRecord, Region};
use crate::stats;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

// Matplotlib's default category palette
const NA_COLOR: RGBColor = RGBColor(31, 119, 180);
const EU_COLOR: RGBColor = RGBColor(255, 127, 14);
const OTHER_COLOR: RGBColor = RGBColor(44, 160, 44);

/// Render all three charts into `out_dir` (created if missing).
pub fn render_all(records: &[PlayerRecord], out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    render_regional_comparison(records, &out_dir.join("regional_comparison.png"))?;
    render_correlation_plot(records, &out_dir.join("correlation_plot.png"))?;
    render_efficiency_boxplot(records, &out_dir.join("efficiency_boxplot.png"))?;
    Ok(())
}

fn earnings_of(records: &[PlayerRecord], region: Region) -> Vec<f64> {
    records
        .iter()
        .filter(|r| r.region() == region)
        .map(|r| r.earnings)
        .collect()
}

/// Two bar panels: total earnings (millions) and average earnings
/// (thousands) for NA and EU, with a value label on each bar.
pub fn render_regional_comparison(records: &[PlayerRecord], path: &Path) -> Result<()> {
    let na = earnings_of(records, Region::Na);
    let eu = earnings_of(records, Region::Eu);
    if na.is_empty() && eu.is_empty() {
        log::warn!("No NA/EU records; skipping {}", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(600);

    let totals = [
        ("NA", na.iter().sum::<f64>() / 1_000_000.0, NA_COLOR),
        ("EU", eu.iter().sum::<f64>() / 1_000_000.0, EU_COLOR),
    ];
    draw_bar_panel(
        &left,
        "Total Prize Money: NA vs EU",
        "Total Earnings (Millions $)",
        &totals,
        &|v| format!("${v:.2}M"),
    )?;

    let averages = [
        ("NA", stats::mean(&na) / 1000.0, NA_COLOR),
        ("EU", stats::mean(&eu) / 1000.0, EU_COLOR),
    ];
    draw_bar_panel(
        &right,
        "Average Earnings Per Player: NA vs EU",
        "Average Earnings (Thousands $)",
        &averages,
        &|v| format!("${v:.0}K"),
    )?;

    root.present()?;
    log::info!("Saved {}", path.display());
    Ok(())
}

fn draw_bar_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    caption: &str,
    y_desc: &str,
    bars: &[(&str, f64, RGBColor)],
    value_fmt: &dyn Fn(f64) -> String,
) -> Result<()> {
    let y_max = bars.iter().map(|b| b.1).fold(f64::MIN, f64::max).max(1e-9) * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..y_max)?;

    let labels: Vec<&str> = bars.iter().map(|b| b.0).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).copied().unwrap_or("").to_string(),
            _ => String::new(),
        })
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value, color))| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), *value),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 40, 40);
        bar
    }))?;

    let label_style = TextStyle::from(("sans-serif", 16).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, value, _))| {
        Text::new(
            value_fmt(*value),
            (SegmentValue::CenterOf(i), *value),
            label_style.clone(),
        )
    }))?;

    Ok(())
}

/// Scatter of total placements vs earnings (thousands) for all regions,
/// with an ordinary least squares trend line and the overall Pearson r.
pub fn render_correlation_plot(records: &[PlayerRecord], path: &Path) -> Result<()> {
    if records.is_empty() {
        log::warn!("No records; skipping {}", path.display());
        return Ok(());
    }

    let wins: Vec<f64> = records.iter().map(|r| r.total_wins() as f64).collect();
    let earnings_k: Vec<f64> = records.iter().map(|r| r.earnings / 1000.0).collect();

    let x_min = wins.iter().copied().fold(f64::MAX, f64::min);
    let x_max = wins.iter().copied().fold(f64::MIN, f64::max);
    let y_max = earnings_k.iter().copied().fold(f64::MIN, f64::max).max(1e-9) * 1.05;

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Tournament Success vs Earnings", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(0f64..(x_max * 1.05).max(1.0), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Total Tournament Placements (1st + 2nd + 3rd)")
        .y_desc("Total Earnings (Thousands $)")
        .draw()?;

    for (region, color) in [
        (Region::Na, NA_COLOR),
        (Region::Eu, EU_COLOR),
        (Region::Other, OTHER_COLOR),
    ] {
        let points: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.region() == region)
            .map(|r| (r.total_wins() as f64, r.earnings / 1000.0))
            .collect();
        if points.is_empty() {
            continue;
        }
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.mix(0.6).filled())),
            )?
            .label(region.as_str())
            .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
    }

    if let Some((slope, intercept)) = stats::linear_fit(&wins, &earnings_k) {
        let steps = 100;
        let line = (0..=steps).map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / steps as f64;
            (x, slope * x + intercept)
        });
        chart
            .draw_series(LineSeries::new(line, RED.mix(0.8).stroke_width(2)))?
            .label("Trend Line")
            .legend(|(x, y)| PathElement::new(vec![(x - 8, y), (x + 8, y)], RED));
    }

    if let Some(c) = stats::pearson(&wins, &earnings_k) {
        let style = TextStyle::from(("sans-serif", 20).into_font().style(FontStyle::Bold));
        chart.draw_series(std::iter::once(Text::new(
            format!("r = {:.3}", c.r),
            (x_max * 0.05, y_max * 0.95),
            style,
        )))?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    log::info!("Saved {}", path.display());
    Ok(())
}

/// Box plots of earnings per win (thousands) for NA and EU players with at
/// least one placement.
pub fn render_efficiency_boxplot(records: &[PlayerRecord], path: &Path) -> Result<()> {
    let efficiency = |region| {
        records
            .iter()
            .filter(|r: &&PlayerRecord| r.region() == region && r.total_wins() > 0)
            .map(|r| (r.earnings_per_win() / 1000.0) as f32)
            .collect::<Vec<f32>>()
    };
    let na = efficiency(Region::Na);
    let eu = efficiency(Region::Eu);
    if na.is_empty() || eu.is_empty() {
        log::warn!("Not enough winners in NA/EU; skipping {}", path.display());
        return Ok(());
    }

    let y_max = na
        .iter()
        .chain(&eu)
        .copied()
        .fold(f32::MIN, f32::max)
        .max(1e-9)
        * 1.1;

    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let regions = ["NA", "EU"];
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Efficiency: Earnings Per Tournament Placement",
            ("sans-serif", 22),
        )
        .margin(20)
        .x_label_area_size(35)
        .y_label_area_size(65)
        .build_cartesian_2d(regions[..].into_segmented(), 0f32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Earnings Per Win (Thousands $)")
        .draw()?;

    chart.draw_series(vec![
        Boxplot::new_vertical(SegmentValue::CenterOf(&regions[0]), &Quartiles::new(&na))
            .width(50)
            .style(&NA_COLOR),
        Boxplot::new_vertical(SegmentValue::CenterOf(&regions[1]), &Quartiles::new(&eu))
            .width(50)
            .style(&EU_COLOR),
    ])?;

    root.present()?;
    log::info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, wins: u32, earnings: f64) -> PlayerRecord {
        PlayerRecord {
            player: "p".to_string(),
            country: country.to_string(),
            first_place: wins,
            second_place: 0,
            third_place: 0,
            earnings,
        }
    }

    #[test]
    fn renders_all_charts_for_mixed_records() {
        let records = vec![
            record("United States", 5, 500_000.0),
            record("Canada", 3, 250_000.0),
            record("France", 4, 400_000.0),
            record("Germany", 2, 150_000.0),
            record("Brazil", 1, 90_000.0),
        ];

        let dir = tempfile::tempdir().unwrap();
        render_all(&records, dir.path()).unwrap();

        for name in [
            "regional_comparison.png",
            "correlation_plot.png",
            "efficiency_boxplot.png",
        ] {
            let file = dir.path().join(name);
            assert!(file.exists(), "{name} missing");
            assert!(std::fs::metadata(&file).unwrap().len() > 0);
        }
    }

    #[test]
    fn boxplot_skipped_without_winners() {
        let records = vec![
            record("United States", 0, 10_000.0),
            record("France", 0, 10_000.0),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("efficiency_boxplot.png");
        render_efficiency_boxplot(&records, &path).unwrap();
        assert!(!path.exists());
    }
}
