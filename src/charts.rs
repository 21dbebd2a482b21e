use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::{info, warn};

use crate::classify::Role;
use crate::stats::{self, AggregateRow};

const CHART_SIZE: (u32, u32) = (1200, 600);
const SALARY_AXIS: &str = "Salary (k €)";

/// Render the three role charts as SVG files under `dir` and return their paths.
pub fn render_all(
    dir: &Path,
    rows: &[AggregateRow],
    groups: &BTreeMap<Role, Vec<u64>>,
) -> Result<Vec<PathBuf>> {
    if rows.is_empty() {
        warn!("No cleaned postings; skipping charts");
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;

    let avg_path = dir.join("avg_salary_by_role.svg");
    let by_mean: Vec<(&str, f64)> = stats::by_mean(rows)
        .iter()
        .map(|r| (r.role.as_str(), r.avg_salary_k))
        .collect();
    bar_chart(&avg_path, "Average Salary by Role", SALARY_AXIS, &by_mean)?;

    let dist_path = dir.join("salary_distribution_by_role.svg");
    distribution_chart(&dist_path, &stats::by_variance(groups))?;

    let count_path = dir.join("salary_count_by_role.svg");
    let by_count: Vec<(&str, f64)> = stats::by_count(rows)
        .iter()
        .map(|r| (r.role.as_str(), r.count as f64))
        .collect();
    bar_chart(&count_path, "Number of Job Listings per Role", "Count", &by_count)?;

    let paths = vec![avg_path, dist_path, count_path];
    info!("Rendered {} charts into {:?}", paths.len(), dir);
    Ok(paths)
}

fn bar_chart(path: &Path, caption: &str, y_desc: &str, bars: &[(&str, f64)]) -> Result<()> {
    let labels: Vec<&str> = bars.iter().map(|(l, _)| *l).collect();
    let top = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max).max(1.0) * 1.1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(170)
        .y_label_area_size(60)
        .build_cartesian_2d((0..bars.len()).into_segmented(), 0f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| segment_label(x, &labels))
        .x_label_style(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
        .x_desc("Role")
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(8)
            .data(bars.iter().enumerate().map(|(i, (_, v))| (i, *v))),
    )?;

    root.present()
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

/// Strip plot: one dot per posting, a min–max bar and a cross at the mean.
fn distribution_chart(path: &Path, groups: &[(Role, &[u64])]) -> Result<()> {
    let labels: Vec<&str> = groups.iter().map(|(r, _)| r.as_str()).collect();
    let max = groups
        .iter()
        .flat_map(|(_, s)| s.iter().copied())
        .max()
        .unwrap_or_default();
    let top = (max as f64).max(1.0) * 1.1;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Salary Distribution by Role (sorted by variance)", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(170)
        .y_label_area_size(60)
        .build_cartesian_2d((0..groups.len()).into_segmented(), 0f64..top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len())
        .x_label_formatter(&|x| segment_label(x, &labels))
        .x_label_style(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
        .x_desc("Role")
        .y_desc(SALARY_AXIS)
        .draw()?;

    chart.draw_series(groups.iter().enumerate().map(|(i, (_, salaries))| {
        let lo = salaries.iter().copied().min().unwrap_or_default();
        let hi = salaries.iter().copied().max().unwrap_or_default();
        PathElement::new(
            vec![
                (SegmentValue::CenterOf(i), lo as f64),
                (SegmentValue::CenterOf(i), hi as f64),
            ],
            BLACK.stroke_width(2),
        )
    }))?;

    chart.draw_series(groups.iter().enumerate().flat_map(|(i, (_, salaries))| {
        salaries.iter().map(move |&s| {
            Circle::new(
                (SegmentValue::CenterOf(i), s as f64),
                4,
                BLUE.mix(0.5).filled(),
            )
        })
    }))?;

    chart.draw_series(groups.iter().enumerate().map(|(i, (_, salaries))| {
        let sum: f64 = salaries.iter().map(|&s| s as f64).sum();
        let mean = sum / salaries.len().max(1) as f64;
        Cross::new((SegmentValue::CenterOf(i), mean), 6, RED.stroke_width(2))
    }))?;

    root.present()
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

fn segment_label(x: &SegmentValue<usize>, labels: &[&str]) -> String {
    match x {
        SegmentValue::CenterOf(i) => labels.get(*i).map(|l| l.to_string()).unwrap_or_default(),
        _ => String::new(),
    }
}
