use plotters::prelude::*;
use thiserror::Error;

use crate::domain::quality::QualityScoreSeries;
use crate::services::control_limits::ControlLimits;

#[derive(Error, Debug)]
pub enum ControlChartError {
    #[error("failed to render control chart: {0}")]
    Plot(String),
}

pub async fn write_control_chart_png(
    output_path: &str,
    series: &QualityScoreSeries,
    limits: &ControlLimits,
) -> Result<(), ControlChartError> {
    let output_path = output_path.to_string();
    let series = series.clone();
    let limits = limits.clone();
    tokio::task::spawn_blocking(move || render_control_chart_png(&output_path, &series, &limits))
        .await
        .map_err(|e| ControlChartError::Plot(e.to_string()))??;
    Ok(())
}

/// Vertical range covering every score and both limits, padded by 5%.
fn value_range(series: &QualityScoreSeries, limits: &ControlLimits) -> (f64, f64) {
    let low = series.scores().fold(limits.lower, f64::min);
    let high = series.scores().fold(limits.upper, f64::max);
    let padding = ((high - low) * 0.05).max(1.0);
    (low - padding, high + padding)
}

fn render_control_chart_png(
    output_path: &str,
    series: &QualityScoreSeries,
    limits: &ControlLimits,
) -> Result<(), ControlChartError> {
    if series.is_empty() {
        return Ok(());
    }

    let (min_y, max_y) = value_range(series, limits);
    let max_x = series.len().max(2) as i32 - 1;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Quality Control Chart", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, min_y..max_y)
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    let label_count = series.len().min(10).max(1);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Batch")
        .y_desc("Quality score")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            series
                .entries
                .get(*index as usize)
                .map(|entry| entry.batch_id.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    for (value, color, name) in [
        (limits.upper, RED, "UCL"),
        (limits.center, GREEN, "Center"),
        (limits.lower, RED, "LCL"),
    ] {
        chart
            .draw_series(LineSeries::new(vec![(0, value), (max_x, value)], &color))
            .map_err(|e| ControlChartError::Plot(e.to_string()))?
            .label(format!("{name} {value:.2}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    let line_color = RGBColor(30, 122, 204);
    chart
        .draw_series(LineSeries::new(
            series
                .entries
                .iter()
                .enumerate()
                .map(|(idx, entry)| (idx as i32, entry.score)),
            &line_color,
        ))
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    chart
        .draw_series(series.entries.iter().enumerate().map(|(idx, entry)| {
            let style = if limits.contains(entry.score) {
                ShapeStyle::from(&line_color).filled()
            } else {
                ShapeStyle::from(&RED).filled()
            };
            Circle::new((idx as i32, entry.score), 4, style)
        }))
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| ControlChartError::Plot(e.to_string()))?;
    Ok(())
}
