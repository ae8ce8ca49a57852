use plotters::prelude::*;
use thiserror::Error;

use crate::services::simulation_types::SimulationSummary;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bin {
    start: f64,
    end: f64,
    count: usize,
}

pub async fn write_histogram_png(
    output_path: &str,
    summary: &SimulationSummary,
) -> Result<(), HistogramError> {
    let output_path = output_path.to_string();
    let summary = summary.clone();
    tokio::task::spawn_blocking(move || render_histogram_png(&output_path, &summary))
        .await
        .map_err(|e| HistogramError::Render(e.to_string()))?
}

/// Square-root rule over the observed range; a constant sample gets one
/// unit-wide bin.
fn bin_success_rates(rates: &[f64]) -> Vec<Bin> {
    if rates.is_empty() {
        return Vec::new();
    }

    let min_value = rates.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = rates.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max_value - min_value;
    if range < f64::EPSILON {
        return vec![Bin {
            start: min_value - 0.5,
            end: min_value + 0.5,
            count: rates.len(),
        }];
    }

    let bin_count = (rates.len() as f64).sqrt().ceil().max(1.0) as usize;
    let bin_width = range / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|index| Bin {
            start: min_value + index as f64 * bin_width,
            end: min_value + (index + 1) as f64 * bin_width,
            count: 0,
        })
        .collect();

    for rate in rates {
        let index = (((rate - min_value) / bin_width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }
    bins
}

fn render_histogram_png(
    output_path: &str,
    summary: &SimulationSummary,
) -> Result<(), HistogramError> {
    let bins = bin_success_rates(&summary.success_rates);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Ok(());
    };
    let max_count = bins.iter().map(|bin| bin.count).max().unwrap_or(1);
    let x_range = first.start.min(summary.lower_bound)..last.end.max(summary.upper_bound);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Simulated Success Rate", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(x_range, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Success rate (%)")
        .y_desc("Frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{value:.1}"))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(
            bins.iter()
                .map(|bin| Rectangle::new([(bin.start, 0), (bin.end, bin.count)], bar_style)),
        )
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let top = max_count + 1;
    chart
        .draw_series(LineSeries::new(
            vec![(summary.lower_bound, 0), (summary.lower_bound, top)],
            &RED,
        ))
        .map_err(|e| HistogramError::Render(e.to_string()))?
        .label(format!("Lower bound {:.1}", summary.lower_bound))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart
        .draw_series(LineSeries::new(
            vec![(summary.upper_bound, 0), (summary.upper_bound, top)],
            &RED,
        ))
        .map_err(|e| HistogramError::Render(e.to_string()))?
        .label(format!("Upper bound {:.1}", summary.upper_bound))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart
        .draw_series(LineSeries::new(
            vec![(summary.mean_success_rate, 0), (summary.mean_success_rate, top)],
            &BLACK,
        ))
        .map_err(|e| HistogramError::Render(e.to_string()))?
        .label(format!("Mean {:.1}", summary.mean_success_rate))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
