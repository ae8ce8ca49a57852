use plotters::prelude::*;
use thiserror::Error;

use crate::services::simulation_types::TimelinePoint;

#[derive(Error, Debug)]
pub enum TimelinePlotError {
    #[error("failed to render timeline plot: {0}")]
    Plot(String),
}

pub async fn write_timeline_png(
    output_path: &str,
    timeline: &[TimelinePoint],
) -> Result<(), TimelinePlotError> {
    let output_path = output_path.to_string();
    let timeline = timeline.to_vec();
    tokio::task::spawn_blocking(move || render_timeline_png(&output_path, &timeline))
        .await
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))??;
    Ok(())
}

fn render_timeline_png(
    output_path: &str,
    timeline: &[TimelinePoint],
) -> Result<(), TimelinePlotError> {
    let Some(last) = timeline.last() else {
        return Ok(());
    };
    let max_y = last.enrollment.max(last.projected_completions).saturating_add(1);

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Enrollment Projection", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(75)
        .build_cartesian_2d(0..last.month, 0..max_y)
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Month")
        .y_desc("Patients")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?;

    let enrollment_color = RGBColor(30, 122, 204);
    let completion_color = RGBColor(46, 160, 67);
    chart
        .draw_series(LineSeries::new(
            std::iter::once((0, 0)).chain(timeline.iter().map(|p| (p.month, p.enrollment))),
            &enrollment_color,
        ))
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?
        .label("Enrollment")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &enrollment_color));
    chart
        .draw_series(LineSeries::new(
            std::iter::once((0, 0))
                .chain(timeline.iter().map(|p| (p.month, p.projected_completions))),
            &completion_color,
        ))
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?
        .label("Projected completions")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &completion_color));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| TimelinePlotError::Plot(e.to_string()))?;
    Ok(())
}
