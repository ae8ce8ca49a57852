use std::io::Write;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::domain::quality::QualityScoreSeries;
use crate::services::control_limits::ControlLimits;
use crate::services::simulation_types::TimelinePoint;

#[derive(Error, Debug)]
pub enum CsvExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct SuccessRateRow {
    run: usize,
    success_rate: f64,
}

#[derive(Serialize)]
struct ControlPointRow<'a> {
    batch_id: &'a str,
    timestamp: String,
    score: f64,
    center: f64,
    upper_control_limit: f64,
    lower_control_limit: f64,
    out_of_control: bool,
}

pub fn write_success_rates_csv<P: AsRef<Path>>(
    path: P,
    success_rates: &[f64],
) -> Result<(), CsvExportError> {
    let file = std::fs::File::create(path)?;
    write_success_rates(file, success_rates)
}

pub fn write_success_rates<W: Write>(
    writer: W,
    success_rates: &[f64],
) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (index, success_rate) in success_rates.iter().enumerate() {
        csv_writer.serialize(SuccessRateRow {
            run: index + 1,
            success_rate: *success_rate,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_timeline_csv<P: AsRef<Path>>(
    path: P,
    timeline: &[TimelinePoint],
) -> Result<(), CsvExportError> {
    let file = std::fs::File::create(path)?;
    write_timeline(file, timeline)
}

pub fn write_timeline<W: Write>(
    writer: W,
    timeline: &[TimelinePoint],
) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in timeline {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_control_points_csv<P: AsRef<Path>>(
    path: P,
    series: &QualityScoreSeries,
    limits: &ControlLimits,
) -> Result<(), CsvExportError> {
    let file = std::fs::File::create(path)?;
    write_control_points(file, series, limits)
}

/// One row per batch with the limits repeated, so the file can be charted
/// on its own.
pub fn write_control_points<W: Write>(
    writer: W,
    series: &QualityScoreSeries,
    limits: &ControlLimits,
) -> Result<(), CsvExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in &series.entries {
        csv_writer.serialize(ControlPointRow {
            batch_id: &entry.batch_id,
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            score: entry.score,
            center: limits.center,
            upper_control_limit: limits.upper,
            lower_control_limit: limits.lower,
            out_of_control: !limits.contains(entry.score),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::control_limits::compute_limits;
    use crate::test_support::build_series;

    #[test]
    fn write_success_rates_numbers_runs_from_one() {
        let mut buffer = Vec::new();
        write_success_rates(&mut buffer, &[72.5, 80.0]).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(output, "run,success_rate\n1,72.5\n2,80.0\n");
    }

    #[test]
    fn write_timeline_includes_header() {
        let timeline = vec![
            TimelinePoint {
                month: 1,
                enrollment: 50,
                projected_completions: 45,
            },
            TimelinePoint {
                month: 2,
                enrollment: 100,
                projected_completions: 90,
            },
        ];
        let mut buffer = Vec::new();
        write_timeline(&mut buffer, &timeline).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert!(output.starts_with("month,enrollment,projected_completions\n"));
        assert!(output.contains("2,100,90"));
    }

    #[test]
    fn write_control_points_marks_flagged_batches() {
        let mut scores = vec![10.0; 19];
        scores.push(1000.0);
        let series = build_series(&scores);
        let limits = compute_limits(&series).unwrap();

        let mut buffer = Vec::new();
        write_control_points(&mut buffer, &series, &limits).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 21);
        assert!(lines[0].starts_with("batch_id,timestamp,score,center"));
        assert!(lines[1].starts_with("B001,2026-01-01 08:00:00,10.0,"));
        assert!(lines[1].ends_with(",false"));
        assert!(lines[20].starts_with("B020,"));
        assert!(lines[20].ends_with(",true"));
    }
}
