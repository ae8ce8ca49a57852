pub mod control_chart_plot;
pub mod control_limits;
pub mod csv_export;
pub mod histogram;
pub mod percentiles;
pub mod quality_series_yaml;
pub mod report_output;
pub mod scenario_yaml;
pub mod simulation_types;
pub mod timeline;
pub mod timeline_plot;
pub mod trial_simulation;
