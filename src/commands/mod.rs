pub mod base_commands;
pub mod control_chart_cmd;
pub mod report_format;
pub mod simulate_cmd;
pub mod timeline_cmd;
