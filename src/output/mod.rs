mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Serialize;

use crate::guidance::GuidanceSession;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One snapshot of a guidance session, as handed to a formatter.
#[derive(Debug, Clone, Serialize)]
pub struct GuidanceReadout {
    pub phase: String,
    pub destination: Option<String>,
    pub heading_degrees: Option<f64>,
    pub target_bearing_degrees: Option<f64>,
    pub relative_angle_degrees: Option<f64>,
    pub render_angle_degrees: Option<f64>,
    pub distance_m: Option<f64>,
}

impl GuidanceReadout {
    pub fn capture(session: &GuidanceSession) -> Self {
        let state = session.bearing_state();
        Self {
            phase: session.phase().to_string(),
            destination: session.destination().map(|d| d.label.clone()),
            heading_degrees: session.heading_degrees(),
            target_bearing_degrees: state.map(|s| s.target_bearing_degrees),
            relative_angle_degrees: state.map(|s| s.relative_angle_degrees),
            render_angle_degrees: session.render_angle_degrees(),
            distance_m: session.distance_to_destination_m(),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, readout: &GuidanceReadout) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
