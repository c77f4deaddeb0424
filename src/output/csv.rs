use super::{Formatter, GuidanceReadout, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, readout: &GuidanceReadout) -> String {
        let opt = |v: Option<f64>| v.map_or(String::new(), |x| format!("{:.2}", x));
        format!(
            "{},{},{},{},{},{},{}",
            iso8601_timestamp(),
            readout.phase,
            opt(readout.heading_degrees),
            opt(readout.target_bearing_degrees),
            opt(readout.relative_angle_degrees),
            opt(readout.render_angle_degrees),
            opt(readout.distance_m),
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,phase,heading,target_bearing,relative_angle,render_angle,distance_m")
    }
}
