use super::{Formatter, GuidanceReadout};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, readout: &GuidanceReadout) -> String {
        let Some(rotate) = readout.render_angle_degrees else {
            return match readout.destination {
                Some(ref label) => format!("Acquiring fix and heading for {}...", label),
                None => "Idle".to_string(),
            };
        };

        let distance = readout
            .distance_m
            .map_or("-".to_string(), format_distance);

        if self.verbose {
            let heading = readout
                .heading_degrees
                .map_or("-".to_string(), |h| format!("{:.1}°", h));
            let bearing = readout
                .target_bearing_degrees
                .map_or("-".to_string(), |b| format!("{:.1}°", b));
            format!(
                "Rotate: {:>6.1}° [bearing: {}, heading: {}, distance: {}]",
                rotate, bearing, heading, distance
            )
        } else {
            format!("Rotate: {:>6.1}°  distance: {}", rotate, distance)
        }
    }
}

fn format_distance(meters: f64) -> String {
    if meters >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} m", meters)
    }
}
