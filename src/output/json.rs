use serde::Serialize;

use super::{Formatter, GuidanceReadout, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(Serialize)]
struct TimestampedReadout<'a> {
    ts: String,
    #[serde(flatten)]
    readout: &'a GuidanceReadout,
}

impl Formatter for JsonFormatter {
    fn format(&self, readout: &GuidanceReadout) -> String {
        let line = TimestampedReadout {
            ts: iso8601_timestamp(),
            readout,
        };
        // Readout fields are plain strings and floats; serialization cannot
        // fail on them
        serde_json::to_string(&line).unwrap_or_default()
    }
}
