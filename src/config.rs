//! Configuration for the guidance engine.
//!
//! Defaults: magnetometer samples accepted at most every 100 ms, indicator
//! easing over 300 ms with cubic ease-out, and a 60 Hz animation tick.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::geodesy::GeoPoint;

/// A "lat,lon" coordinate pair parsed from the command line or a config
/// file.
///
/// # Parsing format
/// - `1.27,103.84` - decimal degrees, latitude first
/// - whitespace around either number is accepted
///
/// # Example
/// ```
/// use arcompass::config::LatLon;
///
/// let p: LatLon = "1.27, 103.84".parse().unwrap();
/// assert!((p.point().latitude_degrees() - 1.27).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LatLon(GeoPoint);

impl LatLon {
    pub fn point(&self) -> GeoPoint {
        self.0
    }
}

impl From<GeoPoint> for LatLon {
    fn from(point: GeoPoint) -> Self {
        Self(point)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LatLon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got: {}", s))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| format!("invalid latitude: {}", lat.trim()))?;
        let longitude: f64 = lon
            .trim()
            .parse()
            .map_err(|_| format!("invalid longitude: {}", lon.trim()))?;

        let point = GeoPoint::new(latitude, longitude).map_err(|e| e.to_string())?;
        Ok(Self(point))
    }
}

/// System-wide guidance configuration
///
/// Use `GuidanceConfig::default()` for sensible defaults, or deserialize
/// from a TOML table to override individual sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Heading derivation configuration
    pub heading: HeadingConfig,
    /// Indicator smoothing configuration
    pub smoothing: SmoothingConfig,
    /// Render/readout pacing configuration
    pub output: OutputConfig,
}

/// Heading derivation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Minimum interval between accepted magnetometer samples in
    /// milliseconds; samples arriving faster are silently dropped
    pub update_interval_ms: u64,
}

impl HeadingConfig {
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.update_interval_ms)
    }
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 100,
        }
    }
}

/// Easing curve applied by the angle smoother
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant-rate interpolation
    Linear,
    /// Cubic ease-out: fast start, gentle settle
    EaseOut,
}

/// Indicator smoothing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Duration of one easing segment in milliseconds
    pub duration_ms: u64,
    /// Easing curve
    pub easing: Easing,
}

impl SmoothingConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::EaseOut,
        }
    }
}

/// Render/readout pacing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Animation tick rate in Hz
    pub frame_rate_hz: f64,
    /// Readout output rate in Hz
    pub readout_rate_hz: f64,
}

impl OutputConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate_hz)
    }

    pub fn readout_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.readout_rate_hz)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60.0,
            readout_rate_hz: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lon_parse() {
        let p: LatLon = "1.27,103.84".parse().unwrap();
        assert!((p.point().latitude_degrees() - 1.27).abs() < 1e-9);
        assert!((p.point().longitude_degrees() - 103.84).abs() < 1e-9);
    }

    #[test]
    fn test_lat_lon_parse_whitespace() {
        let p: LatLon = " -33.86 , 151.21 ".parse().unwrap();
        assert!((p.point().latitude_degrees() + 33.86).abs() < 1e-9);
    }

    #[test]
    fn test_lat_lon_parse_invalid() {
        assert!("1.27".parse::<LatLon>().is_err());
        assert!("abc,103.84".parse::<LatLon>().is_err());
        assert!("1.27,abc".parse::<LatLon>().is_err());
        // Out of range
        assert!("91.0,0.0".parse::<LatLon>().is_err());
        assert!("0.0,181.0".parse::<LatLon>().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = GuidanceConfig::default();
        assert_eq!(config.heading.update_interval_ms, 100);
        assert_eq!(config.smoothing.duration_ms, 300);
        assert_eq!(config.smoothing.easing, Easing::EaseOut);
        assert_eq!(config.output.frame_rate_hz, 60.0);
    }

    #[test]
    fn test_toml_partial_override() {
        let config: GuidanceConfig = toml::from_str(
            r#"
            [smoothing]
            duration_ms = 500
            easing = "linear"
            "#,
        )
        .unwrap();
        assert_eq!(config.smoothing.duration_ms, 500);
        assert_eq!(config.smoothing.easing, Easing::Linear);
        // Untouched sections keep their defaults
        assert_eq!(config.heading.update_interval_ms, 100);
    }
}
