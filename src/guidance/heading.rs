use std::time::{Duration, Instant};

use crate::config::HeadingConfig;
use crate::geodesy::normalize_degrees;

/// One raw 2-axis magnetic field reading, in the device's horizontal plane.
///
/// Values are uncalibrated and orientation-dependent; the filter derives a
/// heading from the field direction alone.
#[derive(Debug, Clone, Copy)]
pub struct MagneticSample {
    pub x: f64,
    pub y: f64,
}

/// Derives a compass heading from the magnetometer stream.
///
/// Samples are rate-limited to a minimum interval (default 100 ms); anything
/// arriving faster is silently dropped, which bounds CPU cost and keeps the
/// latest-value cell from churning on sensor jitter. No tilt compensation or
/// declination correction is applied, so heading accuracy matches the raw
/// magnetometer at device-flat orientation.
pub struct HeadingFilter {
    min_interval: Duration,
    last_accepted_at: Option<Instant>,
    heading_degrees: Option<f64>,
}

impl HeadingFilter {
    pub fn new(config: &HeadingConfig) -> Self {
        Self {
            min_interval: config.update_interval(),
            last_accepted_at: None,
            heading_degrees: None,
        }
    }

    /// Feed one sample, timestamped now.
    ///
    /// Returns the new heading, or `None` if the sample fell inside the
    /// rate-limit window and was dropped.
    pub fn update(&mut self, sample: MagneticSample) -> Option<f64> {
        self.update_at(sample, Instant::now())
    }

    /// Feed one sample with an explicit monotonic timestamp.
    pub fn update_at(&mut self, sample: MagneticSample, now: Instant) -> Option<f64> {
        if let Some(last) = self.last_accepted_at {
            if now.duration_since(last) < self.min_interval {
                return None;
            }
        }

        let heading = normalize_degrees(sample.y.atan2(sample.x).to_degrees());
        self.last_accepted_at = Some(now);
        self.heading_degrees = Some(heading);
        Some(heading)
    }

    /// Last accepted heading in [0, 360), or `None` before the first sample.
    ///
    /// A stale heading is kept through sensor dropout; for a best-effort
    /// indicator that beats reporting nothing.
    pub fn heading_degrees(&self) -> Option<f64> {
        self.heading_degrees
    }

    pub fn reset(&mut self) {
        self.last_accepted_at = None;
        self.heading_degrees = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn filter() -> HeadingFilter {
        HeadingFilter::new(&HeadingConfig::default())
    }

    #[test]
    fn test_cardinal_headings() {
        let t0 = Instant::now();
        let mut f = filter();

        let h = f
            .update_at(MagneticSample { x: 1.0, y: 0.0 }, t0)
            .unwrap();
        assert_relative_eq!(h, 0.0);

        let h = f
            .update_at(
                MagneticSample { x: 0.0, y: 1.0 },
                t0 + Duration::from_millis(100),
            )
            .unwrap();
        assert_relative_eq!(h, 90.0);

        let h = f
            .update_at(
                MagneticSample { x: -1.0, y: 0.0 },
                t0 + Duration::from_millis(200),
            )
            .unwrap();
        assert_relative_eq!(h, 180.0);

        let h = f
            .update_at(
                MagneticSample { x: 0.0, y: -1.0 },
                t0 + Duration::from_millis(300),
            )
            .unwrap();
        assert_relative_eq!(h, 270.0);
    }

    #[test]
    fn test_rate_limit_drops_fast_samples() {
        let t0 = Instant::now();
        let mut f = filter();

        assert!(f.update_at(MagneticSample { x: 1.0, y: 0.0 }, t0).is_some());

        // 50 ms later: inside the window, dropped, heading unchanged
        let dropped = f.update_at(
            MagneticSample { x: 0.0, y: 1.0 },
            t0 + Duration::from_millis(50),
        );
        assert!(dropped.is_none());
        assert_relative_eq!(f.heading_degrees().unwrap(), 0.0);

        // 100 ms after the accepted sample: accepted again
        let h = f.update_at(
            MagneticSample { x: 0.0, y: 1.0 },
            t0 + Duration::from_millis(100),
        );
        assert_relative_eq!(h.unwrap(), 90.0);
    }

    #[test]
    fn test_unknown_before_first_sample() {
        assert!(filter().heading_degrees().is_none());
    }

    #[test]
    fn test_reset_clears_state() {
        let t0 = Instant::now();
        let mut f = filter();
        f.update_at(MagneticSample { x: 1.0, y: 0.0 }, t0);
        f.reset();
        assert!(f.heading_degrees().is_none());

        // Rate-limit window also cleared: an immediate sample is accepted
        assert!(f.update_at(MagneticSample { x: 1.0, y: 1.0 }, t0).is_some());
    }

    #[test]
    fn test_heading_normalized() {
        let t0 = Instant::now();
        let mut f = filter();
        // Southwest-ish field: atan2 yields a negative angle pre-normalization
        let h = f
            .update_at(MagneticSample { x: -1.0, y: -1.0 }, t0)
            .unwrap();
        assert_relative_eq!(h, 225.0);
        assert!((0.0..360.0).contains(&h));
    }
}
