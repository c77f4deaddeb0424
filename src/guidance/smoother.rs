use std::time::Duration;

use crate::config::{Easing, SmoothingConfig};
use crate::geodesy::{normalize_degrees, shortest_delta_degrees};

/// Retarget threshold in degrees; target changes smaller than this continue
/// the active segment instead of restarting it.
const RETARGET_EPSILON: f64 = 1e-6;

struct Segment {
    start_degrees: f64,
    delta_degrees: f64,
    elapsed: Duration,
}

impl Segment {
    fn end_degrees(&self) -> f64 {
        normalize_degrees(self.start_degrees + self.delta_degrees)
    }
}

/// Eases the rendered angle toward the latest target without visual snapping.
///
/// Each target change starts a fresh easing segment from the current
/// smoothed value, with the segment delta taken as the signed shortest
/// angular distance. This is the only place in the engine that must handle
/// the 0/360 discontinuity: a retarget from 350 to 10 moves +20 through
/// north, never -340 the long way around, and no single tick can step
/// farther than 180 degrees.
pub struct AngleSmoother {
    duration: Duration,
    easing: Easing,
    current_degrees: f64,
    segment: Option<Segment>,
}

impl AngleSmoother {
    pub fn new(config: &SmoothingConfig) -> Self {
        Self {
            duration: config.duration(),
            easing: config.easing,
            current_degrees: 0.0,
            segment: None,
        }
    }

    /// The smoothed render angle in [0, 360).
    pub fn current_degrees(&self) -> f64 {
        self.current_degrees
    }

    /// Snap to a value and drop any in-flight segment. Used when a guidance
    /// session restarts with a new destination.
    pub fn reset(&mut self, degrees: f64) {
        self.current_degrees = normalize_degrees(degrees);
        self.segment = None;
    }

    /// Advance by `elapsed` toward `target_degrees` and return the new
    /// smoothed angle.
    pub fn tick(&mut self, target_degrees: f64, elapsed: Duration) -> f64 {
        let target = normalize_degrees(target_degrees);

        let settled = match &self.segment {
            Some(segment) => segment.end_degrees(),
            None => self.current_degrees,
        };
        if shortest_delta_degrees(settled, target).abs() > RETARGET_EPSILON {
            self.segment = Some(Segment {
                start_degrees: self.current_degrees,
                delta_degrees: shortest_delta_degrees(self.current_degrees, target),
                elapsed: Duration::ZERO,
            });
        }

        let Some(segment) = &mut self.segment else {
            return self.current_degrees;
        };

        segment.elapsed += elapsed;
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (segment.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let eased = ease(self.easing, progress);

        self.current_degrees =
            normalize_degrees(segment.start_degrees + segment.delta_degrees * eased);
        if progress >= 1.0 {
            self.segment = None;
        }

        self.current_degrees
    }
}

fn ease(easing: Easing, t: f64) -> f64 {
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
    }
}
