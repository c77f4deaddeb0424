use crate::geodesy::{self, GeoPoint};

/// Result of one relative-angle recomputation
///
/// Derived from the two latest-value cells; never independently mutated.
#[derive(Debug, Clone, Copy)]
pub struct BearingState {
    /// Great-circle bearing from current position to the destination (0-360)
    pub target_bearing_degrees: f64,
    /// Angle the indicator must rotate clockwise from "up" (0-360)
    pub relative_angle_degrees: f64,
}

/// Combines destination bearing and device heading into the indicator
/// rotation angle.
///
/// Stateless beyond the fixed destination: each `recompute` reads whatever
/// the position and heading cells currently hold, so interleaved updates
/// from the two producers resolve as "last update wins". The fix and the
/// heading used together were not necessarily captured at the same instant;
/// that is an accepted approximation for a human-facing indicator.
pub struct BearingEngine {
    destination: GeoPoint,
}

impl BearingEngine {
    pub fn new(destination: GeoPoint) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> GeoPoint {
        self.destination
    }

    /// Recompute the relative rotation angle.
    ///
    /// Returns `None` until both a position fix and a heading exist.
    pub fn recompute(
        &self,
        position: Option<GeoPoint>,
        heading_degrees: Option<f64>,
    ) -> Option<BearingState> {
        let position = position?;
        let heading = heading_degrees?;

        let target_bearing = geodesy::initial_bearing(position, self.destination);
        let relative = geodesy::normalize_degrees(target_bearing - heading);

        Some(BearingState {
            target_bearing_degrees: target_bearing,
            relative_angle_degrees: relative,
        })
    }
}
