use crate::geodesy::GeoPoint;

/// Latest accepted geographic fix.
///
/// Fixes replace the stored value unconditionally; there is no filtering or
/// outlier rejection. Before the first fix (or if permission is never
/// granted and none ever arrives) the tracker reports `None`, which the
/// engine propagates as "unknown" rather than defaulting to a bogus angle.
#[derive(Debug, Default)]
pub struct PositionTracker {
    fix: Option<GeoPoint>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_fix(&mut self, point: GeoPoint) {
        self.fix = Some(point);
    }

    pub fn current(&self) -> Option<GeoPoint> {
        self.fix
    }

    pub fn reset(&mut self) {
        self.fix = None;
    }
}
