//! The guidance core: latest-value sensor cells, the bearing engine, and
//! the session state machine that ties them together.

mod engine;
mod heading;
mod position;
mod session;
mod smoother;

pub use engine::{BearingEngine, BearingState};
pub use heading::{HeadingFilter, MagneticSample};
pub use position::PositionTracker;
pub use session::{GuidancePhase, GuidanceSession};
pub use smoother::AngleSmoother;

use crate::geodesy::GeoPoint;

/// One event from either asynchronous sensor producer.
///
/// Both producers feed a single channel so the consumer loop stays a plain
/// `recv`; ordering between the two streams is not guaranteed and not
/// required.
#[derive(Debug, Clone, Copy)]
pub enum GuidanceEvent {
    /// A geographic fix from the location subscription
    Fix(GeoPoint),
    /// A raw field sample from the magnetometer subscription
    Magnetometer(MagneticSample),
}
