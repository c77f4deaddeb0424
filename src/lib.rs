pub mod config;
pub mod destinations;
pub mod error;
pub mod geodesy;
pub mod guidance;
pub mod output;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::GuidanceConfig;
pub use error::{GuidanceError, Result};
pub use geodesy::GeoPoint;
pub use guidance::{GuidanceEvent, GuidancePhase, GuidanceSession};
