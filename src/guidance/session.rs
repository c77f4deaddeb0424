use std::time::{Duration, Instant};

use crate::config::GuidanceConfig;
use crate::destinations::Destination;
use crate::geodesy::{self, GeoPoint};

use super::{
    AngleSmoother, BearingEngine, BearingState, HeadingFilter, MagneticSample, PositionTracker,
};

/// Lifecycle phase of a guidance session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidancePhase {
    /// No destination set
    Idle,
    /// Destination set, awaiting the first fix and heading; the indicator
    /// is not yet meaningful
    Acquiring,
    /// Both inputs available; the engine produces a value on every update
    Guiding,
}

impl std::fmt::Display for GuidancePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GuidancePhase::Idle => "idle",
            GuidancePhase::Acquiring => "acquiring",
            GuidancePhase::Guiding => "guiding",
        };
        f.write_str(s)
    }
}

struct ActiveGuidance {
    destination: Destination,
    engine: BearingEngine,
    position: PositionTracker,
    heading: HeadingFilter,
    smoother: AngleSmoother,
    latest: Option<BearingState>,
}

impl ActiveGuidance {
    fn recompute(&mut self) -> Option<BearingState> {
        self.latest = self
            .engine
            .recompute(self.position.current(), self.heading.heading_degrees());
        self.latest
    }
}

/// One guidance session: the state machine that binds the position tracker,
/// heading filter, bearing engine, and angle smoother together.
///
/// All methods are synchronous and non-blocking; the hosting loop owns the
/// sensor subscriptions and the animation tick and calls in as events
/// arrive. The session holds no timers or subscriptions of its own, so
/// `stop()` (or dropping the session) leaves nothing running.
pub struct GuidanceSession {
    config: GuidanceConfig,
    active: Option<ActiveGuidance>,
}

impl GuidanceSession {
    pub fn new(config: GuidanceConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Begin guiding toward `destination`, replacing any session in
    /// progress. All per-session state, including the smoothed angle, is
    /// reset.
    pub fn start(&mut self, destination: Destination) {
        log::info!(
            "Guidance started: {} ({})",
            destination.label,
            destination.point
        );
        self.active = Some(ActiveGuidance {
            engine: BearingEngine::new(destination.point),
            destination,
            position: PositionTracker::new(),
            heading: HeadingFilter::new(&self.config.heading),
            smoother: AngleSmoother::new(&self.config.smoothing),
            latest: None,
        });
    }

    /// End the session and return to `Idle`.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            log::info!("Guidance stopped: {}", active.destination.label);
        }
    }

    pub fn phase(&self) -> GuidancePhase {
        match &self.active {
            None => GuidancePhase::Idle,
            Some(active) if active.latest.is_none() => GuidancePhase::Acquiring,
            Some(_) => GuidancePhase::Guiding,
        }
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.active.as_ref().map(|a| &a.destination)
    }

    /// Accept a position fix. Returns the recomputed bearing state, or
    /// `None` while either input is still unknown (or the session is idle).
    pub fn on_fix(&mut self, point: GeoPoint) -> Option<BearingState> {
        let active = self.active.as_mut()?;
        active.position.on_fix(point);
        active.recompute()
    }

    /// Accept a raw magnetometer sample, timestamped now.
    pub fn on_magnetometer(&mut self, sample: MagneticSample) -> Option<BearingState> {
        self.on_magnetometer_at(sample, Instant::now())
    }

    /// Accept a raw magnetometer sample with an explicit timestamp.
    ///
    /// Rate-limited samples are dropped without recomputing; the previous
    /// bearing state is returned unchanged.
    pub fn on_magnetometer_at(
        &mut self,
        sample: MagneticSample,
        now: Instant,
    ) -> Option<BearingState> {
        let active = self.active.as_mut()?;
        match active.heading.update_at(sample, now) {
            Some(_) => active.recompute(),
            None => active.latest,
        }
    }

    /// Advance the smoothed render angle by `elapsed`, easing toward the
    /// latest relative angle. Call once per animation frame.
    ///
    /// Returns `None` until the session is guiding.
    pub fn tick(&mut self, elapsed: Duration) -> Option<f64> {
        let active = self.active.as_mut()?;
        let target = active.latest?;
        Some(
            active
                .smoother
                .tick(target.relative_angle_degrees, elapsed),
        )
    }

    /// The current smoothed render angle, without advancing it. `None`
    /// until the session is guiding; the render layer shows its neutral
    /// state instead of an angle of 0.
    pub fn render_angle_degrees(&self) -> Option<f64> {
        let active = self.active.as_ref()?;
        active.latest?;
        Some(active.smoother.current_degrees())
    }

    /// Latest raw bearing state, if both inputs have been seen.
    pub fn bearing_state(&self) -> Option<BearingState> {
        self.active.as_ref().and_then(|a| a.latest)
    }

    /// Last accepted heading.
    pub fn heading_degrees(&self) -> Option<f64> {
        self.active.as_ref().and_then(|a| a.heading.heading_degrees())
    }

    /// Great-circle distance from the latest fix to the destination, in
    /// meters.
    pub fn distance_to_destination_m(&self) -> Option<f64> {
        let active = self.active.as_ref()?;
        let position = active.position.current()?;
        Some(geodesy::haversine_distance_m(
            position,
            active.engine.destination(),
        ))
    }
}
