use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::ProducerHandle;
use crate::geodesy::{self, EARTH_RADIUS_M, GeoPoint};
use crate::guidance::GuidanceEvent;

/// Meters per degree of latitude on the spherical Earth.
const M_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Configuration for a simulated GPS walk toward a destination.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Walking speed in meters per second
    pub speed_mps: f64,
    /// Interval between fixes in milliseconds
    pub fix_interval_ms: u64,
    /// Standard deviation of per-fix position noise in meters
    pub noise_std_m: f64,
    /// RNG seed for reproducible runs
    pub seed: u64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            speed_mps: 1.4,
            fix_interval_ms: 1000,
            noise_std_m: 3.0,
            seed: 7,
        }
    }
}

/// Walks a straight great-circle line from a start point to a destination,
/// emitting noisy fixes at a fixed cadence.
pub struct SimulatedWalk {
    position: GeoPoint,
    destination: GeoPoint,
    config: WalkConfig,
    rng: ChaCha8Rng,
    noise: Normal<f64>,
}

impl SimulatedWalk {
    pub fn new(start: GeoPoint, destination: GeoPoint, config: WalkConfig) -> Self {
        let noise = Normal::new(0.0, config.noise_std_m).unwrap();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            position: start,
            destination,
            config,
            rng,
            noise,
        }
    }

    /// Advance by one fix interval and return the next (noisy) fix.
    pub fn next_fix(&mut self) -> GeoPoint {
        let step_m = self.config.speed_mps * self.config.fix_interval_ms as f64 / 1000.0;
        let remaining_m = geodesy::haversine_distance_m(self.position, self.destination);

        if remaining_m <= step_m {
            self.position = self.destination;
        } else {
            let bearing = geodesy::initial_bearing(self.position, self.destination).to_radians();
            self.position = offset_by_meters(
                self.position,
                step_m * bearing.cos(),
                step_m * bearing.sin(),
            );
        }

        let north_noise = self.noise.sample(&mut self.rng);
        let east_noise = self.noise.sample(&mut self.rng);
        offset_by_meters(self.position, north_noise, east_noise)
    }

    /// The walker's true position (without fix noise).
    pub fn true_position(&self) -> GeoPoint {
        self.position
    }

    /// Current travel direction, which a device held flat while walking
    /// would report as its heading.
    pub fn bearing_to_destination(&self) -> f64 {
        geodesy::initial_bearing(self.position, self.destination)
    }

    pub fn arrived(&self) -> bool {
        self.position == self.destination
    }

    pub fn fix_interval(&self) -> Duration {
        Duration::from_millis(self.config.fix_interval_ms)
    }

    /// Spawn a producer thread feeding fixes into `tx` until the handle is
    /// dropped or the receiver goes away.
    pub fn spawn(mut self, tx: Sender<GuidanceEvent>) -> ProducerHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let interval = self.fix_interval();

        let thread = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let fix = self.next_fix();
                if tx.send(GuidanceEvent::Fix(fix)).is_err() {
                    log::warn!("Fix receiver dropped");
                    break;
                }
                thread::sleep(interval);
            }
        });

        ProducerHandle::new(stop, thread)
    }
}

/// Displace a point by the given north/east meters.
fn offset_by_meters(point: GeoPoint, north_m: f64, east_m: f64) -> GeoPoint {
    let delta_lat = north_m / M_PER_DEGREE;
    let delta_lon =
        east_m / (M_PER_DEGREE * point.latitude_degrees().to_radians().cos().max(1e-9));

    let latitude = (point.latitude_degrees() + delta_lat).clamp(-90.0, 90.0);
    let longitude = (point.longitude_degrees() + delta_lon + 180.0).rem_euclid(360.0) - 180.0;

    GeoPoint::new(latitude, longitude).expect("offset coordinates stay in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_config(noise_std_m: f64) -> WalkConfig {
        WalkConfig {
            speed_mps: 1.4,
            fix_interval_ms: 1000,
            noise_std_m,
            seed: 42,
        }
    }

    #[test]
    fn test_walk_converges_on_destination() {
        let start = GeoPoint::new(1.2700, 103.8400).unwrap();
        let destination = GeoPoint::new(1.2710, 103.8410).unwrap();
        let mut walk = SimulatedWalk::new(start, destination, walk_config(0.0));

        // ~157 m at 1.4 m/s: well under 3 minutes of fixes
        let mut fixes = 0;
        while !walk.arrived() && fixes < 200 {
            walk.next_fix();
            fixes += 1;
        }
        assert!(walk.arrived(), "did not arrive after {} fixes", fixes);
    }

    #[test]
    fn test_fixes_are_reproducible_for_seed() {
        let start = GeoPoint::new(1.27, 103.84).unwrap();
        let destination = GeoPoint::new(1.30, 103.80).unwrap();
        let mut a = SimulatedWalk::new(start, destination, walk_config(3.0));
        let mut b = SimulatedWalk::new(start, destination, walk_config(3.0));

        for _ in 0..10 {
            assert_eq!(a.next_fix(), b.next_fix());
        }
    }

    #[test]
    fn test_offset_by_meters_roundtrip() {
        let p = GeoPoint::new(1.27, 103.84).unwrap();
        let moved = offset_by_meters(p, 100.0, 0.0);
        let d = geodesy::haversine_distance_m(p, moved);
        assert!((d - 100.0).abs() < 0.5, "moved {} m", d);
    }

    #[test]
    fn test_walk_heads_toward_destination() {
        let start = GeoPoint::new(1.2700, 103.8400).unwrap();
        let destination = GeoPoint::new(1.3000, 103.8000).unwrap();
        let walk = SimulatedWalk::new(start, destination, walk_config(0.0));
        let bearing = walk.bearing_to_destination();
        assert!((306.0..308.0).contains(&bearing), "bearing {}", bearing);
    }
}
