use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use super::ProducerHandle;
use crate::geodesy::normalize_degrees;
use crate::guidance::{GuidanceEvent, MagneticSample};

/// Configuration for a simulated magnetometer.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    /// Interval between samples in milliseconds
    pub sample_interval_ms: u64,
    /// Standard deviation of per-axis field noise (unit field strength)
    pub noise_std: f64,
    /// Constant device rotation in degrees per second, for exercising the
    /// smoother
    pub turn_rate_dps: f64,
    /// RNG seed for reproducible runs
    pub seed: u64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            noise_std: 0.02,
            turn_rate_dps: 0.0,
            seed: 11,
        }
    }
}

/// Emits raw 2-axis field samples for a device at a known heading,
/// optionally rotating at a constant rate.
pub struct SimulatedCompass {
    heading_degrees: f64,
    config: CompassConfig,
    rng: ChaCha8Rng,
    noise: Normal<f64>,
}

impl SimulatedCompass {
    pub fn new(initial_heading_degrees: f64, config: CompassConfig) -> Self {
        let noise = Normal::new(0.0, config.noise_std).unwrap();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            heading_degrees: normalize_degrees(initial_heading_degrees),
            config,
            rng,
            noise,
        }
    }

    pub fn heading_degrees(&self) -> f64 {
        self.heading_degrees
    }

    /// Point the simulated device in a new direction (e.g. the walk's
    /// current travel bearing).
    pub fn set_heading(&mut self, degrees: f64) {
        self.heading_degrees = normalize_degrees(degrees);
    }

    /// Advance by one sample interval and return the next field sample.
    pub fn next_sample(&mut self) -> MagneticSample {
        let dt = self.config.sample_interval_ms as f64 / 1000.0;
        self.heading_degrees =
            normalize_degrees(self.heading_degrees + self.config.turn_rate_dps * dt);

        let rad = self.heading_degrees.to_radians();
        MagneticSample {
            x: rad.cos() + self.noise.sample(&mut self.rng),
            y: rad.sin() + self.noise.sample(&mut self.rng),
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.config.sample_interval_ms)
    }

    /// Spawn a producer thread feeding samples into `tx` until the handle
    /// is dropped or the receiver goes away.
    pub fn spawn(mut self, tx: Sender<GuidanceEvent>) -> ProducerHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let interval = self.sample_interval();

        let thread = thread::spawn(move || {
            while !stop_flag.load(Ordering::Relaxed) {
                let sample = self.next_sample();
                if tx.send(GuidanceEvent::Magnetometer(sample)).is_err() {
                    log::warn!("Magnetometer receiver dropped");
                    break;
                }
                thread::sleep(interval);
            }
        });

        ProducerHandle::new(stop, thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_samples_encode_heading() {
        let config = CompassConfig {
            noise_std: 0.0,
            ..CompassConfig::default()
        };
        let mut compass = SimulatedCompass::new(90.0, config);
        let sample = compass.next_sample();
        assert_relative_eq!(sample.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(sample.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_turn_rate_advances_heading() {
        let config = CompassConfig {
            noise_std: 0.0,
            turn_rate_dps: 30.0,
            sample_interval_ms: 100,
            ..CompassConfig::default()
        };
        let mut compass = SimulatedCompass::new(0.0, config);
        for _ in 0..10 {
            compass.next_sample();
        }
        // 30 deg/s for one second
        assert_relative_eq!(compass.heading_degrees(), 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_heading_wraps() {
        let config = CompassConfig {
            noise_std: 0.0,
            turn_rate_dps: 3600.0,
            sample_interval_ms: 100,
            ..CompassConfig::default()
        };
        let mut compass = SimulatedCompass::new(350.0, config);
        compass.next_sample();
        assert!((0.0..360.0).contains(&compass.heading_degrees()));
    }
}
