use std::time::{Duration, Instant};

use approx::assert_relative_eq;

use arcompass::config::{Easing, GuidanceConfig, SmoothingConfig};
use arcompass::destinations::Destination;
use arcompass::geodesy::GeoPoint;
use arcompass::guidance::{GuidancePhase, GuidanceSession, MagneticSample};

fn sample_for_heading(degrees: f64) -> MagneticSample {
    let rad = degrees.to_radians();
    MagneticSample {
        x: rad.cos(),
        y: rad.sin(),
    }
}

fn session_to(lat: f64, lon: f64) -> GuidanceSession {
    let mut session = GuidanceSession::new(GuidanceConfig::default());
    session.start(Destination::new(
        "test target",
        GeoPoint::new(lat, lon).unwrap(),
    ));
    session
}

#[test]
fn test_reference_scenario() {
    let mut session = session_to(1.3000, 103.8000);

    session.on_fix(GeoPoint::new(1.2700, 103.8400).unwrap());
    let state = session.on_magnetometer(sample_for_heading(45.0)).unwrap();

    assert_relative_eq!(state.target_bearing_degrees, 306.88, epsilon = 0.1);
    assert_relative_eq!(state.relative_angle_degrees, 261.88, epsilon = 0.1);

    // One full smoothing duration later the render angle has settled onto
    // the engine output
    let rendered = session.tick(Duration::from_millis(300)).unwrap();
    assert_relative_eq!(rendered, 261.88, epsilon = 0.1);
}

#[test]
fn test_unknown_until_both_inputs() {
    let mut session = session_to(1.30, 103.80);
    assert_eq!(session.phase(), GuidancePhase::Acquiring);

    // Heading alone is not enough
    for _ in 0..5 {
        assert!(session.on_magnetometer(sample_for_heading(45.0)).is_none());
    }
    assert_eq!(session.phase(), GuidancePhase::Acquiring);
    assert!(session.render_angle_degrees().is_none());

    // First fix completes the pair
    let state = session.on_fix(GeoPoint::new(1.27, 103.84).unwrap());
    assert!(state.is_some());
    assert_eq!(session.phase(), GuidancePhase::Guiding);
}

#[test]
fn test_no_fix_is_a_permanent_unknown() {
    // Location permission denied: heading samples forever, no fix ever
    let mut session = session_to(1.30, 103.80);
    let t0 = Instant::now();

    for i in 0..100 {
        session.on_magnetometer_at(
            sample_for_heading(45.0),
            t0 + Duration::from_millis(i * 100),
        );
        session.tick(Duration::from_millis(16));
    }

    assert_eq!(session.phase(), GuidancePhase::Acquiring);
    assert!(session.render_angle_degrees().is_none());
}

#[test]
fn test_heading_rate_limit_through_session() {
    let mut session = session_to(1.30, 103.80);
    session.on_fix(GeoPoint::new(1.27, 103.84).unwrap());

    let t0 = Instant::now();
    let first = session
        .on_magnetometer_at(sample_for_heading(45.0), t0)
        .unwrap();

    // 50 ms later: dropped, bearing state unchanged
    let second = session
        .on_magnetometer_at(sample_for_heading(90.0), t0 + Duration::from_millis(50))
        .unwrap();
    assert_relative_eq!(
        second.relative_angle_degrees,
        first.relative_angle_degrees
    );

    // 100 ms later: accepted, bearing state moves
    let third = session
        .on_magnetometer_at(sample_for_heading(90.0), t0 + Duration::from_millis(100))
        .unwrap();
    assert_relative_eq!(
        third.relative_angle_degrees,
        first.relative_angle_degrees - 45.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_indicator_crosses_north_the_short_way() {
    let config = GuidanceConfig {
        smoothing: SmoothingConfig {
            duration_ms: 300,
            easing: Easing::Linear,
        },
        ..GuidanceConfig::default()
    };
    let mut session = GuidanceSession::new(config);
    // Destination due north of the fix: target bearing 0
    session.start(Destination::new(
        "due north",
        GeoPoint::new(1.31, 103.84).unwrap(),
    ));
    session.on_fix(GeoPoint::new(1.27, 103.84).unwrap());

    let t0 = Instant::now();
    // Heading 10: relative angle 350; let the smoother settle there
    session.on_magnetometer_at(sample_for_heading(10.0), t0);
    let settled = session.tick(Duration::from_millis(300)).unwrap();
    assert_relative_eq!(settled, 350.0, epsilon = 0.1);

    // Heading swings to 350: relative angle 10. Halfway through, the
    // indicator should be near north, not sweeping back through 180.
    session.on_magnetometer_at(sample_for_heading(350.0), t0 + Duration::from_millis(300));
    let halfway = session.tick(Duration::from_millis(150)).unwrap();
    let off_north = halfway.min(360.0 - halfway);
    assert!(
        off_north < 1.0,
        "expected halfway point near north, got {}",
        halfway
    );

    let done = session.tick(Duration::from_millis(150)).unwrap();
    assert_relative_eq!(done, 10.0, epsilon = 0.1);
}

#[test]
fn test_session_lifecycle() {
    let mut session = GuidanceSession::new(GuidanceConfig::default());
    assert_eq!(session.phase(), GuidancePhase::Idle);

    session.start(Destination::new(
        "first",
        GeoPoint::new(1.30, 103.80).unwrap(),
    ));
    session.on_fix(GeoPoint::new(1.27, 103.84).unwrap());
    session.on_magnetometer(sample_for_heading(45.0));
    session.tick(Duration::from_millis(300));
    assert_eq!(session.phase(), GuidancePhase::Guiding);

    session.stop();
    assert_eq!(session.phase(), GuidancePhase::Idle);
    assert!(session.bearing_state().is_none());
    assert!(session.render_angle_degrees().is_none());

    // A fresh session starts clean in Acquiring
    session.start(Destination::new(
        "second",
        GeoPoint::new(1.28, 103.85).unwrap(),
    ));
    assert_eq!(session.phase(), GuidancePhase::Acquiring);
    assert!(session.render_angle_degrees().is_none());
}

#[test]
fn test_stale_heading_keeps_guiding() {
    let mut session = session_to(1.30, 103.80);
    session.on_fix(GeoPoint::new(1.27, 103.84).unwrap());
    session.on_magnetometer(sample_for_heading(45.0));

    // Heading samples stop; position keeps updating. The stale heading is
    // reused and the session keeps producing values.
    for i in 0..10 {
        let lat = 1.2700 + 0.0005 * i as f64;
        let state = session.on_fix(GeoPoint::new(lat, 103.84).unwrap());
        assert!(state.is_some());
    }
    assert_eq!(session.phase(), GuidancePhase::Guiding);
    assert_relative_eq!(session.heading_degrees().unwrap(), 45.0, epsilon = 1e-6);
}
