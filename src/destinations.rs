//! Guidance targets and the built-in emergency-resource presets.

use crate::geodesy::GeoPoint;

/// A guidance target: a fixed point plus the label shown to the user.
///
/// Immutable for the lifetime of a guidance session.
#[derive(Debug, Clone)]
pub struct Destination {
    pub label: String,
    pub point: GeoPoint,
}

impl Destination {
    pub fn new(label: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            label: label.into(),
            point,
        }
    }
}

/// Preset destination kinds from the emergency-resource catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DestinationKind {
    /// Nearest hospital with an emergency department
    Hospital,
    /// Nearest public first-aid station
    FirstAid,
    /// Nearest emergency shelter
    Shelter,
}

impl DestinationKind {
    /// The demo catalog entry for this kind.
    pub fn preset(self) -> Destination {
        let (label, lat, lon) = match self {
            DestinationKind::Hospital => ("Singapore General Hospital", 1.2793, 103.8344),
            DestinationKind::FirstAid => ("Raffles Place first-aid station", 1.2840, 103.8515),
            DestinationKind::Shelter => ("Tanjong Pagar emergency shelter", 1.2765, 103.8460),
        };
        Destination::new(
            label,
            GeoPoint::new(lat, lon).expect("preset coordinates are in range"),
        )
    }
}
