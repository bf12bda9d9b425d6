//! Qibla direction and compass helpers.
//!
//! The bearing here is the local fallback; the network layer prefers an
//! external qibla API and only lands here when every attempt fails.

use adzan_types::{BearingSource, GeoCoordinate, QiblaBearing};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The Kaaba, Masjid al-Haram.
pub const KAABA: GeoCoordinate = GeoCoordinate::new_unchecked(21.4225, 39.8262);

/// Initial great-circle bearing from `from` to the Kaaba, degrees in [0, 360).
pub fn qibla_bearing(from: GeoCoordinate) -> f64 {
    initial_bearing(from, KAABA)
}

/// Initial great-circle bearing from `from` to `to`, degrees in [0, 360).
pub fn initial_bearing(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Locally computed [`QiblaBearing`].
pub fn local_qibla(from: GeoCoordinate) -> QiblaBearing {
    QiblaBearing::new(qibla_bearing(from), BearingSource::Local)
}

/// Rotation of the on-screen Kaaba pointer for a device heading.
pub fn pointer_rotation(qibla_degrees: f64, heading_degrees: f64) -> f64 {
    (qibla_degrees - heading_degrees + 360.0).rem_euclid(360.0)
}

/// Picks the true heading when the sensor provides one (negative means
/// unavailable), else the magnetic heading.
pub fn select_heading(true_heading: Option<f64>, magnetic_heading: Option<f64>) -> Option<f64> {
    true_heading
        .filter(|h| h.is_finite() && *h >= 0.0)
        .or(magnetic_heading.filter(|h| h.is_finite()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSide {
    Left,
    Right,
}

/// How far, and which way, to turn the phone to face the qibla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationGuide {
    pub degrees: u32,
    pub side: TurnSide,
}

impl fmt::Display for RotationGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            TurnSide::Left => "kiri",
            TurnSide::Right => "kanan",
        };
        write!(f, "Putar ponsel {}° ke {}", self.degrees, side)
    }
}

/// Shortest turn from `heading_degrees` to `qibla_degrees`.
pub fn rotation_guide(qibla_degrees: f64, heading_degrees: f64) -> RotationGuide {
    let delta = pointer_rotation(qibla_degrees, heading_degrees);
    if delta <= 180.0 {
        RotationGuide { degrees: delta.round() as u32, side: TurnSide::Right }
    } else {
        RotationGuide { degrees: (360.0 - delta).round() as u32, side: TurnSide::Left }
    }
}
