//! Spherical geometry for adzan: qibla bearing, haversine distance, and
//! merging of nearby-place results.

pub mod distance;
pub mod places;
pub mod qibla;

pub use distance::{format_distance, haversine_km, EARTH_RADIUS_KM};
pub use places::{dedup_key, merge_places};
pub use qibla::{
    initial_bearing, local_qibla, pointer_rotation, qibla_bearing, rotation_guide, select_heading,
    RotationGuide, TurnSide, KAABA,
};
