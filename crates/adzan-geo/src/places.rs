//! Merging place candidates from several POI providers.

use std::collections::HashSet;

use adzan_types::PlaceOfWorship;

/// Coordinates are compared after rounding to this many decimals (~1 m).
const DEDUP_SCALE: f64 = 1e5;

/// Identity of a place across providers: lower-cased name plus rounded position.
///
/// The rounded key is the whole contract. Two points closer than 0.00001°
/// that straddle a rounding boundary (`-6.2000049` vs `-6.2000051`) get
/// different keys and are both kept.
pub fn dedup_key(place: &PlaceOfWorship) -> (String, i64, i64) {
    (
        place.name.trim().to_lowercase(),
        (place.latitude * DEDUP_SCALE).round() as i64,
        (place.longitude * DEDUP_SCALE).round() as i64,
    )
}

/// Sorts by distance, drops duplicates (first occurrence wins) and keeps at
/// most `cap` entries.
pub fn merge_places(mut candidates: Vec<PlaceOfWorship>, cap: usize) -> Vec<PlaceOfWorship> {
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates.retain(|place| seen.insert(dedup_key(place)));
    candidates.truncate(cap);
    candidates
}
