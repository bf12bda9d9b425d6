//! Mapping free-form place names onto schedule-provider cities.
//!
//! Reverse geocoders name places inconsistently ("Kota Bandung", "Bandung
//! City", a kecamatan inside Jakarta...), while the schedule providers expect
//! one of their own city entries. This module holds the normalisation rules
//! and the static Jakarta borough table.

use adzan_types::{AdzanError, LocationQuery, PlaceHint};

/// Provider identifier used for Jakarta when the city list has no match.
pub const JAKARTA_FALLBACK_ID: &str = "1301";

/// Used when location permission is denied or geocoding yields nothing.
pub const DEFAULT_PROVINCE: &str = "Jawa Barat";
pub const DEFAULT_KABKOTA: &str = "Bekasi";

/// One entry of a provider's city list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    pub id: String,
    pub name: String,
}

impl CityEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

const JAKARTA_BARAT: &[&str] = &[
    "cengkareng",
    "grogol petamburan",
    "kalideres",
    "kebon jeruk",
    "kembangan",
    "palmerah",
    "taman sari",
    "tambora",
];

const JAKARTA_SELATAN: &[&str] = &[
    "cilandak",
    "jagakarsa",
    "kebayoran baru",
    "kebayoran lama",
    "mampang prapatan",
    "pancoran",
    "pasar minggu",
    "pesanggrahan",
    "setiabudi",
    "tebet",
];

const JAKARTA_TIMUR: &[&str] = &[
    "cakung",
    "ciracas",
    "duren sawit",
    "jatinegara",
    "kramat jati",
    "makasar",
    "matraman",
    "pasar rebo",
    "pulo gadung",
];

const JAKARTA_UTARA: &[&str] = &[
    "cilincing",
    "kelapa gading",
    "koja",
    "pademangan",
    "penjaringan",
    "tanjung priok",
];

const JAKARTA_PUSAT: &[&str] = &[
    "cempaka putih",
    "gambir",
    "johar baru",
    "kemayoran",
    "menteng",
    "sawah besar",
    "senen",
    "tanah abang",
];

/// Checked in this order; the first borough with a matching kecamatan wins.
const JAKARTA_BOROUGHS: [(&str, &[&str]); 5] = [
    ("Jakarta Barat", JAKARTA_BARAT),
    ("Jakarta Selatan", JAKARTA_SELATAN),
    ("Jakarta Timur", JAKARTA_TIMUR),
    ("Jakarta Utara", JAKARTA_UTARA),
    ("Jakarta Pusat", JAKARTA_PUSAT),
];

/// Maps a Jakarta kecamatan onto its borough (`"Kebayoran Baru"` -> `"Jakarta Selatan"`).
pub fn jakarta_borough(subdistrict: &str) -> Option<&'static str> {
    let lower = subdistrict.to_lowercase();
    if lower.trim().is_empty() {
        return None;
    }
    JAKARTA_BOROUGHS
        .iter()
        .find(|(_, kecamatan)| kecamatan.iter().any(|k| lower.contains(k)))
        .map(|(borough, _)| *borough)
}

pub fn is_jakarta(province: &str, city: &str) -> bool {
    province.to_lowercase().contains("jakarta") || city.to_lowercase().contains("jakarta")
}

/// Strips `prefix` when it is a whole word (or is `kab.`).
fn strip_word_prefix<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(prefix)?;
    if prefix.ends_with('.') || rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Lower-cases and strips `Kota `, `Kab.`, `Kabupaten ` and a trailing ` City`.
pub fn normalize_city_name(s: &str) -> String {
    let lower = s.trim().to_lowercase();
    let mut name = lower.as_str();
    if let Some(rest) = strip_word_prefix(name, "kota") {
        name = rest;
    }
    if let Some(rest) = strip_word_prefix(name, "kabupaten").or_else(|| strip_word_prefix(name, "kab.")) {
        name = rest;
    }
    if let Some(rest) = name.strip_suffix("city") {
        if rest.ends_with(char::is_whitespace) {
            name = rest.trim_end();
        }
    }
    name.to_string()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a free-form city/province onto an identifier from `list`.
///
/// Order: city substring match, then province substring match, then the
/// Jakarta special case (`Kota Jakarta ...` entry, else
/// [`JAKARTA_FALLBACK_ID`]).
///
/// # Errors
/// Returns `CityNotFound` when none of the steps applies.
pub fn resolve_city_id(city: &str, province: &str, list: &[CityEntry]) -> Result<String, AdzanError> {
    let jakarta = is_jakarta(province, city);
    let city = match jakarta_borough(city) {
        Some(borough) if jakarta => borough,
        _ => city,
    };

    let wanted = normalize_city_name(city);
    let province_lower = province.trim().to_lowercase();
    let lowered: Vec<String> = list.iter().map(|e| e.name.to_lowercase()).collect();

    let by_city = (!wanted.is_empty())
        .then(|| lowered.iter().position(|name| name.contains(&wanted)))
        .flatten();
    let by_province = || {
        (!province_lower.is_empty())
            .then(|| lowered.iter().position(|name| name.contains(&province_lower)))
            .flatten()
    };

    if let Some(idx) = by_city.or_else(by_province) {
        let entry = &list[idx];
        tracing::debug!(city, province, id = %entry.id, matched = %entry.name, "resolved schedule city");
        return Ok(entry.id.clone());
    }

    if jakarta {
        let id = lowered
            .iter()
            .position(|name| collapse_whitespace(name).contains("kota jakarta"))
            .map(|idx| list[idx].id.clone())
            .unwrap_or_else(|| JAKARTA_FALLBACK_ID.to_string());
        tracing::debug!(city, province, %id, "using Jakarta fallback city");
        return Ok(id);
    }

    Err(AdzanError::city_not_found(if city.trim().is_empty() { province } else { city }))
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Turns a reverse-geocoded place into a schedule lookup.
///
/// Inside Jakarta the geocoder's "city" is usually the kecamatan, which is
/// mapped onto its borough. Elsewhere the city is used, or the regency
/// (subregion) when the city is missing. Returns `None` when the hint names
/// nothing.
pub fn location_from_place(hint: &PlaceHint) -> Option<LocationQuery> {
    let city = non_empty(&hint.city);
    let subregion = non_empty(&hint.subregion);
    let region = non_empty(&hint.region).or(subregion);
    let label_city = city.or(subregion);

    if label_city.is_none() && region.is_none() {
        return None;
    }

    let label = match (label_city, region) {
        (Some(c), Some(r)) => format!("{}, {}", c, r),
        (Some(c), None) => c.to_string(),
        (None, Some(r)) => r.to_string(),
        (None, None) => String::new(),
    };
    let province = region.unwrap_or_default().to_string();

    let in_jakarta = region.is_some_and(|r| r.to_lowercase().contains("jakarta"));
    let borough = if in_jakarta { label_city.and_then(jakarta_borough) } else { None };
    let kabkota = borough.or(label_city).unwrap_or_default().to_string();

    Some(LocationQuery { label, province, kabkota })
}

/// The documented fallback location (Bekasi, Jawa Barat).
pub fn default_location() -> LocationQuery {
    LocationQuery::new(DEFAULT_PROVINCE, DEFAULT_KABKOTA)
}

/// Formats a regency the way the month-table provider expects it:
/// `Kabupaten X` becomes `Kab. X`, bare names gain a `Kota ` prefix.
pub fn kabkota_for_equran(name: &str) -> String {
    let trimmed = name.trim();
    let lower = trimmed.to_lowercase();
    if strip_word_prefix(&lower, "kabupaten").is_some() {
        // Keep the original casing of the remainder.
        let tail = trimmed.get("kabupaten".len()..).unwrap_or_default().trim_start();
        return format!("Kab. {}", tail);
    }
    if lower.starts_with("kab.") || lower.starts_with("kota") {
        return trimmed.to_string();
    }
    format!("Kota {}", trimmed)
}
