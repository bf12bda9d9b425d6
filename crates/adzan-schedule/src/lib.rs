//! Pure prayer-schedule logic: no I/O, every input explicit.

pub mod alert;
pub mod city;
pub mod clock;
pub mod next;
pub mod quotes;

pub use alert::PrayerAlarm;
pub use city::{
    default_location, is_jakarta, jakarta_borough, kabkota_for_equran, location_from_place,
    normalize_city_name, resolve_city_id, CityEntry,
};
pub use clock::{countdown_label, format_hhmm, parse_time_for_date, parse_time_today};
pub use next::compute_next_prayer;
pub use quotes::daily_quote;
