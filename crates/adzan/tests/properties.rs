use proptest::prelude::*;
use chrono::NaiveDate;
use adzan::prelude::*;
use adzan::geo::{dedup_key, merge_places, EARTH_RADIUS_KM};
use adzan::prayer::clock::parse_hour_minute;

fn coordinate() -> impl Strategy<Value = GeoCoordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| GeoCoordinate::new(lat, lng).unwrap())
}

fn place() -> impl Strategy<Value = PlaceOfWorship> {
    // Few names and a coarse grid so duplicates actually occur.
    (0usize..4, 0i32..5, 0i32..5, 0.0f64..3.0).prop_map(|(n, dy, dx, distance_km)| PlaceOfWorship {
        id: format!("{}-{}-{}", n, dy, dx),
        name: ["Masjid Al-Ikhlas", "masjid al-ikhlas", "Musholla Nurul Huda", "Masjid Raya"][n].to_string(),
        address: String::new(),
        latitude: -6.2 + f64::from(dy) * 0.001,
        longitude: 106.8 + f64::from(dx) * 0.001,
        distance_km,
        source: PlaceSource::Overpass,
    })
}

fn schedule(date: NaiveDate) -> PrayerSchedule {
    let times = PrayerTimes {
        subuh: Some("04:31".into()),
        dzuhur: Some("11:55".into()),
        ashar: Some("15:15".into()),
        maghrib: Some("17:58".into()),
        isya: Some("19:10".into()),
        ..Default::default()
    };
    PrayerSchedule::new(date, "1219", times)
}

proptest! {
    /// Invariant: any zero-padded clock string parses back to its parts.
    #[test]
    fn hour_minute_parses(h in 0u32..24, m in 0u32..60) {
        prop_assert_eq!(parse_hour_minute(&format!("{:02}:{:02}", h, m)), Some((h, m)));
        prop_assert_eq!(parse_hour_minute(&format!("{:02}:{:02}:00", h, m)), Some((h, m)));
    }

    /// Invariant: out-of-range clock values never parse.
    #[test]
    fn out_of_range_time_rejected(h in 24u32..100, m in 60u32..100) {
        prop_assert_eq!(parse_hour_minute(&format!("{}:00", h)), None);
        prop_assert_eq!(parse_hour_minute(&format!("00:{}", m)), None);
    }

    /// Invariant: the qibla bearing is always within [0, 360).
    #[test]
    fn qibla_in_range(from in coordinate()) {
        let b = qibla_bearing(from);
        prop_assert!((0.0..360.0).contains(&b), "bearing {} from {}", b, from);
    }

    /// Invariant: pointer rotation is within [0, 360) and the turn guide never exceeds half a circle.
    #[test]
    fn rotation_in_range(q in 0.0f64..360.0, h in 0.0f64..360.0) {
        let r = pointer_rotation(q, h);
        prop_assert!((0.0..360.0).contains(&r));
        prop_assert!(rotation_guide(q, h).degrees <= 180);
    }

    /// Invariant: haversine is symmetric, non-negative and bounded by half the circumference.
    #[test]
    fn haversine_metric(a in coordinate(), b in coordinate()) {
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        prop_assert!(haversine_km(a, a).abs() < 1e-9);
    }

    /// Invariant: merged places are sorted, unique by key and capped.
    #[test]
    fn merge_sorted_unique_capped(places in prop::collection::vec(place(), 0..40), cap in 1usize..20) {
        let merged = merge_places(places, cap);
        prop_assert!(merged.len() <= cap);
        prop_assert!(merged.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        let mut keys: Vec<_> = merged.iter().map(dedup_key).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), before);
    }

    /// Invariant: a same-day next prayer is never in the past.
    #[test]
    fn next_prayer_not_in_past(secs in 0u32..86_400) {
        let date = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let tomorrow = schedule(date.succ_opt().unwrap());
        let now = date.and_hms_opt(secs / 3600, (secs / 60) % 60, secs % 60).unwrap();
        let next = compute_next_prayer(&schedule(date), Some(&tomorrow), now).unwrap();
        prop_assert!(next.at >= now);
        prop_assert!(next.remaining >= chrono::Duration::zero());
        prop_assert_eq!(next.is_tomorrow, next.at.date() > date);
    }
}
