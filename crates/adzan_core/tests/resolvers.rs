//! End-to-end resolver tests against a single wiremock server.
#![cfg(feature = "async")]

use adzan_core::prelude::*;
use adzan_core::Endpoints;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, provider: ScheduleProvider) -> AdzanClient {
    let config = ResolverConfig::builder()
        .endpoints(Endpoints::all_at(&server.uri()))
        .schedule_provider(provider)
        .build()
        .expect("config should validate");
    AdzanClient::new(&config).expect("client construction should not fail")
}

fn position() -> GeoCoordinate {
    GeoCoordinate::new(-6.2383, 106.9756).unwrap()
}

#[tokio::test]
async fn denied_location_loads_default_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/sholat/kota/semua"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1203", "lokasi": "KAB. BOGOR"}, {"id": "1219", "lokasi": "KOTA BEKASI"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/sholat/jadwal/1219/2026/01/06"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"jadwal": {"subuh": "04:19", "dzuhur": "11:57", "ashar": "15:22", "maghrib": "18:10", "isya": "19:25"}}
        })))
        .mount(&server)
        .await;
    // Tomorrow is down; the day still loads.
    Mock::given(method("GET"))
        .and(path("/v1/sholat/jadwal/1219/2026/01/07"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let adzan = client(&server, ScheduleProvider::MyQuran);
    let location = adzan.locate(None).await;
    assert_eq!(location.label, "Bekasi, Jawa Barat");

    let today = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
    let day = adzan.schedule().load_day(&location, today).await.unwrap();
    assert_eq!(day.resolution.city_id, "1219");
    assert!(day.tomorrow.is_none());

    let next = day.next_prayer(today.and_hms_opt(13, 0, 0).unwrap()).unwrap();
    assert_eq!(next.prayer, PrayerName::Ashar);
    assert_eq!(next.countdown(), "2h 22m");
}

#[tokio::test]
async fn geocoded_location_feeds_equran() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "display_name": "Bekasi, Jawa Barat, Indonesia",
            "address": {"city": "Bekasi", "state": "Jawa Barat"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v2/shalat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"jadwal": [
                {"tanggal_lengkap": "2026-01-31", "hari": "Sabtu", "subuh": "04:30", "dzuhur": "12:02",
                 "ashar": "15:26", "maghrib": "18:17", "isya": "19:30"}
            ]}
        })))
        .mount(&server)
        .await;

    let adzan = client(&server, ScheduleProvider::Equran);
    let location = adzan.locate(Some(position())).await;
    assert_eq!(location.province, "Jawa Barat");

    // Jan 31: tomorrow lives in February's table, which this mock does not carry.
    let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
    let day = adzan.schedule().load_day(&location, today).await.unwrap();
    assert_eq!(day.resolution.city_id, "Kota Bekasi");
    assert_eq!(day.today.time_of(PrayerName::Isya), Some("19:30"));
}

#[tokio::test]
async fn failed_geocode_falls_back_to_default() {
    let server = MockServer::start().await;
    let adzan = client(&server, ScheduleProvider::MyQuran);
    let location = adzan.locate(Some(position())).await;
    assert_eq!(location, ResolverConfig::default().default_location);
}

#[tokio::test]
async fn qibla_and_mosques_through_one_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/qibla"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"direction": 295.3}})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": (0..6).map(|i| json!({
                "type": "node", "id": i, "lat": -6.2383 - f64::from(i) * 0.001, "lon": 106.9756,
                "tags": {"name": format!("Masjid {}", i)}
            })).collect::<Vec<_>>()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adzan = client(&server, ScheduleProvider::MyQuran);
    let bearing = adzan.qibla_bearing(position(), None).await;
    assert_eq!(bearing.source, BearingSource::Api);
    assert_eq!(bearing.to_string(), "295° dari utara");

    let mosques = adzan.nearest_mosques(position()).await.unwrap();
    assert_eq!(mosques.len(), 6);
    assert_eq!(mosques[0].name, "Masjid 0");
    assert_eq!(format_distance(mosques[0].distance_km), "0 m");
}

#[tokio::test]
async fn no_mosques_is_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex("^/api/interpreter$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": []})))
        .expect(2)
        .mount(&server)
        .await;

    let adzan = client(&server, ScheduleProvider::MyQuran);
    let err = adzan.nearest_mosques(position()).await.unwrap_err();
    assert!(matches!(err, AdzanError::NoResults(_)));
    assert_eq!(err.localized_message(), "Data tidak ditemukan");
}
