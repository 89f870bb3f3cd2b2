mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{parse_body, TestApp};
use serde_json::Value;

fn day<'a>(month: &'a Value, date: &str) -> &'a Value {
    month["days"].as_array().unwrap().iter()
        .find(|d| d["date"] == date)
        .unwrap_or_else(|| panic!("day {} missing", date))
}

#[tokio::test]
async fn test_month_has_one_entry_per_day() {
    let app = TestApp::new().await;

    for (year, month, expected) in [(2024, 2, 29), (2023, 2, 28), (2030, 4, 30), (2030, 12, 31)] {
        let res = app.get(&format!("/api/v1/calendar?year={}&month={}", year, month)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = parse_body(res).await;
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), expected, "{}-{}", year, month);
        assert_eq!(days[0]["date"], format!("{}-{:02}-01", year, month));
        assert_eq!(days[expected - 1]["date"], format!("{}-{:02}-{}", year, month, expected));
    }

    let december = parse_body(app.get("/api/v1/calendar?year=2030&month=12").await).await;
    assert_eq!(december["next"]["year"], 2031);
    assert_eq!(december["next"]["month"], 1);
    assert_eq!(december["previous"]["month"], 11);
}

#[tokio::test]
async fn test_defaults_to_current_month() {
    let app = TestApp::new().await;
    let today = Utc::now().date_naive();

    let body = parse_body(app.get("/api/v1/calendar").await).await;
    assert_eq!(body["year"], today.year());
    assert_eq!(body["month"], today.month());
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    let app = TestApp::new().await;

    let res = app.get("/api/v1/calendar?year=2030&month=13").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.get("/api/v1/calendar?year=2030&month=0").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bookings_are_placed_on_every_day_they_touch() {
    let app = TestApp::new().await;
    let room = app.create_resource("Room A", None, None).await;
    let rid = room["id"].as_str().unwrap();

    app.book(rid, "2030-01-07T09:00", "2030-01-07T10:30", "Alice").await;
    app.book(rid, "2030-01-30T20:00", "2030-02-02T09:00", "Bob").await;
    app.book(rid, "2029-12-31T20:00", "2030-01-01T02:00", "Carol").await;

    let january = parse_body(app.get("/api/v1/calendar?year=2030&month=1").await).await;

    let seventh = day(&january, "2030-01-07");
    assert_eq!(seventh["has_bookings"], true);
    assert_eq!(seventh["bookings"][0]["time_range"], "09:00 - 10:30");
    assert_eq!(seventh["bookings"][0]["resource_name"], "Room A");
    assert_eq!(seventh["bookings"][0]["booked_by"], "Alice");

    let first = day(&january, "2030-01-01");
    assert_eq!(first["bookings"][0]["booked_by"], "Carol");

    for date in ["2030-01-30", "2030-01-31"] {
        let d = day(&january, date);
        assert_eq!(d["bookings"][0]["booked_by"], "Bob");
        assert_eq!(d["bookings"][0]["time_range"], "2030-01-30 20:00 - 2030-02-02 09:00");
    }

    assert_eq!(day(&january, "2030-01-15")["has_bookings"], false);

    let february = parse_body(app.get("/api/v1/calendar?year=2030&month=2").await).await;
    assert_eq!(day(&february, "2030-02-02")["bookings"][0]["booked_by"], "Bob");
    assert_eq!(day(&february, "2030-02-03")["has_bookings"], false);
}

#[tokio::test]
async fn test_days_follow_service_timezone() {
    let app = TestApp::with_timezone("Asia/Tokyo").await;
    let room = app.create_resource("Room A", None, None).await;

    // 23:30 UTC on the 6th is 08:30 on the 7th in Tokyo.
    app.book(room["id"].as_str().unwrap(), "2030-01-06T23:30:00Z", "2030-01-07T00:30:00Z", "Alice").await;

    let january = parse_body(app.get("/api/v1/calendar?year=2030&month=1").await).await;
    assert_eq!(day(&january, "2030-01-06")["has_bookings"], false);
    assert_eq!(day(&january, "2030-01-07")["bookings"][0]["time_range"], "08:30 - 09:30");
}

#[tokio::test]
async fn test_month_containing_skipped_midnight() {
    let app = TestApp::with_timezone("America/Asuncion").await;
    let room = app.create_resource("Room A", None, None).await;
    app.book(room["id"].as_str().unwrap(), "2023-10-01T10:00", "2023-10-01T11:00", "Alice").await;

    let res = app.get("/api/v1/calendar?year=2023&month=10").await;
    assert_eq!(res.status(), StatusCode::OK);

    let october = parse_body(res).await;
    assert_eq!(october["days"].as_array().unwrap().len(), 31);
    assert_eq!(day(&october, "2023-10-01")["bookings"][0]["time_range"], "10:00 - 11:00");
}
