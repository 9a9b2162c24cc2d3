use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use matchday_picks::api_fetch::{parse_fixtures_json, parse_predictions_json, parse_utc_date};
use matchday_picks::fixture::{Pick, Score, Side};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_fixtures_payload() {
    let raw = read_fixture("fixtures_response.json");
    let fixtures = parse_fixtures_json(&raw).expect("payload should parse");
    // The id-less record is skipped, not fatal.
    assert_eq!(fixtures.len(), 3);

    let first = &fixtures[0];
    assert_eq!(first.fixture_id, "1001");
    assert_eq!(first.league_name.as_deref(), Some("Premier League"));
    assert_eq!(
        first.utc_date,
        Some(
            Utc.with_ymd_and_hms(2026, 1, 24, 15, 0, 0)
                .single()
                .expect("valid utc datetime")
        )
    );
    assert_eq!(first.score, Some(Score { home: Some(2), away: Some(1) }));
    assert!(first.is_finished());
}

#[test]
fn numeric_ids_flat_scores_and_naive_dates_parse() {
    let raw = read_fixture("fixtures_response.json");
    let fixtures = parse_fixtures_json(&raw).expect("payload should parse");

    let cup = &fixtures[1];
    assert_eq!(cup.fixture_id, "1002");
    assert_eq!(cup.score, Some(Score { home: Some(1), away: Some(1) }));
    assert_eq!(cup.penalty_winner, Some(Side::Away));
    assert_eq!(
        cup.utc_date,
        Some(
            Utc.with_ymd_and_hms(2026, 4, 18, 16, 30, 0)
                .single()
                .expect("valid utc datetime")
        )
    );
}

#[test]
fn null_fields_degrade_without_error() {
    let raw = read_fixture("fixtures_response.json");
    let fixtures = parse_fixtures_json(&raw).expect("payload should parse");

    let tbd = &fixtures[2];
    assert_eq!(tbd.league_name, None);
    assert_eq!(tbd.matchday, None);
    assert_eq!(tbd.utc_date, None);
    assert_eq!(tbd.score, None);
    assert!(tbd.is_postponed());
}

#[test]
fn parses_predictions_payload_skipping_bad_picks() {
    let raw = read_fixture("predictions_response.json");
    let predictions = parse_predictions_json(&raw).expect("payload should parse");
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].fixture_id, "1001");
    assert_eq!(predictions[0].pick, Pick::Home);
    assert_eq!(predictions[0].id.as_deref(), Some("p-1"));
    assert_eq!(predictions[1].fixture_id, "1002");
    assert_eq!(predictions[1].pick, Pick::Draw);
}

#[test]
fn null_and_empty_bodies_parse_to_empty() {
    assert!(parse_fixtures_json("null").expect("null should parse").is_empty());
    assert!(parse_fixtures_json("  ").expect("blank should parse").is_empty());
    assert!(parse_predictions_json("null").expect("null should parse").is_empty());
}

#[test]
fn kickoff_timestamp_shapes() {
    let rfc = parse_utc_date("2026-06-11T19:00:00Z").expect("rfc3339 should parse");
    assert_eq!(
        rfc,
        Utc.with_ymd_and_hms(2026, 6, 11, 19, 0, 0)
            .single()
            .expect("valid utc datetime")
    );
    let offset = parse_utc_date("2026-06-11T20:00:00+01:00").expect("offset should parse");
    assert_eq!(offset, rfc);
    assert!(parse_utc_date("").is_none());
    assert!(parse_utc_date("not a date").is_none());
}
