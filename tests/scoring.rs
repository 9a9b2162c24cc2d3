use chrono::{DateTime, TimeZone, Utc};

use matchday_picks::fixture::{Fixture, Pick, Score, Side};
use matchday_picks::matchweek::{current_week, week_id};
use matchday_picks::scoring::{
    PredictionOutcome, actual_result, can_delete_prediction, score_prediction,
};

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid utc datetime")
}

fn finished(home: u32, away: u32) -> Fixture {
    Fixture {
        fixture_id: "f1".to_string(),
        league_name: Some("Premier League".to_string()),
        matchday: Some("Regular Season - 21".to_string()),
        utc_date: Some(utc(2026, 1, 3, 15)),
        status: "FINISHED".to_string(),
        home_team: "Arsenal".to_string(),
        away_team: "Chelsea".to_string(),
        score: Some(Score { home: Some(home), away: Some(away) }),
        penalty_winner: None,
    }
}

#[test]
fn implied_result_follows_the_score() {
    assert_eq!(actual_result(&finished(2, 1)), Some(Pick::Home));
    assert_eq!(actual_result(&finished(0, 3)), Some(Pick::Away));
    assert_eq!(actual_result(&finished(1, 1)), Some(Pick::Draw));

    let mut partial = finished(2, 1);
    partial.score = Some(Score { home: Some(2), away: None });
    assert_eq!(actual_result(&partial), None);
}

#[test]
fn correct_pick_earns_three_points() {
    let outcome = score_prediction(Pick::Home, &finished(2, 1));
    assert_eq!(outcome, PredictionOutcome::Correct);
    assert_eq!(outcome.points(), 3);

    let outcome = score_prediction(Pick::Draw, &finished(2, 1));
    assert_eq!(outcome, PredictionOutcome::Incorrect);
    assert_eq!(outcome.points(), 0);
}

#[test]
fn penalty_shootout_does_not_change_the_implied_result() {
    let mut f = finished(1, 1);
    f.status = "FINISHED_AET".to_string();
    f.penalty_winner = Some(Side::Home);
    assert_eq!(score_prediction(Pick::Draw, &f), PredictionOutcome::Correct);
    assert_eq!(score_prediction(Pick::Home, &f), PredictionOutcome::Incorrect);
}

#[test]
fn unfinished_or_scoreless_fixtures_stay_pending() {
    let mut f = finished(2, 1);
    f.status = "SCHEDULED".to_string();
    assert_eq!(score_prediction(Pick::Home, &f), PredictionOutcome::Pending);

    let mut f = finished(2, 1);
    f.score = None;
    assert_eq!(score_prediction(Pick::Home, &f), PredictionOutcome::Pending);
}

#[test]
fn abandoned_fixtures_void_the_pick() {
    let mut f = finished(2, 1);
    f.status = "ABANDONED".to_string();
    let outcome = score_prediction(Pick::Home, &f);
    assert_eq!(outcome, PredictionOutcome::Void);
    assert_eq!(outcome.points(), 0);
}

#[test]
fn deletion_only_while_genuinely_upcoming() {
    let now = utc(2026, 1, 5, 12);

    let mut f = finished(0, 0);
    f.status = "SCHEDULED".to_string();
    f.score = None;
    f.utc_date = Some(utc(2026, 1, 6, 15));
    assert!(can_delete_prediction(&f, now));

    // Kickoff passed.
    f.utc_date = Some(utc(2026, 1, 5, 12));
    assert!(!can_delete_prediction(&f, now));

    // Status moved on even though the date looks fine.
    f.utc_date = Some(utc(2026, 1, 6, 15));
    f.status = "IN_PLAY".to_string();
    assert!(!can_delete_prediction(&f, now));

    // Date TBD stays deletable.
    f.status = "TBD".to_string();
    f.utc_date = None;
    assert!(can_delete_prediction(&f, now));
}

#[test]
fn week_id_uses_monday_anchored_numbering() {
    assert_eq!(week_id(utc(2026, 1, 5, 0)), "2026-W01");
    assert_eq!(week_id(utc(2026, 1, 4, 23)), "2026-W00");
}

#[test]
fn current_week_window_spans_monday_to_sunday() {
    // Thursday 2026-01-08 sits in the week of Monday the 5th.
    let week = current_week(utc(2026, 1, 8, 9));
    assert_eq!(week.week_start, utc(2026, 1, 5, 0));
    assert_eq!(
        week.cutoff,
        Utc.with_ymd_and_hms(2026, 1, 7, 23, 59, 59)
            .single()
            .expect("valid utc datetime")
    );
    assert_eq!(
        week.week_end,
        Utc.with_ymd_and_hms(2026, 1, 11, 23, 59, 59)
            .single()
            .expect("valid utc datetime")
    );
    assert_eq!(week.week_id, "2026-W01");
}
