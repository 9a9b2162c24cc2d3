use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use matchday_picks::api_fetch::{
    FixtureQuery, fetch_fixtures, fetch_user_predictions, parse_fixtures_json,
    parse_predictions_json,
};
use matchday_picks::deadline::deadline_status;
use matchday_picks::display_state::classify;
use matchday_picks::fixture::{Fixture, Prediction, Side};
use matchday_picks::grouping::group_and_sort;
use matchday_picks::matchweek::current_week;
use matchday_picks::scoring::{PredictionOutcome, score_prediction};

/// Prints the matchday board: fixtures grouped by league and round with
/// lock state, results, and the caller's picks. Input comes from local JSON
/// files when paths are given, otherwise from the backend named by
/// `API_BASE`.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let fixtures_path = std::env::args().nth(1).map(PathBuf::from);
    let predictions_path = std::env::args().nth(2).map(PathBuf::from);

    let fixtures = load_fixtures(fixtures_path)?;
    let predictions = load_predictions(predictions_path)?;

    let now = Utc::now();
    print_board(&fixtures, &predictions, now);
    Ok(())
}

fn load_fixtures(path: Option<PathBuf>) -> Result<Vec<Fixture>> {
    if let Some(path) = path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return parse_fixtures_json(&raw);
    }

    let base = std::env::var("API_BASE")
        .context("pass a fixtures JSON path or set API_BASE")?;
    let query = FixtureQuery {
        league_ids: league_ids_from_env(),
        matchday: env_u32("MATCHDAY"),
        days_ahead: env_u32("DAYS_AHEAD").or(Some(28)),
    };
    fetch_fixtures(&base, &query)
}

fn load_predictions(path: Option<PathBuf>) -> Result<Vec<Prediction>> {
    if let Some(path) = path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        return parse_predictions_json(&raw);
    }

    let (Ok(base), Ok(user_id)) = (std::env::var("API_BASE"), std::env::var("USER_ID")) else {
        return Ok(Vec::new());
    };
    fetch_user_predictions(&base, &user_id)
}

fn league_ids_from_env() -> Vec<u32> {
    std::env::var("LEAGUE_IDS")
        .unwrap_or_else(|_| "39".to_string())
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .collect()
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|val| val.parse::<u32>().ok())
}

fn print_board(fixtures: &[Fixture], predictions: &[Prediction], now: DateTime<Utc>) {
    let week = current_week(now);
    let status = deadline_status(now);
    println!("Week {}", week.week_id);
    if status.can_change {
        println!(
            "Predictions close {} ({}h {}m remaining)",
            status.weekly_deadline.format("%a %d %b %H:%M"),
            status.hours_remaining,
            status.minutes_remaining
        );
    } else {
        println!("Predictions are locked for this week");
    }

    for group in group_and_sort(fixtures) {
        println!();
        println!(
            "== {} — Matchday {} ({} matches)",
            group.league_name,
            group.round,
            group.fixtures.len()
        );
        for fixture in &group.fixtures {
            print_fixture(fixture, predictions, now);
        }
    }
}

fn print_fixture(fixture: &Fixture, predictions: &[Prediction], now: DateTime<Utc>) {
    let state = classify(fixture, now);
    let kickoff = match fixture.utc_date {
        Some(date) => date.format("%a %d %b %H:%M").to_string(),
        None => "TBD".to_string(),
    };

    let mut line = format!(
        "  {kickoff}  {} vs {}",
        fixture.home_team, fixture.away_team
    );

    if state.is_abandoned {
        line.push_str("  [ABANDONED]");
    } else if state.is_postponed {
        line.push_str("  [POSTPONED]");
    } else if state.is_finished && state.has_score {
        if let Some(score) = fixture.score {
            line.push_str(&format!(
                "  FT {}-{}",
                score.home.unwrap_or_default(),
                score.away.unwrap_or_default()
            ));
        }
        if state.has_penalty_winner {
            let winner = match fixture.penalty_winner {
                Some(Side::Home) => fixture.home_team.as_str(),
                _ => fixture.away_team.as_str(),
            };
            line.push_str(&format!(" (pens: {winner})"));
        }
    } else if state.locked {
        line.push_str("  [LOCKED]");
    } else {
        line.push_str("  [OPEN]");
    }

    if let Some(prediction) = predictions
        .iter()
        .find(|p| p.fixture_id == fixture.fixture_id)
    {
        let outcome = score_prediction(prediction.pick, fixture);
        line.push_str(&format!("  pick: {}", prediction.pick.as_str()));
        match outcome {
            PredictionOutcome::Correct => {
                line.push_str(&format!(" (+{} pts)", outcome.points()));
            }
            PredictionOutcome::Incorrect => line.push_str(" (0 pts)"),
            PredictionOutcome::Void => line.push_str(" (void)"),
            PredictionOutcome::Pending => {}
        }
    }

    println!("{line}");
}
