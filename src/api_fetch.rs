//! Backend REST client: fixture and prediction payload parsing plus the
//! blocking calls around them. Parsing is deliberately lenient — ids arrive
//! as strings or numbers, scores nested or flat, dates in a couple of
//! shapes — and anything unusable is skipped rather than failing the batch.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use crate::display_state::ensure_predictable;
use crate::fixture::{Fixture, Pick, Prediction, Score, Side};
use crate::http_cache::fetch_json_cached;
use crate::http_client::http_client;

/// Parameters for the backend's "list fixtures" operation. A specific
/// matchday takes precedence over the days-ahead window.
#[derive(Debug, Clone, Default)]
pub struct FixtureQuery {
    pub league_ids: Vec<u32>,
    pub matchday: Option<u32>,
    pub days_ahead: Option<u32>,
}

pub fn fetch_fixtures(base_url: &str, query: &FixtureQuery) -> Result<Vec<Fixture>> {
    let client = http_client()?;
    let ids = query
        .league_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    let mut url = format!("{base_url}/api/fixtures?league_ids={ids}");
    if let Some(matchday) = query.matchday {
        url.push_str(&format!("&matchday={matchday}"));
    } else if let Some(days_ahead) = query.days_ahead {
        url.push_str(&format!("&days_ahead={days_ahead}"));
    }

    let body = fetch_json_cached(client, &url, &[]).context("fixtures request failed")?;
    parse_fixtures_json(&body)
}

pub fn fetch_user_predictions(base_url: &str, user_id: &str) -> Result<Vec<Prediction>> {
    let client = http_client()?;
    let url = format!("{base_url}/api/predictions/user/{user_id}");
    let body = fetch_json_cached(client, &url, &[]).context("predictions request failed")?;
    parse_predictions_json(&body)
}

/// Submit or overwrite a prediction. The lock/abandoned/postponed gate runs
/// here, before any bytes leave the process.
pub fn submit_prediction(
    base_url: &str,
    fixture: &Fixture,
    user_id: &str,
    pick: Pick,
    now: DateTime<Utc>,
) -> Result<()> {
    ensure_predictable(fixture, now)?;

    let client = http_client()?;
    let body = serde_json::json!({
        "user_id": user_id,
        "fixture_id": fixture.fixture_id,
        "prediction": pick.as_str(),
        "match_date": fixture.utc_date.map(|d| d.to_rfc3339()),
    });
    let resp = client
        .post(format!("{base_url}/api/predictions"))
        .json(&body)
        .send()
        .context("prediction submit failed")?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().unwrap_or_default();
        return Err(anyhow::anyhow!("http {status}: {text}"));
    }
    Ok(())
}

pub fn delete_prediction(base_url: &str, prediction_id: &str, user_id: &str) -> Result<()> {
    let client = http_client()?;
    let url = format!("{base_url}/api/predictions/{prediction_id}?user_id={user_id}");
    let resp = client
        .delete(url)
        .send()
        .context("prediction delete failed")?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().unwrap_or_default();
        return Err(anyhow::anyhow!("http {status}: {text}"));
    }
    Ok(())
}

pub fn parse_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;

    let mut out = Vec::new();
    let items = v
        .as_array()
        .or_else(|| v.get("fixtures").and_then(|x| x.as_array()));
    if let Some(items) = items {
        for item in items {
            if let Some(fixture) = parse_fixture(item) {
                out.push(fixture);
            }
        }
    }
    Ok(out)
}

pub fn parse_predictions_json(raw: &str) -> Result<Vec<Prediction>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let v: Value = serde_json::from_str(trimmed).context("invalid predictions json")?;

    let mut out = Vec::new();
    let items = v
        .as_array()
        .or_else(|| v.get("predictions").and_then(|x| x.as_array()));
    if let Some(items) = items {
        for item in items {
            if let Some(prediction) = parse_prediction(item) {
                out.push(prediction);
            }
        }
    }
    Ok(out)
}

fn parse_fixture(v: &Value) -> Option<Fixture> {
    let fixture_id = id_string(v.get("fixture_id")?)?;

    let status = v
        .get("status")
        .and_then(|x| x.as_str())
        .unwrap_or("SCHEDULED")
        .to_string();
    let utc_date = v
        .get("utc_date")
        .and_then(|x| x.as_str())
        .and_then(parse_utc_date);
    let penalty_winner = v
        .get("penalty_winner")
        .and_then(|x| x.as_str())
        .and_then(Side::parse);

    Some(Fixture {
        fixture_id,
        league_name: string_field(v, "league_name"),
        matchday: string_field(v, "matchday"),
        utc_date,
        status,
        home_team: string_field(v, "home_team").unwrap_or_default(),
        away_team: string_field(v, "away_team").unwrap_or_default(),
        score: parse_score(v),
        penalty_winner,
    })
}

fn parse_prediction(v: &Value) -> Option<Prediction> {
    let fixture_id = id_string(v.get("fixture_id")?)?;
    let pick = v.get("prediction").and_then(|x| x.as_str()).and_then(Pick::parse)?;
    Some(Prediction {
        id: v.get("id").and_then(id_string),
        fixture_id,
        user_id: string_field(v, "user_id").unwrap_or_default(),
        pick,
    })
}

/// Nested `score` object preferred; older records carry flat
/// `home_score`/`away_score` keys instead.
fn parse_score(v: &Value) -> Option<Score> {
    if let Some(score) = v.get("score").filter(|s| s.is_object()) {
        return Some(Score {
            home: goals(score.get("home")),
            away: goals(score.get("away")),
        });
    }
    let home = goals(v.get("home_score"));
    let away = goals(v.get("away_score"));
    if home.is_some() || away.is_some() {
        return Some(Score { home, away });
    }
    None
}

/// Kickoff timestamps arrive as RFC 3339 (usually `Z`-suffixed) or as a
/// bare `YYYY-MM-DDTHH:MM:SS`. Anything else means "date TBD".
pub fn parse_utc_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn goals(v: Option<&Value>) -> Option<u32> {
    v.and_then(|x| x.as_u64()).map(|n| n as u32)
}

fn string_field(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(|x| x.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
