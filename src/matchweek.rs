//! Round labels and the Monday-anchored weekly cycle.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// Extract the round number from a free-text matchday label.
///
/// The last whitespace-separated token that parses as an integer wins,
/// scanning from the end: `"Regular Season - 12"` is round 12. Labels with
/// no integer token ("Final", "Unknown") and missing labels are round 0.
pub fn extract_round_number(label: Option<&str>) -> u32 {
    let Some(label) = label else {
        return 0;
    };
    label
        .split_whitespace()
        .rev()
        .find_map(|token| token.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Week identifier in the game's `%Y-W%W` form, e.g. `2026-W09`.
pub fn week_id(date: DateTime<Utc>) -> String {
    date.format("%Y-W%W").to_string()
}

/// One playing week of the game: Monday start, Wednesday prediction
/// cutoff, Sunday close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekWindow {
    pub week_id: String,
    pub week_start: DateTime<Utc>,
    pub cutoff: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
}

pub fn current_week(now: DateTime<Utc>) -> WeekWindow {
    let monday = now.date_naive() - Duration::days(i64::from(now.weekday().num_days_from_monday()));
    let wednesday = monday + Duration::days(2);
    let sunday = monday + Duration::days(6);

    let week_start = day_at(monday, 0, 0, 0);
    WeekWindow {
        week_id: week_id(week_start),
        week_start,
        cutoff: day_at(wednesday, 23, 59, 59),
        week_end: day_at(sunday, 23, 59, 59),
    }
}

fn day_at(date: NaiveDate, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour, min, sec)
        .expect("valid wall-clock time");
    Utc.from_utc_datetime(&naive)
}
