//! Weekly prediction deadline. Picks lock at kickoff, and the Wednesday
//! 23:59:59.999 cutoff closes the current round early for matches falling
//! inside the coming seven days.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// The upcoming Wednesday 23:59:59.999 cutoff relative to `now`.
///
/// Sunday through Wednesday resolve to this week's Wednesday (Wednesday
/// itself counts as today); Thursday through Saturday roll over to the
/// following week's.
pub fn wednesday_deadline(now: DateTime<Utc>) -> DateTime<Utc> {
    let dow = now.weekday().num_days_from_sunday();
    let days_until_wednesday = if dow <= 3 { 3 - dow } else { (7 - dow) + 3 };
    let date = now.date_naive() + Duration::days(i64::from(days_until_wednesday));
    let deadline = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("valid wall-clock time");
    Utc.from_utc_datetime(&deadline)
}

/// Whether a prediction for a match kicking off at `match_date` may no
/// longer be created or changed at `now`.
///
/// Locked once kickoff is reached. Before kickoff, the fixture stays open
/// through the Wednesday cutoff; past the cutoff, matches inside the next
/// seven days lock while later rounds remain open.
pub fn is_prediction_locked(match_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    if now >= match_date {
        return true;
    }

    let deadline = wednesday_deadline(now);
    if now > deadline {
        return match_date - now < Duration::days(7);
    }

    false
}

/// Snapshot of where the current round stands, for display to players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineStatus {
    pub weekly_deadline: DateTime<Utc>,
    pub hours_remaining: i64,
    pub minutes_remaining: i64,
    pub can_change: bool,
}

pub fn deadline_status(now: DateTime<Utc>) -> DeadlineStatus {
    let weekly_deadline = wednesday_deadline(now);
    let remaining = weekly_deadline - now;
    let total_seconds = remaining.num_seconds().max(0);
    DeadlineStatus {
        weekly_deadline,
        hours_remaining: total_seconds / 3600,
        minutes_remaining: (total_seconds % 3600) / 60,
        can_change: now <= weekly_deadline,
    }
}
