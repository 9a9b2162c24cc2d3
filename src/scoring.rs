//! Outcome of a prediction once results come in, and the rule for when a
//! prediction may still be withdrawn.

use chrono::{DateTime, Utc};

use crate::fixture::{Fixture, Pick};

/// Points awarded per correct pick. Totals are settled weekly, not here.
pub const POINTS_CORRECT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOutcome {
    /// Fixture not finished yet, or finished without a usable score.
    Pending,
    /// Abandoned fixture; the pick is never scored.
    Void,
    Correct,
    Incorrect,
}

impl PredictionOutcome {
    pub fn points(self) -> u32 {
        match self {
            PredictionOutcome::Correct => POINTS_CORRECT,
            _ => 0,
        }
    }
}

/// Full-time result implied by the recorded score, when both goals are in.
/// Penalty shoot-outs do not change this; a drawn score stays a draw.
pub fn actual_result(fixture: &Fixture) -> Option<Pick> {
    let score = fixture.score?;
    let home = score.home?;
    let away = score.away?;
    Some(if home > away {
        Pick::Home
    } else if away > home {
        Pick::Away
    } else {
        Pick::Draw
    })
}

pub fn score_prediction(pick: Pick, fixture: &Fixture) -> PredictionOutcome {
    if fixture.is_abandoned() {
        return PredictionOutcome::Void;
    }
    if !fixture.is_finished() || !fixture.has_score() {
        return PredictionOutcome::Pending;
    }
    match actual_result(fixture) {
        Some(actual) if actual == pick => PredictionOutcome::Correct,
        Some(_) => PredictionOutcome::Incorrect,
        None => PredictionOutcome::Pending,
    }
}

/// A prediction can be withdrawn only while the match is genuinely still
/// upcoming: pre-kickoff status and, when the kickoff instant is known,
/// `now` before it. Undated fixtures stay deletable.
pub fn can_delete_prediction(fixture: &Fixture, now: DateTime<Utc>) -> bool {
    if !matches!(fixture.status.as_str(), "SCHEDULED" | "TBD" | "NS") {
        return false;
    }
    match fixture.utc_date {
        Some(kickoff) => now < kickoff,
        None => true,
    }
}
