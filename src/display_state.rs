//! Per-fixture display state and the gate every prediction write must pass.

use std::error::Error;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::deadline::is_prediction_locked;
use crate::fixture::Fixture;

/// Flags driving how one fixture card renders and whether it still takes
/// predictions. `locked` is false for undated fixtures; a date TBD cannot
/// lock anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub is_finished: bool,
    pub is_abandoned: bool,
    pub is_postponed: bool,
    pub has_score: bool,
    pub has_penalty_winner: bool,
    pub locked: bool,
}

pub fn classify(fixture: &Fixture, now: DateTime<Utc>) -> DisplayState {
    DisplayState {
        is_finished: fixture.is_finished(),
        is_abandoned: fixture.is_abandoned(),
        is_postponed: fixture.is_postponed(),
        has_score: fixture.has_score(),
        has_penalty_winner: fixture.has_penalty_winner(),
        locked: fixture
            .utc_date
            .is_some_and(|date| is_prediction_locked(date, now)),
    }
}

/// Why a prediction write was refused. Callers surface a distinct message
/// per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionRejected {
    Locked,
    Abandoned,
    Postponed,
}

impl fmt::Display for PredictionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionRejected::Locked => {
                write!(f, "predictions are locked for this match")
            }
            PredictionRejected::Abandoned => {
                write!(f, "this match was abandoned and will not be scored")
            }
            PredictionRejected::Postponed => {
                write!(f, "this match was postponed; predictions reopen once it is rescheduled")
            }
        }
    }
}

impl Error for PredictionRejected {}

/// Check that a fixture still accepts predictions at `now`.
///
/// Abandoned and postponed fixtures refuse writes outright; otherwise the
/// deadline lock applies. On `Err` the caller must not attempt the remote
/// write.
pub fn ensure_predictable(fixture: &Fixture, now: DateTime<Utc>) -> Result<(), PredictionRejected> {
    let state = classify(fixture, now);
    if state.is_abandoned {
        return Err(PredictionRejected::Abandoned);
    }
    if state.is_postponed {
        return Err(PredictionRejected::Postponed);
    }
    if state.locked {
        return Err(PredictionRejected::Locked);
    }
    Ok(())
}
