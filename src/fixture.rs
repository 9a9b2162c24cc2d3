use chrono::{DateTime, Utc};

/// A player's call on a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pick {
    Home,
    Draw,
    Away,
}

impl Pick {
    pub fn parse(raw: &str) -> Option<Pick> {
        match raw.trim() {
            "home" => Some(Pick::Home),
            "draw" => Some(Pick::Draw),
            "away" => Some(Pick::Away),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Pick::Home => "home",
            Pick::Draw => "draw",
            Pick::Away => "away",
        }
    }
}

/// Winner of a penalty shoot-out, where one happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn parse(raw: &str) -> Option<Side> {
        match raw.trim() {
            "home" => Some(Side::Home),
            "away" => Some(Side::Away),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Recorded full-time score. Either side may still be null while the
/// backend is mid-update, so both goals stay optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// One scheduled or completed match, as served by the backend.
///
/// `status` is kept as free text because the upstream set is extensible
/// (`SCHEDULED`, `FINISHED`, `FINISHED_AET`, `ABANDONED`, `POSTPONED`, ...);
/// unknown values fall through every predicate below and take the default
/// active/predictable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub fixture_id: String,
    pub league_name: Option<String>,
    pub matchday: Option<String>,
    pub utc_date: Option<DateTime<Utc>>,
    pub status: String,
    pub home_team: String,
    pub away_team: String,
    pub score: Option<Score>,
    pub penalty_winner: Option<Side>,
}

impl Fixture {
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "FINISHED" | "FINISHED_AET")
    }

    pub fn is_abandoned(&self) -> bool {
        self.status == "ABANDONED"
    }

    pub fn is_postponed(&self) -> bool {
        self.status == "POSTPONED"
    }

    /// A score only counts once the home goals are filled in.
    pub fn has_score(&self) -> bool {
        self.score.is_some_and(|s| s.home.is_some())
    }

    pub fn has_penalty_winner(&self) -> bool {
        self.penalty_winner.is_some()
    }
}

/// A user's stored prediction for one fixture. Overwritten on repeat
/// submission until the fixture locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub id: Option<String>,
    pub fixture_id: String,
    pub user_id: String,
    pub pick: Pick,
}
