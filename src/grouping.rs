//! Deterministic grouping and ordering of fixtures into display sections.
//!
//! Fixtures partition by `(league name, round number)`. Cup and continental
//! competitions order chronologically; league groups order by round number.
//! The whole pipeline is pure and stable: equal keys keep first-encountered
//! order, and re-running it on its own output changes nothing.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::fixture::Fixture;
use crate::matchweek::extract_round_number;

/// Competitions ordered chronologically rather than by round number.
pub const TOURNAMENT_LEAGUES: [&str; 5] = [
    "World Cup",
    "FA Cup",
    "UEFA Champions League",
    "UEFA Europa League",
    "UEFA Conference League",
];

pub fn is_tournament_league(league_name: &str) -> bool {
    TOURNAMENT_LEAGUES.iter().any(|t| league_name.contains(t))
}

/// Derived view pairing `(league_name, round)` with its member fixtures.
/// Recomputed on every call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureGroup {
    pub league_name: String,
    pub round: u32,
    pub fixtures: Vec<Fixture>,
}

/// Group fixtures into ordered display sections.
///
/// Duplicate `fixture_id`s are dropped first (first occurrence wins).
/// Note the key is the extracted round number, not the raw label: "MD 12"
/// and "Round 12" land in the same group. That collision is long-standing
/// observable behavior and is kept as-is.
pub fn group_and_sort(fixtures: &[Fixture]) -> Vec<FixtureGroup> {
    let mut seen = HashSet::new();
    let mut groups: Vec<FixtureGroup> = Vec::new();
    let mut index: HashMap<(String, u32), usize> = HashMap::new();

    for fixture in fixtures {
        if !seen.insert(fixture.fixture_id.clone()) {
            continue;
        }

        let league_name = fixture
            .league_name
            .clone()
            .unwrap_or_else(|| "Unknown League".to_string());
        let round = extract_round_number(fixture.matchday.as_deref());

        let key = (league_name.clone(), round);
        let idx = match index.get(&key) {
            Some(&idx) => idx,
            None => {
                groups.push(FixtureGroup {
                    league_name,
                    round,
                    fixtures: Vec::new(),
                });
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[idx].fixtures.push(fixture.clone());
    }

    // League name first; within one league, tournaments run chronologically
    // and regular leagues by round number. sort_by is stable, so groups that
    // tie on both keys keep first-encountered order.
    groups.sort_by(|a, b| match a.league_name.cmp(&b.league_name) {
        Ordering::Equal => {
            if is_tournament_league(&a.league_name) {
                earliest_kickoff_millis(a).cmp(&earliest_kickoff_millis(b))
            } else {
                a.round.cmp(&b.round)
            }
        }
        other => other,
    });

    for group in &mut groups {
        group.fixtures.sort_by(compare_kickoff);
    }

    groups
}

/// Earliest dated kickoff in the group; all-null groups sort last.
fn earliest_kickoff_millis(group: &FixtureGroup) -> i64 {
    group
        .fixtures
        .iter()
        .filter_map(|f| f.utc_date)
        .map(|d| d.timestamp_millis())
        .min()
        .unwrap_or(i64::MAX)
}

/// Kickoff ascending with undated fixtures after every dated one. Ties are
/// left Equal so the stable sort preserves input order.
fn compare_kickoff(a: &Fixture, b: &Fixture) -> Ordering {
    match (a.utc_date, b.utc_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(da), Some(db)) => da.cmp(&db),
    }
}
