//! Per-fixture lineup cache
//!
//! Resolution dictionary for player references, not ground truth of
//! who is currently on the pitch. Built once per fixture lifetime and
//! append/replace-only: a player seen once stays resolvable even if a
//! later roster snapshot omits them (substitutions). The whole cache
//! is dropped with the fixture view; there is no in-session eviction.

use std::collections::BTreeMap;

use tracing::debug;
use types::player::Player;
use types::raw::RawLineupUpdate;
use types::team::Team;

/// Latest known rosters per team, keyed by player internal id.
#[derive(Debug, Clone, Default)]
pub struct LineupCache {
    home: BTreeMap<String, Player>,
    away: BTreeMap<String, Player>,
}

impl LineupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge lineup updates idempotently. Starting and bench players
    /// both enter the dictionary; re-ingesting the same update is a
    /// no-op, so concurrent callers need no coordination.
    pub fn ingest(&mut self, updates: &[RawLineupUpdate]) {
        for update in updates {
            let side = match update.team {
                Team::Home => &mut self.home,
                Team::Away => &mut self.away,
                Team::System => continue,
            };

            let players = update
                .lineup
                .starting_on_pitch
                .iter()
                .chain(update.lineup.starting_bench.iter());
            for player in players {
                side.insert(player.internal_id.clone(), player.clone());
            }
        }

        if !updates.is_empty() {
            debug!(
                home_players = self.home.len(),
                away_players = self.away.len(),
                "Lineup cache updated"
            );
        }
    }

    /// Resolve an internal player id for a team. Unresolved references
    /// degrade to `None`, never an error.
    pub fn resolve(&self, internal_id: &str, team: Team) -> Option<&Player> {
        match team {
            Team::Home => self.home.get(internal_id),
            Team::Away => self.away.get(internal_id),
            Team::System => None,
        }
    }

    /// Resolve an optional raw id reference into an owned player.
    pub fn resolve_ref(&self, internal_id: Option<&String>, team: Team) -> Option<Player> {
        internal_id.and_then(|id| self.resolve(id, team)).cloned()
    }

    pub fn player_count(&self) -> usize {
        self.home.len() + self.away.len()
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_empty() && self.away.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::player::TeamLineup;

    fn player(id: &str, name: &str, shirt: u32) -> Player {
        Player {
            internal_id: id.to_string(),
            source_id: format!("src-{id}"),
            source_name: name.to_string(),
            shirt_number: shirt,
            position: None,
        }
    }

    fn update(team: Team, on_pitch: Vec<Player>, bench: Vec<Player>) -> RawLineupUpdate {
        RawLineupUpdate {
            team,
            lineup: TeamLineup {
                starting_on_pitch: on_pitch,
                starting_bench: bench,
                formation: Some("4-4-2".to_string()),
            },
        }
    }

    #[test]
    fn test_resolve_by_team() {
        let mut cache = LineupCache::new();
        cache.ingest(&[
            update(Team::Home, vec![player("p1", "A. Home", 9)], vec![]),
            update(Team::Away, vec![player("p1", "B. Away", 10)], vec![]),
        ]);

        assert_eq!(cache.resolve("p1", Team::Home).unwrap().source_name, "A. Home");
        assert_eq!(cache.resolve("p1", Team::Away).unwrap().source_name, "B. Away");
        assert!(cache.resolve("p1", Team::System).is_none());
    }

    #[test]
    fn test_bench_players_resolvable() {
        let mut cache = LineupCache::new();
        cache.ingest(&[update(Team::Home, vec![], vec![player("p7", "Sub", 14)])]);
        assert!(cache.resolve("p7", Team::Home).is_some());
    }

    #[test]
    fn test_players_survive_roster_replacement() {
        let mut cache = LineupCache::new();
        cache.ingest(&[update(Team::Home, vec![player("p1", "Starter", 9)], vec![])]);

        // A later snapshot that no longer lists p1 (substituted off)
        cache.ingest(&[update(Team::Home, vec![player("p2", "Replacement", 20)], vec![])]);

        assert!(cache.resolve("p1", Team::Home).is_some());
        assert!(cache.resolve("p2", Team::Home).is_some());
        assert_eq!(cache.player_count(), 2);
    }

    #[test]
    fn test_ingest_idempotent() {
        let mut cache = LineupCache::new();
        let updates = [update(Team::Away, vec![player("p3", "Keeper", 1)], vec![])];
        cache.ingest(&updates);
        cache.ingest(&updates);
        assert_eq!(cache.player_count(), 1);
    }

    #[test]
    fn test_unresolved_is_none() {
        let cache = LineupCache::new();
        assert!(cache.resolve("ghost", Team::Home).is_none());
        assert!(cache.resolve_ref(None, Team::Home).is_none());
    }
}
