//! Team attribution for canonical events
//!
//! Raw danger-state strings encode the team as a `Home`/`Away` prefix;
//! `split_prefixed` strips it. Foul records name the team committing
//! the foul, while the canonical event is attributed to the opponent
//! (the side the event favors), via `opponent`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side a canonical event is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
    /// Match-scoped events (phase changes, system messages, added time).
    System,
}

impl Team {
    /// The opposing side. `System` has no opponent.
    pub fn opponent(&self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
            Team::System => Team::System,
        }
    }

    /// Split a team-prefixed state string such as `"HomeDangerousAttack"`
    /// into the team and the remaining state name. Returns `None` when
    /// the string carries no team prefix.
    pub fn split_prefixed(s: &str) -> Option<(Team, &str)> {
        if let Some(rest) = s.strip_prefix("Home") {
            Some((Team::Home, rest))
        } else if let Some(rest) = s.strip_prefix("Away") {
            Some((Team::Away, rest))
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Team::Home => "Home",
            Team::Away => "Away",
            Team::System => "System",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
