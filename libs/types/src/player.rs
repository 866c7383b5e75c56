//! Player identity and lineup snapshots

use serde::{Deserialize, Serialize};

/// Display identity of a player, resolved from a lineup snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Provider-internal identifier, the lookup key for resolution.
    pub internal_id: String,
    pub source_id: String,
    pub source_name: String,
    pub shirt_number: u32,
    #[serde(default)]
    pub position: Option<String>,
}

/// One team's roster as reported by a lineup update.
///
/// Multiple snapshots can arrive over a match (substitution-driven);
/// only the latest per team is current, but previously seen players
/// stay resolvable for the fixture's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    #[serde(default)]
    pub starting_on_pitch: Vec<Player>,
    #[serde(default)]
    pub starting_bench: Vec<Player>,
    #[serde(default)]
    pub formation: Option<String>,
}
