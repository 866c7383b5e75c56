//! Fixture metadata and auxiliary feed summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::FixtureId;

/// One scheduled/live match as listed by the fixtures API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub fixture_id: FixtureId,
    pub status: String,
    pub origin: String,
    pub start_date_utc: DateTime<Utc>,
    pub name: String,
    pub competition_name: String,
}

impl Fixture {
    /// Whether the provider reports live coverage for this fixture.
    pub fn is_covered(&self) -> bool {
        self.status.eq_ignore_ascii_case("covered")
    }
}

/// Most recent action summary for a fixture, served by the auxiliary
/// last-action endpoint and refreshed through the adaptive poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub description: String,
    #[serde(default)]
    pub timestamp_utc: Option<String>,
}
