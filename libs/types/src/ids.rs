//! Identifier types for feed entities
//!
//! Fixtures carry a provider-assigned string id; events carry numeric
//! ids that are unique within their source category. Categories whose
//! raw id spaces collide apply a documented offset when normalizing
//! (see the feed pipeline's normalizer).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one scheduled/live match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureId(String);

impl FixtureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FixtureId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a single canonical event.
///
/// Unique within its source category only; deduplication across raw
/// snapshots is the consumer's responsibility when merging by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

/// Offset applied to foul ids, which share a raw id space with the
/// danger-state category.
pub const FOUL_ID_OFFSET: i64 = 10_000;

impl EventId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Id of the `cornerAwarded` sub-event derived from a raw corner.
    pub fn corner_awarded(raw_id: i64) -> Self {
        Self(raw_id * 100 + 1)
    }

    /// Id of the `cornerTaken` sub-event derived from a raw corner.
    pub fn corner_taken(raw_id: i64) -> Self {
        Self(raw_id * 100 + 2)
    }

    /// Id of a foul event, offset out of the danger-state id space.
    pub fn foul(raw_id: i64) -> Self {
        Self(raw_id + FOUL_ID_OFFSET)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
