//! Lenient snapshot decoding
//!
//! The upstream snapshot is an opaque JSON object with one named array
//! per action category. Records are decoded individually: a malformed
//! record is logged and skipped, never fatal to its batch.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use types::raw::MatchActionsSnapshot;

/// Errors from decoding a snapshot's envelope. Record-level failures
/// are not errors; they degrade to skipped records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("snapshot root is not a JSON object")]
    NotAnObject,
}

/// Decode a raw snapshot object into typed category arrays.
pub fn parse_snapshot(snapshot: &Value) -> Result<MatchActionsSnapshot, IngestError> {
    let root = snapshot.as_object().ok_or(IngestError::NotAnObject)?;

    let decoded = MatchActionsSnapshot {
        goals: decode_category(root, "goals"),
        yellow_cards: decode_category(root, "yellowCards"),
        second_yellow_cards: decode_category(root, "secondYellowCards"),
        straight_red_cards: decode_category(root, "straightRedCards"),
        substitutions: decode_category(root, "substitutions"),
        shots_on_target: decode_category(root, "shotsOnTarget"),
        shots_off_target: decode_category(root, "shotsOffTarget"),
        blocked_shots: decode_category(root, "blockedShots"),
        shots_off_woodwork: decode_category(root, "shotsOffWoodwork"),
        corners: decode_corners(root),
        penalties: decode_category(root, "penalties"),
        var_state_changes: decode_category(root, "varStateChanges"),
        phase_changes: decode_category(root, "phaseChanges"),
        danger_state_changes: decode_category(root, "dangerStateChanges"),
        booking_state_changes: decode_category(root, "bookingStateChanges"),
        system_messages: decode_category(root, "systemMessages"),
        throw_ins: decode_category(root, "throwIns"),
        fouls: decode_category(root, "fouls"),
        goal_kicks: decode_category(root, "goalKicks"),
        offsides: decode_category(root, "offsides"),
        kick_offs: decode_category(root, "kickOffs"),
        stoppage_time_announcements: decode_category(root, "stoppageTimeAnnouncements"),
        lineup_updates: decode_category(root, "lineupUpdates"),
    };

    debug!(
        goals = decoded.goals.len(),
        danger_states = decoded.danger_state_changes.len(),
        lineup_updates = decoded.lineup_updates.len(),
        "Snapshot decoded"
    );

    Ok(decoded)
}

/// Decode one category array, skipping records that fail to decode.
/// A missing or non-array category yields an empty list.
fn decode_category<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Vec<T> {
    let Some(records) = root.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<T>(record.clone()) {
            Ok(decoded) => out.push(decoded),
            Err(err) => warn!(
                category = key,
                index,
                error = %err,
                "Skipping malformed record"
            ),
        }
    }
    out
}

/// Corners moved to a `cornersV2` key in newer payloads; prefer it,
/// fall back to the legacy name.
fn decode_corners(root: &Map<String, Value>) -> Vec<types::raw::RawCorner> {
    if root.contains_key("cornersV2") {
        decode_category(root, "cornersV2")
    } else {
        decode_category(root, "corners")
    }
}
