//! Raw feed records, one type per action category
//!
//! These mirror the provider's wire shapes (`camelCase` field names).
//! Records are decoded one at a time by the pipeline's ingest layer so
//! a malformed record skips quietly instead of failing its batch.

use serde::{Deserialize, Serialize};

use crate::phase::MatchPhase;
use crate::player::TeamLineup;
use crate::states::BookingState;
use crate::team::Team;

/// A goal, with optional scorer/assist references into the lineup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGoal {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub is_own_goal: bool,
    #[serde(default)]
    pub was_scored_from_penalty: bool,
    #[serde(default)]
    pub scored_by_internal_id: Option<String>,
    #[serde(default)]
    pub assist_by_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// Yellow, second-yellow, and straight red cards share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub player_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubstitution {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub player_on_internal_id: Option<String>,
    #[serde(default)]
    pub player_off_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShotOnTarget {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub player_internal_id: Option<String>,
    #[serde(default)]
    pub saved_by_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// Generic single-player action: off-target/blocked/woodwork shots,
/// goal kicks, offsides, kick-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayerAction {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub player_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// A corner record encodes two temporal sub-events; each becomes its
/// own canonical event only when independently confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCorner {
    pub id: i64,
    pub phase: MatchPhase,
    pub team: Team,
    #[serde(default)]
    pub awarded: Option<RawCornerSubState>,
    #[serde(default)]
    pub taken: Option<RawCornerSubState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCornerSubState {
    #[serde(default)]
    pub is_confirmed: bool,
    pub timestamp_utc: String,
    pub time_elapsed_in_phase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPenalty {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub penalty_outcome: Option<RawPenaltyOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPenaltyOutcome {
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// VAR review record. The `V2` reason/outcome fields take priority
/// over their legacy counterparts when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVarStateChange {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    #[serde(default)]
    pub team: Option<Team>,
    pub var_state: String,
    #[serde(default)]
    pub var_reason: Option<String>,
    #[serde(default)]
    pub var_outcome: Option<String>,
    #[serde(default)]
    pub var_reason_v2: Option<String>,
    #[serde(default)]
    pub var_outcome_v2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPhaseChange {
    pub id: i64,
    pub timestamp_utc: String,
    #[serde(default)]
    pub previous_phase: Option<MatchPhase>,
    pub current_phase: MatchPhase,
    #[serde(default)]
    pub current_phase_start_time: Option<String>,
}

/// Danger-state record. `danger_state` is team-prefixed on the wire
/// (`"HomeAttack"`); the normalizer splits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDangerStateChange {
    pub id: i64,
    #[serde(default)]
    pub sequence_id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub danger_state: String,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBookingStateChange {
    pub id: i64,
    #[serde(default)]
    pub sequence_id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    pub booking_state: BookingState,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// System message. Older payloads carry the timestamp under
/// `timestamp` rather than `timestampUtc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSystemMessage {
    pub id: i64,
    pub message: String,
    pub message_id: i64,
    #[serde(alias = "timestamp")]
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThrowIn {
    pub id: i64,
    #[serde(default)]
    pub sequence_id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub team: Team,
    #[serde(default)]
    pub player_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

/// Foul record. `fouling_team` is the side committing the foul; the
/// canonical event is attributed to the opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFoul {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    pub fouling_team: Team,
    #[serde(default)]
    pub fouled_player_internal_id: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStoppageTimeAnnouncement {
    pub id: i64,
    pub timestamp_utc: String,
    pub phase: MatchPhase,
    pub time_elapsed_in_phase: String,
    #[serde(default)]
    pub added_minutes: u32,
    #[serde(default)]
    pub is_confirmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineupUpdate {
    pub team: Team,
    pub lineup: TeamLineup,
}

/// One fixture's raw snapshot after lenient decoding: every category's
/// surviving records, in wire order. Missing categories are empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchActionsSnapshot {
    pub goals: Vec<RawGoal>,
    pub yellow_cards: Vec<RawCard>,
    pub second_yellow_cards: Vec<RawCard>,
    pub straight_red_cards: Vec<RawCard>,
    pub substitutions: Vec<RawSubstitution>,
    pub shots_on_target: Vec<RawShotOnTarget>,
    pub shots_off_target: Vec<RawPlayerAction>,
    pub blocked_shots: Vec<RawPlayerAction>,
    pub shots_off_woodwork: Vec<RawPlayerAction>,
    pub corners: Vec<RawCorner>,
    pub penalties: Vec<RawPenalty>,
    pub var_state_changes: Vec<RawVarStateChange>,
    pub phase_changes: Vec<RawPhaseChange>,
    pub danger_state_changes: Vec<RawDangerStateChange>,
    pub booking_state_changes: Vec<RawBookingStateChange>,
    pub system_messages: Vec<RawSystemMessage>,
    pub throw_ins: Vec<RawThrowIn>,
    pub fouls: Vec<RawFoul>,
    pub goal_kicks: Vec<RawPlayerAction>,
    pub offsides: Vec<RawPlayerAction>,
    pub kick_offs: Vec<RawPlayerAction>,
    pub stoppage_time_announcements: Vec<RawStoppageTimeAnnouncement>,
    pub lineup_updates: Vec<RawLineupUpdate>,
}
