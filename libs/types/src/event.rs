//! Canonical `MatchEvent` model
//!
//! Every raw action category converges into this one type-tagged
//! representation. Events are immutable once produced: each raw
//! snapshot yields a fresh batch and the consumer merges by id.

use serde::{Deserialize, Serialize};

use crate::ids::EventId;
use crate::phase::MatchPhase;
use crate::player::Player;
use crate::states::{BookingState, DangerState, SystemMessageKind, ThrowInState};
use crate::team::Team;

/// One normalized, enriched event in the live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    /// Unique within the source category (some categories are offset,
    /// see `ids`).
    pub id: EventId,
    /// ISO-8601 UTC timestamp; the primary ordering key, compared
    /// lexicographically.
    pub timestamp: String,
    pub phase: MatchPhase,
    /// Phase-relative elapsed clock as received (`mm:ss` or `hh:mm:ss`).
    pub time_elapsed: String,
    pub team: Team,
    pub details: EventDetails,
}

/// Type-tagged payload, one variant per action category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EventDetails {
    Goal {
        is_own_goal: bool,
        was_penalty: bool,
        scored_by: Option<Player>,
        assist_by: Option<Player>,
    },
    YellowCard {
        player: Option<Player>,
    },
    SecondYellow {
        player: Option<Player>,
    },
    RedCard {
        player: Option<Player>,
    },
    Substitution {
        player_on: Option<Player>,
        player_off: Option<Player>,
    },
    ShotOnTarget {
        player: Option<Player>,
        saved_by: Option<Player>,
    },
    ShotOffTarget {
        player: Option<Player>,
    },
    ShotBlocked {
        player: Option<Player>,
    },
    ShotOffWoodwork {
        player: Option<Player>,
    },
    CornerAwarded,
    CornerTaken,
    Penalty {
        outcome: Option<String>,
        is_confirmed: bool,
    },
    Var {
        /// Raw state string; humanization lives in the pipeline's
        /// display layer so unknown states degrade gracefully.
        state: String,
        reason: Option<String>,
        outcome: Option<String>,
    },
    PhaseChange {
        previous_phase: Option<MatchPhase>,
        current_phase: MatchPhase,
        start_time: Option<String>,
        phase_title: String,
    },
    DangerState {
        danger_state: DangerState,
        is_confirmed: bool,
    },
    Foul {
        /// The side that committed the foul; the event's `team` field
        /// carries the beneficiary.
        fouling_team: Team,
        fouled_player: Option<Player>,
    },
    BookingState {
        booking_state: BookingState,
        previous_state: Option<BookingState>,
        is_confirmed: bool,
    },
    SystemMessage {
        message: String,
        message_id: i64,
        message_type: SystemMessageKind,
    },
    GoalKick {
        player: Option<Player>,
    },
    Offside {
        player: Option<Player>,
    },
    KickOff {
        player: Option<Player>,
        description: String,
    },
    ThrowIn {
        player: Option<Player>,
        is_confirmed: bool,
        /// `None` when no danger state followed the throw-in; distinct
        /// from a confirmed `Safe`.
        throw_in_state: Option<ThrowInState>,
    },
    StoppageTime {
        added_minutes: u32,
        is_confirmed: bool,
    },
}

impl MatchEvent {
    /// Event type as a string label, for logging and wire tagging.
    pub fn event_type_label(&self) -> &'static str {
        match &self.details {
            EventDetails::Goal { .. } => "goal",
            EventDetails::YellowCard { .. } => "yellowCard",
            EventDetails::SecondYellow { .. } => "secondYellow",
            EventDetails::RedCard { .. } => "redCard",
            EventDetails::Substitution { .. } => "substitution",
            EventDetails::ShotOnTarget { .. } => "shotOnTarget",
            EventDetails::ShotOffTarget { .. } => "shotOffTarget",
            EventDetails::ShotBlocked { .. } => "shotBlocked",
            EventDetails::ShotOffWoodwork { .. } => "shotOffWoodwork",
            EventDetails::CornerAwarded => "cornerAwarded",
            EventDetails::CornerTaken => "cornerTaken",
            EventDetails::Penalty { .. } => "penalty",
            EventDetails::Var { .. } => "var",
            EventDetails::PhaseChange { .. } => "phaseChange",
            EventDetails::DangerState { .. } => "dangerState",
            EventDetails::Foul { .. } => "foul",
            EventDetails::BookingState { .. } => "bookingState",
            EventDetails::SystemMessage { .. } => "systemMessage",
            EventDetails::GoalKick { .. } => "goalKick",
            EventDetails::Offside { .. } => "offsides",
            EventDetails::KickOff { .. } => "kickOff",
            EventDetails::ThrowIn { .. } => "throwIn",
            EventDetails::StoppageTime { .. } => "stoppageTime",
        }
    }

    pub fn is_foul(&self) -> bool {
        matches!(self.details, EventDetails::Foul { .. })
    }

    /// Danger-state events, including their free-kick flavors. Fouls
    /// sharing a timestamp with one of these sort after it (the free
    /// kick precedes the foul that caused it).
    pub fn is_danger_state(&self) -> bool {
        matches!(self.details, EventDetails::DangerState { .. })
    }
}
