//! Per-category normalization into canonical events
//!
//! One pure mapping function per raw action category, dispatched from
//! a static table so adding a category is a new row, not a new code
//! path. Handlers tolerate empty input, resolve player references
//! through the lineup cache (unresolved → `None`), and never fail a
//! batch over a single record.

use tracing::debug;
use types::event::{EventDetails, MatchEvent};
use types::ids::EventId;
use types::raw::MatchActionsSnapshot;
use types::states::SystemMessageKind;
use types::team::Team;

use crate::display::kickoff_description;
use crate::enrich;
use crate::lineup::LineupCache;

/// Read-only context shared by all category handlers. Cross-category
/// lookups (throw-in danger lookahead, booking lookback) go through
/// the snapshot the handlers already receive.
pub struct NormalizeContext<'a> {
    pub lineups: &'a LineupCache,
}

type CategoryHandler = fn(&MatchActionsSnapshot, &NormalizeContext) -> Vec<MatchEvent>;

/// Category dispatch table. The label is used for logging only; wire
/// names live in the ingest layer.
pub const CATEGORY_HANDLERS: &[(&str, CategoryHandler)] = &[
    ("goals", map_goals),
    ("yellowCards", map_yellow_cards),
    ("secondYellowCards", map_second_yellow_cards),
    ("straightRedCards", map_straight_red_cards),
    ("substitutions", map_substitutions),
    ("shotsOnTarget", map_shots_on_target),
    ("shotsOffTarget", map_shots_off_target),
    ("blockedShots", map_blocked_shots),
    ("shotsOffWoodwork", map_shots_off_woodwork),
    ("corners", map_corners),
    ("penalties", map_penalties),
    ("varStateChanges", map_var_state_changes),
    ("phaseChanges", map_phase_changes),
    ("dangerStateChanges", map_danger_states),
    ("bookingStateChanges", map_booking_states),
    ("systemMessages", map_system_messages),
    ("throwIns", map_throw_ins),
    ("fouls", map_fouls),
    ("goalKicks", map_goal_kicks),
    ("offsides", map_offsides),
    ("kickOffs", map_kick_offs),
    ("stoppageTimeAnnouncements", map_stoppage_time),
];

/// Normalize every category of one snapshot into canonical events.
/// Output order is unspecified; the ordering engine sorts it.
pub fn normalize_snapshot(
    snapshot: &MatchActionsSnapshot,
    ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for (category, handler) in CATEGORY_HANDLERS {
        let mapped = handler(snapshot, ctx);
        if !mapped.is_empty() {
            debug!(category, count = mapped.len(), "Category normalized");
        }
        events.extend(mapped);
    }
    events
}

fn map_goals(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .goals
        .iter()
        .map(|goal| MatchEvent {
            id: EventId::new(goal.id),
            timestamp: goal.timestamp_utc.clone(),
            phase: goal.phase,
            time_elapsed: goal.time_elapsed_in_phase.clone(),
            team: goal.team,
            details: EventDetails::Goal {
                is_own_goal: goal.is_own_goal,
                was_penalty: goal.was_scored_from_penalty,
                scored_by: ctx
                    .lineups
                    .resolve_ref(goal.scored_by_internal_id.as_ref(), goal.team),
                assist_by: ctx
                    .lineups
                    .resolve_ref(goal.assist_by_internal_id.as_ref(), goal.team),
            },
        })
        .collect()
}

fn map_yellow_cards(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    map_cards(&snapshot.yellow_cards, ctx, |player| EventDetails::YellowCard { player })
}

fn map_second_yellow_cards(
    snapshot: &MatchActionsSnapshot,
    ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    map_cards(&snapshot.second_yellow_cards, ctx, |player| {
        EventDetails::SecondYellow { player }
    })
}

fn map_straight_red_cards(
    snapshot: &MatchActionsSnapshot,
    ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    map_cards(&snapshot.straight_red_cards, ctx, |player| EventDetails::RedCard { player })
}

/// All three card categories share one raw shape; only the payload
/// constructor differs.
fn map_cards(
    cards: &[types::raw::RawCard],
    ctx: &NormalizeContext,
    details: fn(Option<types::player::Player>) -> EventDetails,
) -> Vec<MatchEvent> {
    cards
        .iter()
        .map(|card| MatchEvent {
            id: EventId::new(card.id),
            timestamp: card.timestamp_utc.clone(),
            phase: card.phase,
            time_elapsed: card.time_elapsed_in_phase.clone(),
            team: card.team,
            details: details(
                ctx.lineups
                    .resolve_ref(card.player_internal_id.as_ref(), card.team),
            ),
        })
        .collect()
}

fn map_substitutions(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .substitutions
        .iter()
        .map(|sub| MatchEvent {
            id: EventId::new(sub.id),
            timestamp: sub.timestamp_utc.clone(),
            phase: sub.phase,
            time_elapsed: sub.time_elapsed_in_phase.clone(),
            team: sub.team,
            details: EventDetails::Substitution {
                player_on: ctx
                    .lineups
                    .resolve_ref(sub.player_on_internal_id.as_ref(), sub.team),
                player_off: ctx
                    .lineups
                    .resolve_ref(sub.player_off_internal_id.as_ref(), sub.team),
            },
        })
        .collect()
}

fn map_shots_on_target(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .shots_on_target
        .iter()
        .map(|shot| MatchEvent {
            id: EventId::new(shot.id),
            timestamp: shot.timestamp_utc.clone(),
            phase: shot.phase,
            time_elapsed: shot.time_elapsed_in_phase.clone(),
            team: shot.team,
            details: EventDetails::ShotOnTarget {
                player: ctx
                    .lineups
                    .resolve_ref(shot.player_internal_id.as_ref(), shot.team),
                // The save belongs to the defending side's keeper
                saved_by: ctx
                    .lineups
                    .resolve_ref(shot.saved_by_internal_id.as_ref(), shot.team.opponent()),
            },
        })
        .collect()
}

fn map_shots_off_target(
    snapshot: &MatchActionsSnapshot,
    ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    map_player_actions(&snapshot.shots_off_target, ctx, |player| {
        EventDetails::ShotOffTarget { player }
    })
}

fn map_blocked_shots(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    map_player_actions(&snapshot.blocked_shots, ctx, |player| EventDetails::ShotBlocked {
        player,
    })
}

fn map_shots_off_woodwork(
    snapshot: &MatchActionsSnapshot,
    ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    map_player_actions(&snapshot.shots_off_woodwork, ctx, |player| {
        EventDetails::ShotOffWoodwork { player }
    })
}

fn map_goal_kicks(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    map_player_actions(&snapshot.goal_kicks, ctx, |player| EventDetails::GoalKick { player })
}

fn map_offsides(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    map_player_actions(&snapshot.offsides, ctx, |player| EventDetails::Offside { player })
}

fn map_player_actions(
    actions: &[types::raw::RawPlayerAction],
    ctx: &NormalizeContext,
    details: fn(Option<types::player::Player>) -> EventDetails,
) -> Vec<MatchEvent> {
    actions
        .iter()
        .map(|action| MatchEvent {
            id: EventId::new(action.id),
            timestamp: action.timestamp_utc.clone(),
            phase: action.phase,
            time_elapsed: action.time_elapsed_in_phase.clone(),
            team: action.team,
            details: details(
                ctx.lineups
                    .resolve_ref(action.player_internal_id.as_ref(), action.team),
            ),
        })
        .collect()
}

/// A raw corner encodes an `awarded` and a `taken` sub-state, each an
/// independent temporal event. A sub-state becomes a canonical event
/// only when its own confirmation flag is set; derived ids move both
/// out of the raw corner id space.
fn map_corners(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for corner in &snapshot.corners {
        if let Some(awarded) = corner.awarded.as_ref().filter(|sub| sub.is_confirmed) {
            events.push(MatchEvent {
                id: EventId::corner_awarded(corner.id),
                timestamp: awarded.timestamp_utc.clone(),
                phase: corner.phase,
                time_elapsed: awarded.time_elapsed_in_phase.clone(),
                team: corner.team,
                details: EventDetails::CornerAwarded,
            });
        }
        if let Some(taken) = corner.taken.as_ref().filter(|sub| sub.is_confirmed) {
            events.push(MatchEvent {
                id: EventId::corner_taken(corner.id),
                timestamp: taken.timestamp_utc.clone(),
                phase: corner.phase,
                time_elapsed: taken.time_elapsed_in_phase.clone(),
                team: corner.team,
                details: EventDetails::CornerTaken,
            });
        }
    }
    events
}

fn map_penalties(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .penalties
        .iter()
        .map(|penalty| MatchEvent {
            id: EventId::new(penalty.id),
            timestamp: penalty.timestamp_utc.clone(),
            phase: penalty.phase,
            time_elapsed: penalty.time_elapsed_in_phase.clone(),
            team: penalty.team,
            details: EventDetails::Penalty {
                outcome: penalty
                    .penalty_outcome
                    .as_ref()
                    .and_then(|o| o.outcome.clone()),
                is_confirmed: penalty
                    .penalty_outcome
                    .as_ref()
                    .is_some_and(|o| o.is_confirmed),
            },
        })
        .collect()
}

/// The `V2` reason/outcome fields take priority over the legacy ones.
fn map_var_state_changes(
    snapshot: &MatchActionsSnapshot,
    _ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    snapshot
        .var_state_changes
        .iter()
        .map(|var| MatchEvent {
            id: EventId::new(var.id),
            timestamp: var.timestamp_utc.clone(),
            phase: var.phase,
            time_elapsed: var.time_elapsed_in_phase.clone(),
            team: var.team.unwrap_or(Team::System),
            details: EventDetails::Var {
                state: var.var_state.clone(),
                reason: var.var_reason_v2.clone().or_else(|| var.var_reason.clone()),
                outcome: var
                    .var_outcome_v2
                    .clone()
                    .or_else(|| var.var_outcome.clone()),
            },
        })
        .collect()
}

fn map_phase_changes(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .phase_changes
        .iter()
        .map(|change| MatchEvent {
            id: EventId::new(change.id),
            timestamp: change.timestamp_utc.clone(),
            phase: change.current_phase,
            time_elapsed: "00:00".to_string(),
            team: Team::System,
            details: EventDetails::PhaseChange {
                previous_phase: change.previous_phase,
                current_phase: change.current_phase,
                start_time: change.current_phase_start_time.clone(),
                phase_title: types::phase::MatchPhase::transition_title(
                    change.previous_phase,
                    change.current_phase,
                ),
            },
        })
        .collect()
}

/// Danger states arrive team-prefixed; the prefix becomes the event's
/// team. Break-phase records are feed noise and corner-flavored states
/// are superseded by the dedicated corner category; both are skipped.
fn map_danger_states(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    let mut events = Vec::new();
    for danger in &snapshot.danger_state_changes {
        if danger.phase.is_break() {
            continue;
        }
        let Some((team, state)) = enrich::split_danger_state(&danger.danger_state) else {
            continue;
        };
        if state.is_corner_flavored() {
            continue;
        }
        events.push(MatchEvent {
            id: EventId::new(danger.id),
            timestamp: danger.timestamp_utc.clone(),
            phase: danger.phase,
            time_elapsed: danger.time_elapsed_in_phase.clone(),
            team,
            details: EventDetails::DangerState {
                danger_state: state,
                is_confirmed: danger.is_confirmed,
            },
        });
    }
    events
}

fn map_booking_states(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .booking_state_changes
        .iter()
        .map(|booking| MatchEvent {
            id: EventId::new(booking.id),
            timestamp: booking.timestamp_utc.clone(),
            phase: booking.phase,
            time_elapsed: booking.time_elapsed_in_phase.clone(),
            team: booking.team,
            details: EventDetails::BookingState {
                booking_state: booking.booking_state,
                previous_state: enrich::previous_booking_state(
                    &snapshot.booking_state_changes,
                    booking,
                ),
                is_confirmed: booking.is_confirmed,
            },
        })
        .collect()
}

/// "Standby" heartbeats are provider keep-alives, not feed content.
fn map_system_messages(
    snapshot: &MatchActionsSnapshot,
    _ctx: &NormalizeContext,
) -> Vec<MatchEvent> {
    snapshot
        .system_messages
        .iter()
        .filter(|msg| msg.message != "Standby")
        .map(|msg| MatchEvent {
            id: EventId::new(msg.id),
            timestamp: msg.timestamp_utc.clone(),
            phase: msg.phase,
            time_elapsed: msg.time_elapsed_in_phase.clone(),
            team: Team::System,
            details: EventDetails::SystemMessage {
                message: msg.message.clone(),
                message_id: msg.message_id,
                message_type: SystemMessageKind::from_message_id(msg.message_id),
            },
        })
        .collect()
}

fn map_throw_ins(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .throw_ins
        .iter()
        .map(|throw_in| MatchEvent {
            id: EventId::new(throw_in.id),
            timestamp: throw_in.timestamp_utc.clone(),
            phase: throw_in.phase,
            time_elapsed: throw_in.time_elapsed_in_phase.clone(),
            team: throw_in.team,
            details: EventDetails::ThrowIn {
                player: ctx
                    .lineups
                    .resolve_ref(throw_in.player_internal_id.as_ref(), throw_in.team),
                is_confirmed: throw_in.is_confirmed,
                throw_in_state: enrich::classify_throw_in(
                    &snapshot.danger_state_changes,
                    throw_in,
                ),
            },
        })
        .collect()
}

/// The canonical team is the beneficiary: downstream display groups
/// events by the side they favor, and a foul favors the fouled team.
fn map_fouls(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .fouls
        .iter()
        .map(|foul| {
            let beneficiary = foul.fouling_team.opponent();
            MatchEvent {
                id: EventId::foul(foul.id),
                timestamp: foul.timestamp_utc.clone(),
                phase: foul.phase,
                time_elapsed: foul.time_elapsed_in_phase.clone(),
                team: beneficiary,
                details: EventDetails::Foul {
                    fouling_team: foul.fouling_team,
                    fouled_player: ctx
                        .lineups
                        .resolve_ref(foul.fouled_player_internal_id.as_ref(), beneficiary),
                },
            }
        })
        .collect()
}

fn map_kick_offs(snapshot: &MatchActionsSnapshot, ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .kick_offs
        .iter()
        .map(|kick_off| MatchEvent {
            id: EventId::new(kick_off.id),
            timestamp: kick_off.timestamp_utc.clone(),
            phase: kick_off.phase,
            time_elapsed: kick_off.time_elapsed_in_phase.clone(),
            team: kick_off.team,
            details: EventDetails::KickOff {
                player: ctx
                    .lineups
                    .resolve_ref(kick_off.player_internal_id.as_ref(), kick_off.team),
                description: kickoff_description(kick_off.team, kick_off.phase),
            },
        })
        .collect()
}

fn map_stoppage_time(snapshot: &MatchActionsSnapshot, _ctx: &NormalizeContext) -> Vec<MatchEvent> {
    snapshot
        .stoppage_time_announcements
        .iter()
        .map(|announcement| MatchEvent {
            id: EventId::new(announcement.id),
            timestamp: announcement.timestamp_utc.clone(),
            phase: announcement.phase,
            time_elapsed: announcement.time_elapsed_in_phase.clone(),
            team: Team::System,
            details: EventDetails::StoppageTime {
                added_minutes: announcement.added_minutes,
                is_confirmed: announcement.is_confirmed,
            },
        })
        .collect()
}
