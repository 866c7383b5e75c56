//! Cross-category enrichment
//!
//! Derivations that need to look at other records in the same or a
//! sibling category. All lookups run against the already-decoded
//! snapshot passed in explicitly; there is no hidden state.

use types::phase::MatchPhase;
use types::raw::{RawBookingStateChange, RawDangerStateChange, RawThrowIn};
use types::states::{BookingState, ThrowInState};
use types::team::Team;

/// Classify a throw-in by the danger state that follows it: the next
/// danger-state record (by sequence id) for the same team at the same
/// phase-relative elapsed time.
///
/// No matching danger state means `None`; absence is distinct from a
/// confirmed `Safe`.
pub fn classify_throw_in(
    dangers: &[RawDangerStateChange],
    throw_in: &RawThrowIn,
) -> Option<ThrowInState> {
    let prefix = throw_in.team.label();

    let next = dangers.iter().find(|danger| {
        danger.sequence_id > throw_in.sequence_id
            && danger.time_elapsed_in_phase == throw_in.time_elapsed_in_phase
            && danger.danger_state.starts_with(prefix)
    })?;

    let rest = next
        .danger_state
        .strip_prefix(prefix)
        .unwrap_or(&next.danger_state);

    if rest.contains("DangerousAttack") {
        Some(ThrowInState::Dangerous)
    } else if rest.contains("Attack") && !rest.contains("FreeKick") {
        Some(ThrowInState::Attack)
    } else {
        Some(ThrowInState::Safe)
    }
}

/// Most recent prior booking state (by sequence id) for the same team
/// that was not `Safe`, for risk-escalation display.
pub fn previous_booking_state(
    bookings: &[RawBookingStateChange],
    current: &RawBookingStateChange,
) -> Option<BookingState> {
    bookings
        .iter()
        .filter(|prior| {
            prior.sequence_id < current.sequence_id
                && prior.team == current.team
                && prior.booking_state != BookingState::Safe
        })
        .max_by_key(|prior| prior.sequence_id)
        .map(|prior| prior.booking_state)
}

/// Convert a phase-relative `hh:mm:ss` (or `mm:ss`) clock into an
/// absolute match-minute string, adding the phase offset (45 minutes
/// for the second half). Seconds stay zero-padded to two digits.
///
/// Unparseable input passes through unchanged.
pub fn normalize_elapsed(phase: MatchPhase, elapsed: &str) -> String {
    let parts: Vec<&str> = elapsed.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (h.parse::<u32>(), m.parse::<u32>(), s.parse::<u32>()),
        [m, s] => (Ok(0), m.parse::<u32>(), s.parse::<u32>()),
        _ => return elapsed.to_string(),
    };

    match (hours, minutes, seconds) {
        (Ok(h), Ok(m), Ok(s)) => {
            let absolute_minutes = h * 60 + m + phase.minute_offset();
            format!("{}:{:02}", absolute_minutes, s)
        }
        _ => elapsed.to_string(),
    }
}

/// Split a team-prefixed danger-state string into its team and the
/// parsed residual state. `None` for unprefixed or unknown residues.
pub fn split_danger_state(raw: &str) -> Option<(Team, types::states::DangerState)> {
    let (team, rest) = Team::split_prefixed(raw)?;
    let state = types::states::DangerState::parse(rest)?;
    Some((team, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn danger(sequence_id: i64, elapsed: &str, state: &str) -> RawDangerStateChange {
        RawDangerStateChange {
            id: sequence_id,
            sequence_id,
            timestamp_utc: "2025-03-01T20:30:00.000Z".to_string(),
            phase: MatchPhase::FirstHalf,
            time_elapsed_in_phase: elapsed.to_string(),
            danger_state: state.to_string(),
            is_confirmed: true,
        }
    }

    fn throw_in(sequence_id: i64, elapsed: &str, team: Team) -> RawThrowIn {
        RawThrowIn {
            id: sequence_id,
            sequence_id,
            timestamp_utc: "2025-03-01T20:30:00.000Z".to_string(),
            phase: MatchPhase::FirstHalf,
            time_elapsed_in_phase: elapsed.to_string(),
            team,
            player_internal_id: None,
            is_confirmed: true,
        }
    }

    #[test]
    fn test_throw_in_dangerous() {
        let dangers = vec![danger(10, "00:30:00", "HomeDangerousAttack")];
        let t = throw_in(5, "00:30:00", Team::Home);
        assert_eq!(classify_throw_in(&dangers, &t), Some(ThrowInState::Dangerous));
    }

    #[test]
    fn test_throw_in_attack_excludes_free_kicks() {
        let dangers = vec![danger(10, "00:30:00", "HomeAttackingFreeKick")];
        let t = throw_in(5, "00:30:00", Team::Home);
        // A free kick is not an open-play attack
        assert_eq!(classify_throw_in(&dangers, &t), Some(ThrowInState::Safe));

        let dangers = vec![danger(10, "00:30:00", "HomeAttack")];
        assert_eq!(classify_throw_in(&dangers, &t), Some(ThrowInState::Attack));
    }

    #[test]
    fn test_throw_in_no_match_is_none() {
        let t = throw_in(5, "00:30:00", Team::Home);
        assert_eq!(classify_throw_in(&[], &t), None);

        // Wrong team
        let dangers = vec![danger(10, "00:30:00", "AwayDangerousAttack")];
        assert_eq!(classify_throw_in(&dangers, &t), None);

        // Earlier sequence id
        let dangers = vec![danger(3, "00:30:00", "HomeDangerousAttack")];
        assert_eq!(classify_throw_in(&dangers, &t), None);

        // Different elapsed time
        let dangers = vec![danger(10, "00:31:00", "HomeDangerousAttack")];
        assert_eq!(classify_throw_in(&dangers, &t), None);
    }

    fn booking(sequence_id: i64, team: Team, state: BookingState) -> RawBookingStateChange {
        RawBookingStateChange {
            id: sequence_id,
            sequence_id,
            timestamp_utc: "2025-03-01T20:30:00.000Z".to_string(),
            phase: MatchPhase::FirstHalf,
            time_elapsed_in_phase: "00:30:00".to_string(),
            team,
            booking_state: state,
            is_confirmed: true,
        }
    }

    #[test]
    fn test_previous_booking_picks_most_recent_non_safe() {
        let history = vec![
            booking(1, Team::Home, BookingState::YellowCardDanger),
            booking(2, Team::Home, BookingState::Safe),
            booking(3, Team::Home, BookingState::RedCardDanger),
            booking(4, Team::Away, BookingState::YellowCardDanger),
        ];
        let current = booking(5, Team::Home, BookingState::YellowCardDanger);
        assert_eq!(
            previous_booking_state(&history, &current),
            Some(BookingState::RedCardDanger)
        );
    }

    #[test]
    fn test_previous_booking_absent_is_none() {
        let history = vec![booking(1, Team::Home, BookingState::Safe)];
        let current = booking(2, Team::Home, BookingState::YellowCardDanger);
        assert_eq!(previous_booking_state(&history, &current), None);
    }

    #[test]
    fn test_elapsed_second_half_offset() {
        assert_eq!(normalize_elapsed(MatchPhase::SecondHalf, "00:03:27"), "48:27");
        assert_eq!(normalize_elapsed(MatchPhase::FirstHalf, "00:12:05"), "12:05");
    }

    #[test]
    fn test_elapsed_short_form_and_garbage() {
        assert_eq!(normalize_elapsed(MatchPhase::SecondHalf, "12:05"), "57:05");
        assert_eq!(normalize_elapsed(MatchPhase::FirstHalf, "nonsense"), "nonsense");
    }

    #[test]
    fn test_split_danger_state() {
        use types::states::DangerState;
        assert_eq!(
            split_danger_state("AwayDangerousAttack"),
            Some((Team::Away, DangerState::DangerousAttack))
        );
        assert_eq!(split_danger_state("Safe"), None);
        assert_eq!(split_danger_state("HomeUnknownThing"), None);
    }
}
