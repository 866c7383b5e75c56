//! Match phase enum and elapsed-clock offsets
//!
//! The feed reports elapsed time relative to the current phase; the
//! absolute match-minute clock adds the phase offset (45 minutes for
//! the second half).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named segment of match time.
///
/// The provider spells full time `FullTimeNormalTime` on the wire;
/// the alias keeps older payloads decodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    #[serde(alias = "FullTimeNormalTime")]
    FullTime,
    PostMatch,
}

impl MatchPhase {
    /// Minutes already played when this phase starts; added to the
    /// phase-relative clock to produce the absolute match minute.
    pub fn minute_offset(&self) -> u32 {
        match self {
            MatchPhase::SecondHalf => 45,
            MatchPhase::FullTime | MatchPhase::PostMatch => 90,
            _ => 0,
        }
    }

    /// Whether play is stopped in this phase. Danger states reported
    /// during breaks are feed noise and are skipped by the normalizer.
    pub fn is_break(&self) -> bool {
        matches!(
            self,
            MatchPhase::PreMatch | MatchPhase::HalfTime | MatchPhase::FullTime | MatchPhase::PostMatch
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MatchPhase::PreMatch => "Pre Match",
            MatchPhase::FirstHalf => "First Half",
            MatchPhase::HalfTime => "Half Time",
            MatchPhase::SecondHalf => "Second Half",
            MatchPhase::FullTime => "Full Time",
            MatchPhase::PostMatch => "Post Match",
        }
    }

    /// Title shown for a phase-change event, derived from the
    /// previous→current pair so half completions read as completions.
    pub fn transition_title(previous: Option<MatchPhase>, current: MatchPhase) -> String {
        match (previous, current) {
            (Some(MatchPhase::FirstHalf), MatchPhase::HalfTime) => "1st Half Complete".to_string(),
            (Some(MatchPhase::SecondHalf), MatchPhase::FullTime) => "2nd Half Complete".to_string(),
            (_, MatchPhase::FirstHalf) => "1st Half Started".to_string(),
            (_, MatchPhase::HalfTime) => "1st Half Complete".to_string(),
            (_, MatchPhase::SecondHalf) => "2nd Half Started".to_string(),
            (_, MatchPhase::FullTime) => "2nd Half Complete".to_string(),
            (_, other) => format!("{} Started", other.display_name()),
        }
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_offset() {
        assert_eq!(MatchPhase::FirstHalf.minute_offset(), 0);
        assert_eq!(MatchPhase::SecondHalf.minute_offset(), 45);
    }

    #[test]
    fn test_full_time_wire_alias() {
        let phase: MatchPhase = serde_json::from_str("\"FullTimeNormalTime\"").unwrap();
        assert_eq!(phase, MatchPhase::FullTime);
        let phase: MatchPhase = serde_json::from_str("\"FullTime\"").unwrap();
        assert_eq!(phase, MatchPhase::FullTime);
    }

    #[test]
    fn test_transition_titles() {
        assert_eq!(
            MatchPhase::transition_title(Some(MatchPhase::FirstHalf), MatchPhase::HalfTime),
            "1st Half Complete"
        );
        assert_eq!(
            MatchPhase::transition_title(Some(MatchPhase::HalfTime), MatchPhase::SecondHalf),
            "2nd Half Started"
        );
        assert_eq!(
            MatchPhase::transition_title(None, MatchPhase::FirstHalf),
            "1st Half Started"
        );
    }

    #[test]
    fn test_break_phases() {
        assert!(MatchPhase::HalfTime.is_break());
        assert!(MatchPhase::FullTime.is_break());
        assert!(!MatchPhase::SecondHalf.is_break());
    }
}
