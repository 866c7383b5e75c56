//! Team-scoped state enums: danger, throw-in, booking, VAR
//!
//! Danger states arrive team-prefixed (`"HomeDangerousAttack"`); the
//! enum here is the residue after the prefix is stripped. Parsing is
//! tolerant: unknown residues map to `None` rather than failing the
//! batch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical indicator of match threat level, team-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DangerState {
    Safe,
    Attack,
    DangerousAttack,
    FreeKick,
    AttackingFreeKick,
    DangerousFreeKick,
    Penalty,
    Corner,
    CornerDanger,
}

impl DangerState {
    /// Parse the residue of a prefix-stripped danger-state string.
    pub fn parse(s: &str) -> Option<DangerState> {
        match s {
            "Safe" => Some(DangerState::Safe),
            "Attack" => Some(DangerState::Attack),
            "DangerousAttack" => Some(DangerState::DangerousAttack),
            "FreeKick" => Some(DangerState::FreeKick),
            "AttackingFreeKick" => Some(DangerState::AttackingFreeKick),
            "DangerousFreeKick" => Some(DangerState::DangerousFreeKick),
            "Penalty" => Some(DangerState::Penalty),
            "Corner" => Some(DangerState::Corner),
            "CornerDanger" => Some(DangerState::CornerDanger),
            _ => None,
        }
    }

    /// Corner-flavored danger states are superseded by the dedicated
    /// corner category and excluded from the normalized feed.
    pub fn is_corner_flavored(&self) -> bool {
        matches!(self, DangerState::Corner | DangerState::CornerDanger)
    }

    pub fn is_free_kick(&self) -> bool {
        matches!(
            self,
            DangerState::FreeKick | DangerState::AttackingFreeKick | DangerState::DangerousFreeKick
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DangerState::Safe => "Normal Play",
            DangerState::Attack => "Attack",
            DangerState::DangerousAttack => "Dangerous Attack",
            DangerState::FreeKick => "Free Kick",
            DangerState::AttackingFreeKick => "Attacking Free Kick",
            DangerState::DangerousFreeKick => "Dangerous Free Kick",
            DangerState::Penalty => "Penalty",
            DangerState::Corner => "Corner",
            DangerState::CornerDanger => "Corner Danger",
        }
    }
}

impl fmt::Display for DangerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Derived classification of a throw-in by the danger state that
/// follows it. Absence of a matching danger state is `None` on the
/// event, distinct from a confirmed `Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowInState {
    Safe,
    Attack,
    Dangerous,
}

/// Card-risk indicator for a team, with escalation tracked against the
/// most recent non-`Safe` booking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingState {
    Safe,
    YellowCardDanger,
    RedCardDanger,
}

impl BookingState {
    pub fn display_name(&self) -> &'static str {
        match self {
            BookingState::Safe => "Card Risk Ended",
            BookingState::YellowCardDanger => "Yellow Card Risk",
            BookingState::RedCardDanger => "Red Card Risk",
        }
    }
}

/// VAR review lifecycle: a review opens in `Danger`, moves to
/// `InProgress`, and resolves to `Safe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarState {
    Danger,
    InProgress,
    Safe,
}

impl VarState {
    pub fn parse(s: &str) -> Option<VarState> {
        match s {
            "Danger" => Some(VarState::Danger),
            "InProgress" => Some(VarState::InProgress),
            "Safe" => Some(VarState::Safe),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VarState::Danger => "VAR Check",
            VarState::InProgress => "VAR in Progress",
            VarState::Safe => "VAR Complete",
        }
    }
}

/// Severity bucket of a system message, derived from its message id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemMessageKind {
    Info,
    Warning,
    Error,
    Success,
}

impl SystemMessageKind {
    /// Message-id ranges: 1000–1999 warnings, 2000–2999 game-state
    /// info, 3000+ errors. Anything else defaults to info.
    pub fn from_message_id(message_id: i64) -> SystemMessageKind {
        if (2000..3000).contains(&message_id) {
            SystemMessageKind::Info
        } else if (1000..2000).contains(&message_id) {
            SystemMessageKind::Warning
        } else if message_id >= 3000 {
            SystemMessageKind::Error
        } else {
            SystemMessageKind::Info
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_state_parse() {
        assert_eq!(DangerState::parse("DangerousAttack"), Some(DangerState::DangerousAttack));
        assert_eq!(DangerState::parse("Corner"), Some(DangerState::Corner));
        assert_eq!(DangerState::parse("SomethingNew"), None);
    }

    #[test]
    fn test_corner_flavored() {
        assert!(DangerState::Corner.is_corner_flavored());
        assert!(DangerState::CornerDanger.is_corner_flavored());
        assert!(!DangerState::DangerousAttack.is_corner_flavored());
    }

    #[test]
    fn test_free_kick_variants() {
        assert!(DangerState::FreeKick.is_free_kick());
        assert!(DangerState::DangerousFreeKick.is_free_kick());
        assert!(!DangerState::Attack.is_free_kick());
    }

    #[test]
    fn test_system_message_kind_ranges() {
        assert_eq!(SystemMessageKind::from_message_id(1042), SystemMessageKind::Warning);
        assert_eq!(SystemMessageKind::from_message_id(2500), SystemMessageKind::Info);
        assert_eq!(SystemMessageKind::from_message_id(3001), SystemMessageKind::Error);
        assert_eq!(SystemMessageKind::from_message_id(17), SystemMessageKind::Info);
    }

    #[test]
    fn test_var_state_parse() {
        assert_eq!(VarState::parse("InProgress"), Some(VarState::InProgress));
        assert_eq!(VarState::parse("NotSet"), None);
    }
}
