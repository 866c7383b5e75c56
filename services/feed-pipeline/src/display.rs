//! Humanized display values
//!
//! Maps raw provider strings (VAR reasons, danger states, phases) to
//! display text. Unknown values degrade to generic placeholders so a
//! new provider string never breaks the feed.

use types::event::MatchEvent;
use types::phase::MatchPhase;
use types::states::{DangerState, VarState};
use types::team::Team;

use crate::enrich::normalize_elapsed;

/// Display color bucket for a VAR review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarColor {
    Danger,
    InProgress,
    Safe,
    Neutral,
}

/// Humanized VAR review: title/reason/outcome plus a color bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDisplay {
    pub title: String,
    pub reason: String,
    pub outcome: String,
    pub color: VarColor,
}

/// Humanize a raw VAR state/reason/outcome triple.
///
/// Unknown or `NotSet` values degrade to the generic "VAR Check" /
/// "Checking…" placeholders rather than failing.
pub fn humanize_var(state: &str, reason: Option<&str>, outcome: Option<&str>) -> VarDisplay {
    let parsed = VarState::parse(state);
    let title = parsed
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| "VAR Check".to_string());

    let color = match parsed {
        Some(VarState::Danger) => VarColor::Danger,
        Some(VarState::InProgress) => VarColor::InProgress,
        Some(VarState::Safe) => VarColor::Safe,
        None => VarColor::Neutral,
    };

    let reason = match reason {
        Some(r) if !r.is_empty() && r != "NotSet" && r != "Unknown" => {
            // Reasons arrive team-prefixed ("HomeGoal"); keep the team
            // but space out the words for display.
            spaced_words(r)
        }
        _ => "VAR Check".to_string(),
    };

    let outcome = match outcome {
        Some(o) if !o.is_empty() && o != "NotSet" => spaced_words(o),
        _ => "Checking…".to_string(),
    };

    VarDisplay {
        title,
        reason,
        outcome,
        color,
    }
}

/// Headline for a danger-state event ("Away Dangerous Attack").
/// A team's `Safe` state reads as possession rather than threat.
pub fn danger_headline(team: Team, state: DangerState) -> String {
    match state {
        DangerState::Safe => format!("{} Possession", team),
        other => format!("{} {}", team, other.display_name()),
    }
}

/// Description for a kick-off event.
pub fn kickoff_description(team: Team, phase: MatchPhase) -> String {
    let half = match phase {
        MatchPhase::SecondHalf => "second half",
        _ => "first half",
    };
    match team {
        Team::System => format!("Kick off, {}", half),
        side => format!("{} kick off the {}", side, half),
    }
}

/// Absolute match-minute clock for an event (phase offset applied).
pub fn absolute_clock(event: &MatchEvent) -> String {
    normalize_elapsed(event.phase, &event.time_elapsed)
}

/// Insert spaces before interior capitals: `"HomeDangerousAttack"` →
/// `"Home Dangerous Attack"`.
pub fn spaced_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
