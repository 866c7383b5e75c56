//! Types library for the live match feed
//!
//! Provides all core type definitions shared between the feed pipeline
//! and the delivery layer: identifiers, match phases, team-scoped state
//! enums, the canonical `MatchEvent` model, and the raw per-category
//! wire records the feed provider sends.
//!
//! # Modules
//! - `ids`: Unique identifiers (FixtureId, EventId)
//! - `team`: Team attribution and Home/Away prefix handling
//! - `phase`: Match phase enum and phase-change titles
//! - `states`: Danger/throw-in/booking/VAR state enums
//! - `player`: Player identity and lineup snapshots
//! - `event`: Canonical `MatchEvent` and its tagged payloads
//! - `raw`: Raw feed records, one type per action category
//! - `fixture`: Fixture metadata and last-action summaries

pub mod event;
pub mod fixture;
pub mod ids;
pub mod phase;
pub mod player;
pub mod raw;
pub mod states;
pub mod team;

// Library version constant
pub const LIB_VERSION: &str = "0.1.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::*;
    pub use crate::fixture::*;
    pub use crate::ids::*;
    pub use crate::phase::*;
    pub use crate::player::*;
    pub use crate::raw::*;
    pub use crate::states::*;
    pub use crate::team::*;
}
