//! Feed Pipeline
//!
//! Turns a heterogeneous per-category raw feed snapshot into a single,
//! deterministically ordered, typed event stream:
//! - Lenient snapshot decoding (malformed records skipped, not fatal)
//! - One pure mapping function per raw action category
//! - Cross-category enrichment (throw-in danger classification,
//!   booking-risk history, VAR humanization, clock normalization)
//! - Deterministic ordering with an explicit tie-break policy
//! - Player identity resolution against a per-fixture lineup cache
//!
//! # Architecture
//!
//! ```text
//! Raw snapshot (JSON)
//!        │
//!    ┌───▼────┐
//!    │ Ingest │  ← Per-record decoding, skips malformed records
//!    └───┬────┘
//!        │
//!    ┌───▼───────┐     ┌────────────┐
//!    │ Normalize │ ←── │ LineupCache│
//!    └───┬───────┘     └────────────┘
//!        │  (enrichment runs inside the category handlers)
//!    ┌───▼──────┐
//!    │ Ordering │  ← timestamp desc, foul-last, id asc
//!    └───┬──────┘
//!        │
//!   Ordered MatchEvent[]
//! ```

pub mod display;
pub mod enrich;
pub mod ingest;
pub mod lineup;
pub mod normalize;
pub mod ordering;

use serde_json::Value;
use types::event::MatchEvent;

use crate::ingest::IngestError;
use crate::lineup::LineupCache;
use crate::normalize::NormalizeContext;

/// Run the full pipeline over one raw snapshot: decode, merge lineup
/// updates into the cache, normalize every category, and sort.
///
/// Events are produced fresh on every call; merging by id into a
/// display buffer is the consumer's responsibility.
pub fn process_snapshot(
    snapshot: &Value,
    lineups: &mut LineupCache,
) -> Result<Vec<MatchEvent>, IngestError> {
    let decoded = ingest::parse_snapshot(snapshot)?;
    lineups.ingest(&decoded.lineup_updates);

    let ctx = NormalizeContext { lineups };
    let mut events = normalize::normalize_snapshot(&decoded, &ctx);
    ordering::sort_events(&mut events);
    Ok(events)
}
