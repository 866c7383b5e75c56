//! Deterministic feed ordering
//!
//! Newest first by UTC timestamp (ISO-8601 strings compare correctly
//! lexicographically). Within one timestamp the comparator must still
//! be a lawful total order, so ties break on a category rank and then
//! the event id. The rank places fouls after every co-timestamped
//! non-foul: a foul's causing free kick carries the same provider
//! timestamp and must read as the preceding entry.

use std::cmp::Ordering;

use types::event::MatchEvent;

/// Sort events into canonical feed order. Stable inputs produce
/// identical output regardless of input permutation.
pub fn sort_events(events: &mut [MatchEvent]) {
    events.sort_by(compare_events);
}

fn compare_events(a: &MatchEvent, b: &MatchEvent) -> Ordering {
    b.timestamp
        .cmp(&a.timestamp)
        .then_with(|| tie_rank(a).cmp(&tie_rank(b)))
        .then_with(|| a.id.cmp(&b.id))
}

/// Tie-break rank at equal timestamps. Ranking by category (not by
/// pairwise relation to danger states) keeps the comparator
/// transitive.
fn tie_rank(event: &MatchEvent) -> u8 {
    u8::from(event.is_foul())
}
