//! Module: predicate::shortlist
//! Responsibility: the Index Shortlister (spec.md §2 item 2, §6 item 2) —
//! narrows the full index catalog down to indexes whose leading key could
//! conceivably serve at least one predicate.
//! Does not own: compatibility checking beyond the leading-field name test —
//! see `oracle` for the full per-leaf rule (§4.4).

use std::collections::BTreeSet;

use crate::model::IndexEntry;

/// Returns every index from `all_indexes` whose leading key field name
/// appears in `fields`. No other filtering at this stage (spec.md §6 item
/// 2: "No other filtering"). Preserves `all_indexes`'s order: the returned
/// `Vec`'s position is what the Tagger later records in `first`/`not_first`
/// (spec.md §9: "store index-list indices... the shortlist is immutable for
/// the duration of the call").
#[must_use]
pub fn find_relevant_indices(
    fields: &BTreeSet<String>,
    all_indexes: &[IndexEntry],
) -> Vec<IndexEntry> {
    all_indexes
        .iter()
        .filter(|idx| idx.leading_field().is_some_and(|f| fields.contains(f)))
        .cloned()
        .collect()
}
