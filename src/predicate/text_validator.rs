//! Module: predicate::text_validator
//! Responsibility: the Text-Index Structural Validator (spec.md §4.5) — a
//! post-pass that strips tag entries for a compound-text index from leaves
//! whose surrounding AND does not actually satisfy the index's prefix
//! equality requirement.
//! Does not own: attaching tags in the first place — see `tagger`.

use std::collections::BTreeSet;

use crate::model::{IndexEntry, IndexKind};

use super::{ExprKind, MatchExpression};

/// Strips every tag reference to a non-eligible compound-text index from
/// `tree`. Indexes that are not TEXT, or are TEXT with an empty prefix, are
/// skipped entirely (spec.md §4.5 edge cases: "if P is empty... the
/// validator does nothing for that index").
pub fn strip_invalid_assignments_to_text_indexes(tree: &mut MatchExpression, indexes: &[IndexEntry]) {
    for (idx_pos, index) in indexes.iter().enumerate() {
        if !matches!(index.kind, IndexKind::Text) {
            continue;
        }

        let prefix_fields: BTreeSet<String> = index
            .text_prefix_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        if prefix_fields.is_empty() {
            continue;
        }

        strip_for_index(tree, idx_pos, &prefix_fields);
    }
}

/// Recursive walk for one text index. Order matters: a bounds-generating
/// check comes before the NOT/NOR check, because a NOT directly wrapping an
/// indexable leaf is itself classified as bounds-generating (spec.md
/// §4.2) and must have its own tag stripped here — it does not fall
/// through to the "stop, don't descend" NOT/NOR branch, so its child's
/// cloned tag is left untouched (see DESIGN.md's open-question decision 3).
fn strip_for_index(node: &mut MatchExpression, idx_pos: usize, prefix_fields: &BTreeSet<String>) {
    if node.is_bounds_generating() {
        remove_tag_ref(node, idx_pos);
        return;
    }

    if matches!(node.kind, ExprKind::Not(_) | ExprKind::Nor(_)) {
        return;
    }

    match &mut node.kind {
        ExprKind::And(children) => strip_and(children, idx_pos, prefix_fields),
        ExprKind::Or(children) => {
            for child in children.iter_mut() {
                strip_for_index(child, idx_pos, prefix_fields);
            }
        }
        ExprKind::ElemMatch { child, .. } => strip_for_index(child, idx_pos, prefix_fields),
        _ => {}
    }
}

/// The AND-specific eligibility check (spec.md §4.5's bulleted algorithm).
fn strip_and(children: &mut [MatchExpression], idx_pos: usize, prefix_fields: &BTreeSet<String>) {
    let mut remaining = prefix_fields.clone();
    let mut has_text = false;

    for child in children.iter_mut() {
        let references_idx = child
            .tag
            .as_ref()
            .is_some_and(|tag| tag.first.contains(&idx_pos) || tag.not_first.contains(&idx_pos));

        if references_idx {
            if matches!(child.kind, ExprKind::Text { .. }) {
                has_text = true;
            } else {
                // No-op if `child`'s path isn't one of the prefix fields —
                // that's the "suffix assignment" case, preserved as-is.
                let path = child.tag.as_ref().expect("just checked").path.clone();
                remaining.remove(&path);
            }
        } else {
            // Scrub any deeper invalid assignments that won't be satisfied
            // at this level regardless of how this AND turns out.
            strip_for_index(child, idx_pos, prefix_fields);
        }
    }

    if !has_text || !remaining.is_empty() {
        for child in children.iter_mut() {
            strip_for_index(child, idx_pos, prefix_fields);
        }
    }
}

fn remove_tag_ref(node: &mut MatchExpression, idx_pos: usize) {
    if let Some(tag) = &mut node.tag {
        tag.first.retain(|&i| i != idx_pos);
        tag.not_first.retain(|&i| i != idx_pos);
    }
}
