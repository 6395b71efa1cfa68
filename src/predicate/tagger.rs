//! Module: predicate::tagger
//! Responsibility: the Relevance Tagger (spec.md §4.3) — walks the tree a
//! second time and attaches a `RelevantTag` to every bounds-generating leaf
//! reachable without crossing a NOR.
//! Does not own: whether a given index/position pair is actually usable —
//! that decision is delegated to `oracle::compatible`.

use crate::error::{fatal, ErrorClass, ErrorOrigin};
use crate::model::IndexEntry;

use super::oracle;
use super::{ExprKind, MatchExpression, RelevantTag};

/// Tags every bounds-generating leaf under `node` (not crossing a NOR) with
/// the shortlisted indexes it could use, at the leading or a trailing key
/// position.
pub fn rate_indices(node: &mut MatchExpression, prefix: &str, indexes: &[IndexEntry]) {
    if matches!(node.kind, ExprKind::Nor(_)) {
        return;
    }

    if node.is_bounds_generating() {
        tag_leaf(node, prefix, indexes);
        return;
    }

    match &mut node.kind {
        ExprKind::And(children) | ExprKind::Or(children) => {
            for child in children.iter_mut() {
                rate_indices(child, prefix, indexes);
            }
        }
        ExprKind::Not(child) => rate_indices(child, prefix, indexes),
        ExprKind::ElemMatch { path, child } => {
            let next_prefix = if path.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}{path}.")
            };
            rate_indices(child, &next_prefix, indexes);
        }
        ExprKind::Nor(_) => unreachable!("NOR returns above"),
        ExprKind::Compare(_)
        | ExprKind::Exists { .. }
        | ExprKind::Regex { .. }
        | ExprKind::Mod { .. }
        | ExprKind::Type { .. }
        | ExprKind::Text { .. }
        | ExprKind::Geo { .. }
        | ExprKind::GeoNear { .. }
        | ExprKind::Other { .. } => {
            // Not reachable: either already handled as bounds-generating
            // above, or not indexable (spec.md §4.2's catch-all row).
        }
    }
}

/// Attaches the tag to a single bounds-generating leaf (spec.md §4.3's
/// numbered algorithm), and — if the leaf is a NOT — clones it onto the
/// NOT's child.
fn tag_leaf(node: &mut MatchExpression, prefix: &str, indexes: &[IndexEntry]) {
    let local_path = match &node.kind {
        ExprKind::Not(child) => child.own_path().unwrap_or_default().to_string(),
        _ => node.own_path().unwrap_or_default().to_string(),
    };
    let full_path = format!("{prefix}{local_path}");

    if node.tag.is_some() {
        fatal(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Tagger,
            format!("leaf at {full_path:?} already carries a tag — assignment point is not unique"),
        );
    }

    let mut tag = RelevantTag::new(full_path);
    for (idx_pos, index) in indexes.iter().enumerate() {
        for (key_pos, element) in index.key_pattern.iter().enumerate() {
            if element.field != tag.path {
                continue;
            }
            if !oracle::compatible(index, key_pos, node) {
                continue;
            }
            if key_pos == 0 {
                tag.first.push(idx_pos);
            } else {
                tag.not_first.push(idx_pos);
            }
        }
    }

    let clone_for_child = matches!(node.kind, ExprKind::Not(_)).then(|| tag.clone());
    node.tag = Some(tag);

    if let (ExprKind::Not(child), Some(clone)) = (&mut node.kind, clone_for_child) {
        child.tag = Some(clone);
    }
}
