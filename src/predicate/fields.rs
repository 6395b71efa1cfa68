//! Module: predicate::fields
//! Responsibility: the Field Gatherer (spec.md §4.1) — collects every
//! fully-qualified indexed path a leaf predicate references.
//! Does not own: index selection itself — see `shortlist`/`tagger`.

use std::collections::BTreeSet;

use super::{ExprKind, MatchExpression};

/// Walks `node`, augmenting `out` with every fully-qualified path referenced
/// by a leaf-indexable predicate reachable without crossing a NOR. `out` is
/// a `BTreeSet` rather than a `HashSet`: the contract is set semantics, but
/// stable iteration order makes the output testable (spec.md §4.1: "order
/// does not affect the output... but must be stable for testability").
pub fn get_fields(node: &MatchExpression, prefix: &str, out: &mut BTreeSet<String>) {
    match &node.kind {
        ExprKind::Nor(_) => {
            // Any path inside is not usable by a positive index match.
        }

        ExprKind::And(children) | ExprKind::Or(children) => {
            for child in children {
                get_fields(child, prefix, out);
            }
        }

        ExprKind::Not(child) => get_fields(child, prefix, out),

        ExprKind::ElemMatch { path, child } => {
            let next_prefix = if path.is_empty() {
                prefix.to_string()
            } else {
                format!("{prefix}{path}.")
            };
            get_fields(child, &next_prefix, out);
        }

        ExprKind::Compare(_)
        | ExprKind::Exists { .. }
        | ExprKind::Regex { .. }
        | ExprKind::Mod { .. }
        | ExprKind::Type { .. }
        | ExprKind::Text { .. }
        | ExprKind::Geo { .. }
        | ExprKind::GeoNear { .. } => {
            let path = node.own_path().unwrap_or_default();
            out.insert(format!("{prefix}{path}"));
        }

        ExprKind::Other { .. } => {
            // Not indexable — ignored.
        }
    }
}
