//! Module: predicate::oracle
//! Responsibility: the Compatibility Oracle (spec.md §4.4) — the pure
//! function deciding whether a leaf may use an index at a given key
//! position.
//! Does not own: which indexes get considered at all — see `shortlist`; nor
//! how a leaf's candidate positions are enumerated — see `tagger`.

use crate::error::{fatal_after_warning, ErrorClass, ErrorOrigin};
use crate::model::geo::center_sphere_fits_flat_index;
use crate::model::{GeoFrame, IndexEntry, IndexKind, KeyElementKind};

use super::{CompareOp, ExprKind, MatchExpression};

///
/// EffectiveFieldType
///
/// The discriminant the oracle dispatches on (spec.md §4.4's opening
/// paragraph). A closed enum over the known key-element tags, plus an
/// `Unknown` fallback carrying the offending literal — this is what makes
/// §4.4.7's "unknown effective type" path reachable at all despite Rust's
/// otherwise-exhaustive matching: the index catalog's key-element tags
/// arrive as caller-supplied strings (spec.md §6), not a closed Rust enum.
///

#[derive(Clone, Debug, Eq, PartialEq)]
enum EffectiveFieldType {
    Empty,
    Hashed,
    Geo2d,
    Geo2dSphere,
    Text,
    GeoHaystack,
    Unknown(String),
}

/// The effective indexed-field type at `position`: the key element's own
/// tag, unless the index's overall type is ordinary sorted (BTREE), in
/// which case it is treated as empty regardless of what the element's tag
/// literal says (spec.md §4.4: "guarding against historical indexes whose
/// string key value is cosmetic").
fn effective_type(index: &IndexEntry, position: usize) -> EffectiveFieldType {
    if matches!(index.kind, IndexKind::Btree) {
        return EffectiveFieldType::Empty;
    }

    match &index.key_pattern[position].kind {
        KeyElementKind::Sorted => EffectiveFieldType::Empty,
        KeyElementKind::Hashed => EffectiveFieldType::Hashed,
        KeyElementKind::Geo2d => EffectiveFieldType::Geo2d,
        KeyElementKind::Geo2dSphere => EffectiveFieldType::Geo2dSphere,
        KeyElementKind::Text => EffectiveFieldType::Text,
        KeyElementKind::GeoHaystack => EffectiveFieldType::GeoHaystack,
        KeyElementKind::Unknown(tag) => EffectiveFieldType::Unknown(tag.clone()),
    }
}

/// Whether `node` may use `index` at key-pattern `position` (spec.md
/// §4.4). `position` is required — not just the key element in isolation —
/// because the TEXT-index suffix rule in §4.4.1 needs it to compare against
/// the text divider's own position.
#[must_use]
pub fn compatible(index: &IndexEntry, position: usize, node: &MatchExpression) -> bool {
    match effective_type(index, position) {
        EffectiveFieldType::Empty => ordinary_sorted_compatible(index, position, node),
        EffectiveFieldType::Hashed => hashed_compatible(node),
        EffectiveFieldType::Geo2dSphere => spherical_geo_compatible(node),
        EffectiveFieldType::Geo2d => flat_geo_compatible(index, node),
        EffectiveFieldType::Text => matches!(node.kind, ExprKind::Text { .. }),
        EffectiveFieldType::GeoHaystack => false,
        EffectiveFieldType::Unknown(tag) => fatal_after_warning(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Oracle,
            format!(
                "unknown effective indexed-field type {tag:?} at key position {position}"
            ),
            "compatibility oracle reached an unrecognized effective indexed-field type",
        ),
    }
}

/// §4.4.1 — ordinary sorted key (effective type empty), including the
/// prefix/suffix split a TEXT index imposes on its own non-text elements.
fn ordinary_sorted_compatible(index: &IndexEntry, position: usize, node: &MatchExpression) -> bool {
    if let ExprKind::Compare(cmp) = &node.kind {
        if cmp.op == CompareOp::Eq && cmp.value.is_null() && index.sparse {
            return false;
        }
    }

    if matches!(node.kind, ExprKind::Geo { .. } | ExprKind::GeoNear { .. }) {
        return false;
    }

    if let ExprKind::Not(child) = &node.kind {
        if index.sparse || index.multikey {
            return false;
        }
        if matches!(child.kind, ExprKind::Regex { .. } | ExprKind::Mod { .. }) {
            return false;
        }
    }

    if !matches!(index.kind, IndexKind::Text) {
        return true;
    }

    if matches!(&node.kind, ExprKind::Compare(cmp) if cmp.op == CompareOp::Eq) {
        return true;
    }

    position >= index.text_divider_position()
}

/// §4.4.2 — hashed.
fn hashed_compatible(node: &MatchExpression) -> bool {
    matches!(
        &node.kind,
        ExprKind::Compare(cmp) if matches!(cmp.op, CompareOp::Eq | CompareOp::In)
    )
}

/// §4.4.3 — spherical geo (2dsphere).
fn spherical_geo_compatible(node: &MatchExpression) -> bool {
    match &node.kind {
        ExprKind::Geo { region, .. } => region.has_spherical_region,
        ExprKind::GeoNear { spec, .. } => {
            spec.reference_frame == GeoFrame::Spherical || spec.near_sphere
        }
        _ => false,
    }
}

/// §4.4.4 — flat geo (2d).
fn flat_geo_compatible(index: &IndexEntry, node: &MatchExpression) -> bool {
    match &node.kind {
        ExprKind::GeoNear { spec, .. } => spec.reference_frame == GeoFrame::Flat,
        ExprKind::Geo { region, within, .. } => {
            if !within {
                return false;
            }
            if region.has_flat_region {
                return true;
            }
            match &region.center_sphere {
                Some(cap) => center_sphere_fits_flat_index(&index.info, cap),
                None => false,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GeoNearSpec, GeoRegion, KeyElement};
    use crate::value::Value;

    fn btree(key: Vec<KeyElement>) -> IndexEntry {
        IndexEntry::new(IndexKind::Btree, key)
    }

    #[test]
    fn ordinary_eq_accepted() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let node = MatchExpression::eq("a", Value::Int(5));
        assert!(compatible(&idx, 0, &node));
    }

    #[test]
    fn eq_null_on_sparse_index_rejected() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]).sparse(true);
        let node = MatchExpression::eq("a", Value::Null);
        assert!(!compatible(&idx, 0, &node));
    }

    #[test]
    fn eq_null_on_non_sparse_index_accepted() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let node = MatchExpression::eq("a", Value::Null);
        assert!(compatible(&idx, 0, &node));
    }

    #[test]
    fn geo_and_geo_near_rejected_on_ordinary_sorted() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let geo = MatchExpression::geo("a", GeoRegion::flat(), true);
        assert!(!compatible(&idx, 0, &geo));

        let near = MatchExpression::geo_near(
            "a",
            GeoNearSpec {
                reference_frame: GeoFrame::Flat,
                near_sphere: false,
            },
        );
        assert!(!compatible(&idx, 0, &near));
    }

    #[test]
    fn not_on_multikey_rejected() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]).multikey(true);
        let not_eq = MatchExpression::not(MatchExpression::eq("a", Value::Int(3)));
        assert!(!compatible(&idx, 0, &not_eq));
    }

    #[test]
    fn not_on_sparse_rejected() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]).sparse(true);
        let not_eq = MatchExpression::not(MatchExpression::eq("a", Value::Int(3)));
        assert!(!compatible(&idx, 0, &not_eq));
    }

    #[test]
    fn not_over_regex_rejected_even_on_plain_index() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let not_regex = MatchExpression::not(MatchExpression::regex("a"));
        assert!(!compatible(&idx, 0, &not_regex));
    }

    #[test]
    fn not_over_mod_rejected_even_on_plain_index() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let not_mod = MatchExpression::not(MatchExpression::modulo("a"));
        assert!(!compatible(&idx, 0, &not_mod));
    }

    #[test]
    fn not_over_eq_on_plain_index_accepted() {
        let idx = btree(vec![KeyElement::new("a", "sorted")]);
        let not_eq = MatchExpression::not(MatchExpression::eq("a", Value::Int(3)));
        assert!(compatible(&idx, 0, &not_eq));
    }

    #[test]
    fn text_index_prefix_accepts_equality_unconditionally() {
        let idx = IndexEntry::new(
            IndexKind::Text,
            vec![KeyElement::new("a", "sorted"), KeyElement::new("_fts", "text")],
        );
        let eq = MatchExpression::eq("a", Value::Int(1));
        assert!(compatible(&idx, 0, &eq));
    }

    #[test]
    fn text_index_prefix_rejects_non_equality_at_prefix_position() {
        let idx = IndexEntry::new(
            IndexKind::Text,
            vec![KeyElement::new("a", "sorted"), KeyElement::new("_fts", "text")],
        );
        let exists = MatchExpression::exists("a");
        assert!(!compatible(&idx, 0, &exists));
    }

    #[test]
    fn text_index_accepts_non_equality_at_suffix_position() {
        let idx = IndexEntry::new(
            IndexKind::Text,
            vec![
                KeyElement::new("_fts", "text"),
                KeyElement::new("b", "sorted"),
            ],
        );
        let exists = MatchExpression::exists("b");
        assert!(compatible(&idx, 1, &exists));
    }

    #[test]
    fn hashed_accepts_only_eq_and_in() {
        let idx = IndexEntry::new(IndexKind::Hashed, vec![KeyElement::new("a", "hashed")]);
        assert!(compatible(&idx, 0, &MatchExpression::eq("a", Value::Int(1))));
        assert!(compatible(
            &idx,
            0,
            &MatchExpression::compare(
                "a".to_string(),
                CompareOp::In,
                Value::List(vec![Value::Int(1)])
            )
        ));
        assert!(!compatible(&idx, 0, &MatchExpression::exists("a")));
    }

    #[test]
    fn spherical_geo_accepts_spherical_region_only() {
        let idx = IndexEntry::new(IndexKind::Geo2dSphere, vec![KeyElement::new("loc", "2dsphere")]);
        let ok = MatchExpression::geo("loc", GeoRegion::spherical(), true);
        assert!(compatible(&idx, 0, &ok));

        let bad = MatchExpression::geo("loc", GeoRegion::flat(), true);
        assert!(!compatible(&idx, 0, &bad));
    }

    #[test]
    fn spherical_geo_near_requires_spherical_frame_or_near_sphere_flag() {
        let idx = IndexEntry::new(IndexKind::Geo2dSphere, vec![KeyElement::new("loc", "2dsphere")]);
        let spherical_frame = MatchExpression::geo_near(
            "loc",
            GeoNearSpec {
                reference_frame: GeoFrame::Spherical,
                near_sphere: false,
            },
        );
        assert!(compatible(&idx, 0, &spherical_frame));

        let near_sphere_flag = MatchExpression::geo_near(
            "loc",
            GeoNearSpec {
                reference_frame: GeoFrame::Flat,
                near_sphere: true,
            },
        );
        assert!(compatible(&idx, 0, &near_sphere_flag));

        let neither = MatchExpression::geo_near(
            "loc",
            GeoNearSpec {
                reference_frame: GeoFrame::Flat,
                near_sphere: false,
            },
        );
        assert!(!compatible(&idx, 0, &neither));
    }

    #[test]
    fn flat_geo_rejects_intersects_query() {
        let idx = IndexEntry::new(IndexKind::Geo2d, vec![KeyElement::new("loc", "2d")]);
        let intersects = MatchExpression::geo("loc", GeoRegion::flat(), false);
        assert!(!compatible(&idx, 0, &intersects));
    }

    #[test]
    fn flat_geo_within_flat_region_accepted() {
        let idx = IndexEntry::new(IndexKind::Geo2d, vec![KeyElement::new("loc", "2d")]);
        let within = MatchExpression::geo("loc", GeoRegion::flat(), true);
        assert!(compatible(&idx, 0, &within));
    }

    #[test]
    fn flat_geo_center_sphere_wrap_rejected() {
        let idx = IndexEntry::new(IndexKind::Geo2d, vec![KeyElement::new("loc", "2d")]);
        let cap = GeoRegion::center_sphere(179.9, 0.0, 0.5);
        let node = MatchExpression::geo("loc", cap, true);
        assert!(!compatible(&idx, 0, &node));
    }

    #[test]
    fn flat_geo_center_sphere_away_from_boundary_accepted() {
        let idx = IndexEntry::new(IndexKind::Geo2d, vec![KeyElement::new("loc", "2d")]);
        let cap = GeoRegion::center_sphere(0.0, 0.0, 0.1);
        let node = MatchExpression::geo("loc", cap, true);
        assert!(compatible(&idx, 0, &node));
    }

    #[test]
    fn haystack_always_rejected() {
        let idx = IndexEntry::new(
            IndexKind::GeoHaystack,
            vec![KeyElement::new("loc", "geoHaystack")],
        );
        assert!(!compatible(&idx, 0, &MatchExpression::eq("loc", Value::Int(1))));
    }

    #[test]
    #[should_panic(expected = "unrecognized effective indexed-field type")]
    fn unknown_effective_type_is_fatal() {
        let idx = IndexEntry::new(
            IndexKind::GeoHaystack,
            vec![KeyElement::new("a", "some_future_literal")],
        );
        let _ = compatible(&idx, 0, &MatchExpression::eq("a", Value::Int(1)));
    }
}
