//! Module: predicate
//! Responsibility: the predicate tree's node shape and the four index-
//! selection passes that walk it (spec.md §2, §3, §9 design notes).
//! Does not own: predicate parsing — a tree arrives already built by the
//! caller (spec.md §1).
//!
//! Pure, schema-agnostic representation of the subset of a match expression
//! tree this core needs. All index-selection logic lives in the submodules;
//! this module only defines the shape being walked.

pub mod fields;
pub mod oracle;
pub mod shortlist;
pub mod tagger;
pub mod text_validator;

use serde::{Deserialize, Serialize};

use crate::model::{GeoNearSpec, GeoRegion};
use crate::value::Value;

///
/// CompareOp
///
/// `Ne` has no variant here: spec.md §4.2's bounds-generating-leaf category
/// lists only `EQ`/`LT`/`LTE`/`GT`/`GTE`/`IN`; a not-equals predicate is
/// represented as `Not(Compare(Eq, ...))`, matching scenario S3.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparePredicate {
    pub path: String,
    pub op: CompareOp,
    pub value: Value,
}

///
/// RelevantTag
///
/// Attached by the Relevance Tagger to a bounds-generating leaf (spec.md
/// §3). `first`/`not_first` hold shortlisted-index positions, not pointers
/// (spec.md §9 design note: "store index-list indices, not pointers").
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RelevantTag {
    pub path: String,
    pub first: Vec<usize>,
    pub not_first: Vec<usize>,
}

impl RelevantTag {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            first: Vec::new(),
            not_first: Vec::new(),
        }
    }
}

///
/// ExprKind
///
/// The discriminant of the "single abstract node" design spec.md §9
/// endorses. Variants are grouped to mirror the §4.2 partition exactly:
/// logical composites, the one array-indexable-through-children shape, the
/// bounds-generating leaves, and a catch-all for non-indexable kinds
/// (e.g. `$where`/`$expr`).
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    // Logical composite.
    And(Vec<MatchExpression>),
    Or(Vec<MatchExpression>),
    Not(Box<MatchExpression>),
    Nor(Vec<MatchExpression>),

    // Array-indexable-through-children (elemMatch-object and the
    // all-with-elemMatch shape share identical traversal behavior per
    // spec.md §4.1/§4.2, so one variant covers both).
    ElemMatch {
        path: String,
        child: Box<MatchExpression>,
    },

    // Bounds-generating leaves.
    Compare(ComparePredicate),
    Exists {
        path: String,
    },
    Regex {
        path: String,
    },
    Mod {
        path: String,
    },
    Type {
        path: String,
    },
    Text {
        path: String,
        query: String,
    },
    Geo {
        path: String,
        region: GeoRegion,
        /// Whether this is a `$geoWithin`-style containment query, as
        /// opposed to `$geoIntersects`. Only within-queries may use a flat
        /// (2d) index (spec.md §4.4.4).
        within: bool,
    },
    GeoNear {
        path: String,
        spec: GeoNearSpec,
    },

    // Not indexable (spec.md §4.2: "anything else").
    Other {
        path: Option<String>,
    },
}

///
/// MatchExpression
///
/// The tree node. `kind` is the polymorphic discriminator; `tag` is the
/// mutable slot the Tagger populates. Only bounds-generating leaves (and a
/// NOT wrapping one) ever carry a tag; this is enforced by how the Tagger
/// walks the tree, not by a runtime check on construction.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchExpression {
    pub kind: ExprKind,
    pub tag: Option<RelevantTag>,
}

impl MatchExpression {
    #[must_use]
    pub const fn new(kind: ExprKind) -> Self {
        Self { kind, tag: None }
    }

    #[must_use]
    pub const fn compare(path: String, op: CompareOp, value: Value) -> Self {
        Self::new(ExprKind::Compare(ComparePredicate { path, op, value }))
    }

    #[must_use]
    pub fn eq(path: impl Into<String>, value: Value) -> Self {
        Self::compare(path.into(), CompareOp::Eq, value)
    }

    #[must_use]
    pub fn exists(path: impl Into<String>) -> Self {
        Self::new(ExprKind::Exists { path: path.into() })
    }

    #[must_use]
    pub fn regex(path: impl Into<String>) -> Self {
        Self::new(ExprKind::Regex { path: path.into() })
    }

    #[must_use]
    pub fn modulo(path: impl Into<String>) -> Self {
        Self::new(ExprKind::Mod { path: path.into() })
    }

    #[must_use]
    pub fn type_of(path: impl Into<String>) -> Self {
        Self::new(ExprKind::Type { path: path.into() })
    }

    #[must_use]
    pub fn text(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self::new(ExprKind::Text {
            path: path.into(),
            query: query.into(),
        })
    }

    #[must_use]
    pub fn geo(path: impl Into<String>, region: GeoRegion, within: bool) -> Self {
        Self::new(ExprKind::Geo {
            path: path.into(),
            region,
            within,
        })
    }

    #[must_use]
    pub fn geo_near(path: impl Into<String>, spec: GeoNearSpec) -> Self {
        Self::new(ExprKind::GeoNear {
            path: path.into(),
            spec,
        })
    }

    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        Self::new(ExprKind::And(children))
    }

    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        Self::new(ExprKind::Or(children))
    }

    #[must_use]
    pub fn not(child: Self) -> Self {
        Self::new(ExprKind::Not(Box::new(child)))
    }

    #[must_use]
    pub fn nor(children: Vec<Self>) -> Self {
        Self::new(ExprKind::Nor(children))
    }

    #[must_use]
    pub fn elem_match(path: impl Into<String>, child: Self) -> Self {
        Self::new(ExprKind::ElemMatch {
            path: path.into(),
            child: Box::new(child),
        })
    }

    #[must_use]
    pub const fn other(path: Option<String>) -> Self {
        Self::new(ExprKind::Other { path })
    }

    /// Whether this node is a leaf from which index scan bounds can be
    /// derived directly (spec.md §4.2's first row).
    #[must_use]
    pub const fn is_bounds_generating_leaf_kind(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Compare(_)
                | ExprKind::Exists { .. }
                | ExprKind::Regex { .. }
                | ExprKind::Mod { .. }
                | ExprKind::Type { .. }
                | ExprKind::Text { .. }
                | ExprKind::Geo { .. }
                | ExprKind::GeoNear { .. }
        )
    }

    /// Whether this node is bounds-generating for the Tagger's/Validator's
    /// purposes: a leaf itself, or a NOT directly wrapping one (spec.md
    /// §4.2's "NOT over an indexable leaf" clause).
    #[must_use]
    pub fn is_bounds_generating(&self) -> bool {
        match &self.kind {
            ExprKind::Not(child) => child.is_bounds_generating_leaf_kind(),
            _ => self.is_bounds_generating_leaf_kind(),
        }
    }

    /// The node's own local path, if it carries one. `Not`/`And`/`Or`/`Nor`
    /// have none; `ElemMatch` carries the path it pushes into its child.
    #[must_use]
    pub fn own_path(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::And(_) | ExprKind::Or(_) | ExprKind::Nor(_) | ExprKind::Not(_) => None,
            ExprKind::ElemMatch { path, .. }
            | ExprKind::Exists { path }
            | ExprKind::Regex { path }
            | ExprKind::Mod { path }
            | ExprKind::Type { path }
            | ExprKind::Text { path, .. }
            | ExprKind::Geo { path, .. }
            | ExprKind::GeoNear { path, .. } => Some(path.as_str()),
            ExprKind::Compare(cmp) => Some(cmp.path.as_str()),
            ExprKind::Other { path } => path.as_deref(),
        }
    }
}
