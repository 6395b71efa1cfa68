//! Module: model::index
//! Responsibility: the catalog-facing index descriptor the oracle and
//! shortlister dispatch on (spec.md §3, §6).
//! Does not own: catalog discovery — indexes arrive already built by the
//! caller (spec.md §1 lists catalog discovery as an external collaborator).

use serde::{Deserialize, Serialize};

use crate::error::{fatal, ErrorClass, ErrorOrigin};
use crate::model::geo::GeoHashInfo;

///
/// IndexKind
///
/// The index's overall type, spec.md §3's `type` field.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum IndexKind {
    Btree,
    Hashed,
    Geo2d,
    Geo2dSphere,
    Text,
    GeoHaystack,
}

///
/// KeyElementKind
///
/// The per-element `typeTag` of a key pattern (spec.md §3): either ordinary
/// sorted, or one of the specialty string literals named in §6. Kept as a
/// closed enum with a string-backed fallback rather than a bare `String` so
/// the oracle's dispatch (§4.4) is exhaustive over the known shapes while
/// still surfacing an unrecognized tag as data instead of silently treating
/// it as ordinary.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum KeyElementKind {
    Sorted,
    Hashed,
    Geo2d,
    Geo2dSphere,
    Text,
    GeoHaystack,
    Unknown(String),
}

impl KeyElementKind {
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "sorted" | "ordinary sorted" => Self::Sorted,
            "hashed" => Self::Hashed,
            "2d" => Self::Geo2d,
            "2dsphere" => Self::Geo2dSphere,
            "text" => Self::Text,
            "geoHaystack" => Self::GeoHaystack,
            other => Self::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

///
/// KeyElement
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyElement {
    pub field: String,
    pub kind: KeyElementKind,
}

impl KeyElement {
    #[must_use]
    pub fn new(field: impl Into<String>, kind_tag: &str) -> Self {
        Self {
            field: field.into(),
            kind: KeyElementKind::from_tag(kind_tag),
        }
    }
}

///
/// IndexEntry
///
/// Runtime-only descriptor for a catalog index, reduced to exactly the
/// properties the core dispatches on (spec.md §3). Keeps the core decoupled
/// from the caller's own catalog/schema representation.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub kind: IndexKind,
    pub key_pattern: Vec<KeyElement>,
    pub sparse: bool,
    pub multikey: bool,
    pub info: GeoHashInfo,
}

impl IndexEntry {
    #[must_use]
    pub fn new(kind: IndexKind, key_pattern: Vec<KeyElement>) -> Self {
        Self {
            kind,
            key_pattern,
            sparse: false,
            multikey: false,
            info: GeoHashInfo::default(),
        }
    }

    #[must_use]
    pub const fn sparse(mut self, sparse: bool) -> Self {
        self.sparse = sparse;
        self
    }

    #[must_use]
    pub const fn multikey(mut self, multikey: bool) -> Self {
        self.multikey = multikey;
        self
    }

    #[must_use]
    pub const fn info(mut self, info: GeoHashInfo) -> Self {
        self.info = info;
        self
    }

    /// The leading key field's name — what the Shortlister (spec.md §6 item
    /// 2) filters on.
    #[must_use]
    pub fn leading_field(&self) -> Option<&str> {
        self.key_pattern.first().map(|e| e.field.as_str())
    }

    /// The divider position: the index of the first string-typed (TEXT) key
    /// element. Every text index is guaranteed to have one (spec.md §4.5
    /// edge cases); its absence is an invariant violation, not a recoverable
    /// condition.
    #[must_use]
    pub fn text_divider_position(&self) -> usize {
        self.key_pattern
            .iter()
            .position(|e| e.kind.is_text())
            .unwrap_or_else(|| {
                fatal(
                    ErrorClass::InvariantViolation,
                    ErrorOrigin::TextValidator,
                    "text index key pattern has no string-typed divider element",
                )
            })
    }

    /// The set of prefix field names preceding the text divider (spec.md
    /// §4.5, glossary "Prefix (of a text index)").
    #[must_use]
    pub fn text_prefix_fields(&self) -> Vec<&str> {
        let divider = self.text_divider_position();
        self.key_pattern[..divider]
            .iter()
            .map(|e| e.field.as_str())
            .collect()
    }
}
