//! Index-selection core for a document-database query planner: field
//! gathering, index shortlisting, relevance tagging, and the text-index
//! structural validator — the ergonomics exported via the `prelude`.
//!
//! The four entry points are invoked in a fixed order over an owned,
//! mutable predicate tree: [`get_fields`] → [`find_relevant_indices`] →
//! [`rate_indices`] → [`strip_invalid_assignments_to_text_indexes`].
//! Predicate parsing, index catalog discovery, document encoding, bound
//! generation, and plan enumeration are all external collaborators this
//! crate does not own.

pub mod error;
pub mod model;
pub mod predicate;
pub mod value;

///
/// Prelude
///
/// Contains only domain vocabulary — no errors or module-internal helpers.
///

pub mod prelude {
    pub use crate::model::{
        GeoFrame, GeoNearSpec, GeoRegion, IndexEntry, IndexKind, KeyElement, KeyElementKind,
    };
    pub use crate::predicate::{CompareOp, ComparePredicate, ExprKind, MatchExpression, RelevantTag};
    pub use crate::value::Value;
    pub use crate::{
        find_relevant_indices, get_fields, rate_indices, strip_invalid_assignments_to_text_indexes,
    };
}

pub use predicate::fields::get_fields;
pub use predicate::oracle::compatible;
pub use predicate::shortlist::find_relevant_indices;
pub use predicate::tagger::rate_indices;
pub use predicate::text_validator::strip_invalid_assignments_to_text_indexes;
