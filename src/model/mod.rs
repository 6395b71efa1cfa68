//! Module: model
//! Responsibility: the owned data shapes the core operates over — the index
//! catalog entry and the geometry a GEO/GEO_NEAR predicate carries.
//! Does not own: predicate tree shape — see `crate::predicate`.

pub mod geo;
pub mod index;

pub use geo::{CenterSphereCap, GeoFrame, GeoHashInfo, GeoNearSpec, GeoRegion};
pub use index::{IndexEntry, IndexKind, KeyElement, KeyElementKind};
