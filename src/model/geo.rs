//! Module: model::geo
//! Responsibility: geometry shapes a GEO/GEO_NEAR predicate carries, and the
//! geodesic helper the 2d-index wrap check (spec.md §4.4.4) needs.
//! Does not own: geometry parsing — predicates arrive with this already
//! classified; this module never looks at raw coordinates.

use serde::{Deserialize, Serialize};

///
/// GeoHashInfo
///
/// Conversion parameters an index's `infoObj` carries for flat (2d) index
/// geometry, per spec.md §4.4.4. `bits` is part of the data model for
/// fidelity to a real geohash converter but does not feed the scaling
/// formula used here — see DESIGN.md, "bits vs. the literal scaling
/// formula".
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoHashInfo {
    pub bits: u32,
    pub max: f64,
    pub min: f64,
}

impl Default for GeoHashInfo {
    fn default() -> Self {
        Self {
            bits: 26,
            max: 180.0,
            min: -180.0,
        }
    }
}

/// Bit depth the spec's scaling formula (`2^32 / (max - min)`) is stated in
/// terms of. Kept as a named constant rather than an inline magic number.
const HASH_SCALING_BIT_DEPTH: f64 = 32.0;

/// The hash converter's spherical error: the smallest longitude/latitude
/// increment the index's hash encoding can resolve, used to widen a
/// centerSphere cap's bounding box before the wrap check (spec.md §4.4.4).
#[must_use]
pub fn spherical_error(info: &GeoHashInfo) -> f64 {
    let scaling = 2f64.powf(HASH_SCALING_BIT_DEPTH) / (info.max - info.min);
    1.0 / scaling
}

/// Great-circle longitude widening of a latitude band of half-height
/// `y_scan_deg` centered at `latitude_deg`. Meridians converge toward the
/// poles, so once the band would reach within `y_scan_deg` of either pole
/// the widened band is treated as covering the full longitude range.
#[must_use]
pub fn compute_x_scan_distance(latitude_deg: f64, y_scan_deg: f64) -> f64 {
    let lat = latitude_deg.abs();
    if lat + y_scan_deg >= 90.0 {
        return 180.0;
    }

    let denom = (lat + y_scan_deg).to_radians().cos();
    if denom <= f64::EPSILON {
        180.0
    } else {
        y_scan_deg / denom
    }
}

///
/// CenterSphereCap
///
/// A `$centerSphere`-style spherical disk: legacy flat-coordinate center,
/// great-circle radius in radians.
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenterSphereCap {
    pub center_x_deg: f64,
    pub center_y_deg: f64,
    pub radius_radians: f64,
}

/// Whether a spherical cap's bounding box, widened by the index's spherical
/// error, fits a flat (2d) index without wrapping the antimeridian or a
/// pole — spec.md §4.4.4, scenario S6.
#[must_use]
pub fn center_sphere_fits_flat_index(info: &GeoHashInfo, cap: &CenterSphereCap) -> bool {
    let y_scan = cap.radius_radians.to_degrees() + spherical_error(info);
    let x_scan = compute_x_scan_distance(cap.center_y_deg, y_scan);

    let lon_lo = cap.center_x_deg - x_scan;
    let lon_hi = cap.center_x_deg + x_scan;
    let lat_lo = cap.center_y_deg - y_scan;
    let lat_hi = cap.center_y_deg + y_scan;

    lon_lo > -180.0 && lon_hi < 180.0 && lat_lo > -90.0 && lat_hi < 90.0
}

///
/// GeoFrame
///
/// Reference frame a `$near`/`$nearSphere` query was issued in.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GeoFrame {
    Flat,
    Spherical,
}

///
/// GeoNearSpec
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoNearSpec {
    pub reference_frame: GeoFrame,
    pub near_sphere: bool,
}

///
/// GeoRegion
///
/// The geometry a GEO predicate carries, reduced to exactly the properties
/// the oracle dispatches on (spec.md §4.4.3/§4.4.4): does it expose a
/// spherical region, a flat region, and — if it's a centerSphere cap —
/// the cap itself, for the wrap check.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoRegion {
    pub has_flat_region: bool,
    pub has_spherical_region: bool,
    pub center_sphere: Option<CenterSphereCap>,
}

impl GeoRegion {
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            has_flat_region: true,
            has_spherical_region: false,
            center_sphere: None,
        }
    }

    #[must_use]
    pub const fn spherical() -> Self {
        Self {
            has_flat_region: false,
            has_spherical_region: true,
            center_sphere: None,
        }
    }

    #[must_use]
    pub const fn center_sphere(center_x_deg: f64, center_y_deg: f64, radius_radians: f64) -> Self {
        Self {
            has_flat_region: false,
            has_spherical_region: true,
            center_sphere: Some(CenterSphereCap {
                center_x_deg,
                center_y_deg,
                radius_radians,
            }),
        }
    }
}
