//! # Primitives
//!
//! Mesh builders for the three component segments: a frustum neck, a plain
//! or threaded cylinder body, and a flattened hemispherical head, plus the
//! flat seam disc that joins the body to the finer head ring.
//!
//! All builders share one winding convention: triangles are ordered
//! counter-clockwise when seen from outside, so face normals point away
//! from the solid.

pub mod cylinder;
pub mod frustum;
pub mod hemisphere;
pub mod seam;
pub mod threaded;

pub use cylinder::build_cylinder;
pub use frustum::build_frustum;
pub use hemisphere::{build_hemisphere, hemisphere_ring_samples};
pub use seam::build_seam_disc;
pub use threaded::{build_threaded_cylinder, thread_ring_samples, ThreadProfile, ThreadSpec};

use crate::basis::AxisBasis;
use crate::error::ComponentError;
use config::constants::{negligible, EPSILON, MAX_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use std::f64::consts::TAU;

/// Placement of one segment along the component axis.
///
/// `z0` is the axial offset of the segment's near end from `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentFrame {
    pub origin: DVec3,
    pub basis: AxisBasis,
    pub z0: f64,
}

impl SegmentFrame {
    /// Creates a frame whose near end sits at `z0`.
    pub fn new(origin: DVec3, basis: AxisBasis, z0: f64) -> Self {
        Self { origin, basis, z0 }
    }

    /// Same axis, shifted to a different near-end offset.
    pub fn at(&self, z0: f64) -> Self {
        Self { z0, ..*self }
    }

    /// World position of a sample at absolute axial offset `z`.
    #[inline]
    pub fn point(&self, z: f64, radius: f64, theta: f64) -> DVec3 {
        self.basis.point_at(self.origin, z, radius, theta)
    }

    /// World position of the axis at absolute axial offset `z`.
    #[inline]
    pub fn axis_point(&self, z: f64) -> DVec3 {
        self.basis.axis_point(self.origin, z)
    }
}

/// Angle of sample `index` on a ring of `count` samples.
///
/// Computed the same way by every builder so that rings with equal (or
/// doubled) sample counts coincide exactly.
#[inline]
pub(crate) fn ring_angle(index: u32, count: u32) -> f64 {
    TAU * f64::from(index) / f64::from(count)
}

/// Ring resolution actually used for a requested segment count.
#[inline]
pub(crate) fn clamp_segments(segments: u32) -> u32 {
    segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

pub(crate) fn check_height(height: f64) -> Result<(), ComponentError> {
    if negligible(height, EPSILON) || !height.is_finite() {
        return Err(ComponentError::invalid_dimensions(format!(
            "segment height must be positive: {height}"
        )));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: f64) -> Result<(), ComponentError> {
    if negligible(radius, EPSILON) || !radius.is_finite() {
        return Err(ComponentError::invalid_radius(radius));
    }
    Ok(())
}
