//! # Cylinder Primitive
//!
//! Generates the plain body: a frustum whose two radii are equal.

use super::{build_frustum, SegmentFrame};
use crate::error::ComponentError;
use crate::mesh::Mesh;

/// Creates a cylinder spanning `[frame.z0, frame.z0 + height]`.
///
/// Same ring, cap, and side layout as [`build_frustum`].
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_cylinder, SegmentFrame};
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let body = build_cylinder(0.5, 2.0, 16, &SegmentFrame::new(DVec3::ZERO, basis, 1.0)).unwrap();
/// let (min, max) = body.bounding_box();
/// assert_eq!((min.z, max.z), (1.0, 3.0));
/// ```
pub fn build_cylinder(
    radius: f64,
    height: f64,
    segments: u32,
    frame: &SegmentFrame,
) -> Result<Mesh, ComponentError> {
    build_frustum(radius, radius, height, segments, frame)
}
