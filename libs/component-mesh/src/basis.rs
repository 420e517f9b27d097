//! # Axis Basis
//!
//! Orthonormal frame aligned with the component axis. Every builder maps
//! its cylindrical `(z, radius, theta)` samples to world space through
//! [`AxisBasis::point_at`], so rings built by neighbouring segments land on
//! identical coordinates.

use crate::error::ComponentError;
use config::constants::negligible;
use glam::DVec3;

/// Above this `|n.x|` the X axis is too close to the axis direction to be a
/// stable cross product reference.
const REFERENCE_SWITCH: f64 = 0.9;

/// Right-handed orthonormal frame `{n, u, v}` with `u × v = n`.
///
/// # Example
///
/// ```rust
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::new(0.0, 0.0, 2.0), 1e-6).unwrap();
/// assert_eq!(basis.n, DVec3::Z);
/// assert!(basis.u.cross(basis.v).abs_diff_eq(basis.n, 1e-12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBasis {
    /// Axial direction, start to end.
    pub n: DVec3,
    /// First transverse axis.
    pub u: DVec3,
    /// Second transverse axis.
    pub v: DVec3,
}

impl AxisBasis {
    /// Builds the frame for `direction` (need not be normalized).
    ///
    /// # Errors
    ///
    /// [`ComponentError::DegenerateAxis`] if `direction` is not longer than
    /// `tolerance` (or is not finite).
    pub fn from_direction(direction: DVec3, tolerance: f64) -> Result<Self, ComponentError> {
        let length = direction.length();
        if negligible(length, tolerance) || !length.is_finite() {
            return Err(ComponentError::degenerate_axis(length));
        }

        let n = direction / length;
        let reference = if n.x.abs() < REFERENCE_SWITCH {
            DVec3::X
        } else {
            DVec3::Y
        };
        let v = n.cross(reference).normalize();
        let u = v.cross(n);

        Ok(Self { n, u, v })
    }

    /// Maps a cylindrical sample to world space:
    /// `origin + n·z + u·r·cosθ + v·r·sinθ`.
    #[inline]
    pub fn point_at(&self, origin: DVec3, z: f64, radius: f64, theta: f64) -> DVec3 {
        let (sin, cos) = theta.sin_cos();
        origin + self.n * z + self.u * (radius * cos) + self.v * (radius * sin)
    }

    /// Point on the axis at offset `z` from `origin`.
    #[inline]
    pub fn axis_point(&self, origin: DVec3, z: f64) -> DVec3 {
        self.point_at(origin, z, 0.0, 0.0)
    }

    /// Decomposes `point` into `(axial offset, distance from axis)` relative
    /// to `origin`.
    pub fn cylindrical(&self, origin: DVec3, point: DVec3) -> (f64, f64) {
        let local = point - origin;
        let z = local.dot(self.n);
        let radial = local - self.n * z;
        (z, radial.length())
    }
}
