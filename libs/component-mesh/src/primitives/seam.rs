//! # Seam Disc Primitive
//!
//! Generates the flat disc that closes the joint between the body and the
//! head. The body's far ring has `coarse` samples while the head's base
//! ring has `fine = k·coarse`, so the two rings only share every `k`-th
//! vertex. The disc is triangulated against both:
//!
//! ```text
//!   h(ki) ── h(ki+1) ── ... ── h(k(i+1))
//!      \        |                 /
//!       \       |     arc fan    /
//!        \      |               /
//!         ───── centre fan ─────
//! ```
//!
//! Its centre fan mirrors the body's far cap and cancels it in the weld,
//! leaving the arc fans to close the gap between the rings.

use super::{check_radius, ring_angle, SegmentFrame};
use crate::error::ComponentError;
use crate::mesh::Mesh;

/// Creates a disc at `frame.z0` facing `-n`, bounded by a ring of `fine`
/// samples.
///
/// # Arguments
///
/// * `radius` - Disc radius, equal to the body radius
/// * `coarse` - Ring count of the body's far ring
/// * `fine` - Ring count of the head's base ring, a multiple of `coarse`
/// * `frame` - Axis placement of the head
///
/// # Errors
///
/// Returns [`ComponentError::InvalidDimensions`] when `fine` is not a
/// multiple of `coarse`, or `coarse < 3`.
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_seam_disc, SegmentFrame};
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let disc = build_seam_disc(0.5, 32, 64, &SegmentFrame::new(DVec3::ZERO, basis, 3.0)).unwrap();
/// assert_eq!(disc.vertex_count(), 65);
/// assert_eq!(disc.triangle_count(), 64);
/// ```
pub fn build_seam_disc(
    radius: f64,
    coarse: u32,
    fine: u32,
    frame: &SegmentFrame,
) -> Result<Mesh, ComponentError> {
    check_radius(radius)?;
    if coarse < 3 || fine < coarse || fine % coarse != 0 {
        return Err(ComponentError::invalid_dimensions(format!(
            "seam ring of {fine} samples cannot refine a ring of {coarse}"
        )));
    }

    let step = fine / coarse;
    let mut mesh = Mesh::with_capacity(fine as usize + 1, fine as usize);

    for k in 0..fine {
        mesh.add_vertex(frame.point(frame.z0, radius, ring_angle(k, fine)));
    }
    let center = mesh.add_vertex(frame.axis_point(frame.z0));

    let id = |k: u32| k % fine;

    for i in 0..coarse {
        let a = i * step;
        let b = a + step;
        mesh.add_triangle(center, id(b), id(a));
        for j in a + 1..b {
            mesh.add_triangle(id(a), id(j + 1), id(j));
        }
    }

    Ok(mesh)
}
