//! # Frustum Primitive
//!
//! Generates the neck: a conical frustum between two coaxial rings, closed
//! by a fan at each end.

use super::{check_height, check_radius, clamp_segments, ring_angle, SegmentFrame};
use crate::error::ComponentError;
use crate::mesh::Mesh;

/// Creates a frustum spanning `[frame.z0, frame.z0 + height]`.
///
/// # Arguments
///
/// * `near_radius` - Ring radius at `z0` (the component's start end)
/// * `far_radius` - Ring radius at `z0 + height`
/// * `height` - Axial extent
/// * `segments` - Samples per ring, clamped to `8..=360`
/// * `frame` - Axis placement
///
/// # Layout
///
/// Ring vertices are interleaved (`2i` near, `2i + 1` far), followed by the
/// near and far cap centres. Both caps are emitted even when a radius is
/// large, so the construction is the same for every input.
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_frustum, SegmentFrame};
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let frame = SegmentFrame::new(DVec3::ZERO, basis, 0.0);
/// let neck = build_frustum(0.6, 0.5, 1.0, 32, &frame).unwrap();
/// assert_eq!(neck.vertex_count(), 66);
/// assert_eq!(neck.triangle_count(), 128);
/// ```
pub fn build_frustum(
    near_radius: f64,
    far_radius: f64,
    height: f64,
    segments: u32,
    frame: &SegmentFrame,
) -> Result<Mesh, ComponentError> {
    check_radius(near_radius)?;
    check_radius(far_radius)?;
    check_height(height)?;

    let segments = clamp_segments(segments);
    let z_near = frame.z0;
    let z_far = frame.z0 + height;

    let mut mesh = Mesh::with_capacity(2 * segments as usize + 2, 4 * segments as usize);

    for i in 0..segments {
        let theta = ring_angle(i, segments);
        mesh.add_vertex(frame.point(z_near, near_radius, theta));
        mesh.add_vertex(frame.point(z_far, far_radius, theta));
    }

    let near_center = mesh.add_vertex(frame.axis_point(z_near));
    let far_center = mesh.add_vertex(frame.axis_point(z_far));

    for i in 0..segments {
        let n0 = 2 * i;
        let f0 = n0 + 1;
        let n1 = 2 * ((i + 1) % segments);
        let f1 = n1 + 1;

        // Side quad
        mesh.add_triangle(n0, n1, f1);
        mesh.add_triangle(n0, f1, f0);

        // Near cap faces -n, far cap faces +n
        mesh.add_triangle(near_center, n1, n0);
        mesh.add_triangle(far_center, f0, f1);
    }

    Ok(mesh)
}
