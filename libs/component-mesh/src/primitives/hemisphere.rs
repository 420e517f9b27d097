//! # Hemisphere Primitive
//!
//! Generates the head: a hemispherical cap whose axial extent is an
//! independent parameter, so it is a true hemisphere only when
//! `height == radius` and an ellipsoidal cap otherwise.

use super::{check_height, check_radius, ring_angle, SegmentFrame};
use crate::error::ComponentError;
use crate::mesh::Mesh;
use config::constants::{MAX_SEGMENTS, MIN_HEMISPHERE_PHI, MIN_HEMISPHERE_THETA};
use std::f64::consts::FRAC_PI_2;

/// Azimuthal sample count of a cap built with `segments`.
///
/// ```rust
/// use component_mesh::primitives::hemisphere_ring_samples;
///
/// assert_eq!(hemisphere_ring_samples(32), 64);
/// assert_eq!(hemisphere_ring_samples(2), 12);
/// ```
pub fn hemisphere_ring_samples(segments: u32) -> u32 {
    segments
        .min(MAX_SEGMENTS)
        .saturating_mul(2)
        .max(MIN_HEMISPHERE_THETA)
}

/// Creates a cap spanning `[frame.z0, frame.z0 + height]`.
///
/// # Arguments
///
/// * `radius` - Base ring radius, equal to the body radius
/// * `height` - Axial extent of the cap
/// * `segments` - Base resolution, capped at 360; `max(8, segments)` polar
///   steps and `max(12, 2·segments)` azimuthal samples
/// * `frame` - Axis placement
///
/// # Algorithm
///
/// Ring `k` sits at polar angle `φ = (π/2)·k/phi_res` with radius
/// `radius·cos φ` and axial offset `height·sin φ`. The last step reaches
/// the axis and is emitted as a single pole vertex closed by a fan rather
/// than a ring of coincident points.
///
/// The base ring is left open. In a component it is closed by
/// [`build_seam_disc`](super::build_seam_disc) against the body's far ring.
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_hemisphere, SegmentFrame};
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let head = build_hemisphere(0.5, 1.0, 8, &SegmentFrame::new(DVec3::ZERO, basis, 3.0)).unwrap();
/// // 8 rings of 16 samples plus the pole
/// assert_eq!(head.vertex_count(), 8 * 16 + 1);
/// assert_eq!(head.bounding_box().1.z, 4.0);
/// ```
pub fn build_hemisphere(
    radius: f64,
    height: f64,
    segments: u32,
    frame: &SegmentFrame,
) -> Result<Mesh, ComponentError> {
    check_radius(radius)?;
    check_height(height)?;

    let phi_res = segments.min(MAX_SEGMENTS).max(MIN_HEMISPHERE_PHI);
    let theta_res = hemisphere_ring_samples(segments);

    let ring_count = phi_res as usize * theta_res as usize;
    let mut mesh = Mesh::with_capacity(ring_count + 1, 2 * ring_count);

    for ip in 0..phi_res {
        let phi = FRAC_PI_2 * f64::from(ip) / f64::from(phi_res);
        let ring_radius = radius * phi.cos();
        let z = frame.z0 + height * phi.sin();
        for it in 0..theta_res {
            let theta = ring_angle(it, theta_res);
            mesh.add_vertex(frame.point(z, ring_radius, theta));
        }
    }

    let pole = mesh.add_vertex(frame.axis_point(frame.z0 + height));

    let id = |ip: u32, it: u32| ip * theta_res + it % theta_res;

    for ip in 0..phi_res - 1 {
        for it in 0..theta_res {
            let p00 = id(ip, it);
            let p01 = id(ip, it + 1);
            let p10 = id(ip + 1, it);
            let p11 = id(ip + 1, it + 1);

            mesh.add_triangle(p00, p01, p11);
            mesh.add_triangle(p00, p11, p10);
        }
    }

    let last = phi_res - 1;
    for it in 0..theta_res {
        mesh.add_triangle(id(last, it), id(last, it + 1), pole);
    }

    Ok(mesh)
}
