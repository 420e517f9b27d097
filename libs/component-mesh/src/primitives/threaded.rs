//! # Threaded Cylinder Primitive
//!
//! Generates the body with a single helical ridge. The relief is a sine
//! wave in `z/pitch - theta/2π`, scaled by a fade factor that is zero in a
//! flat zone at each end and ramps linearly to one across a fade zone, so
//! the body meets the neck and head with plain, unperturbed rings.

use super::{
    build_cylinder, check_height, check_radius, clamp_segments, ring_angle, SegmentFrame,
};
use crate::error::ComponentError;
use crate::mesh::Mesh;
use config::constants::{
    MAX_TRIANGLES, MAX_VERTICES, MIN_THREAD_THETA, THREAD_FADE_LENGTH, THREAD_FLAT_GAP,
    THREAD_Z_PER_TURN,
};
use std::f64::consts::TAU;

/// Thread parameters of a body segment.
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::ThreadSpec;
///
/// assert!(ThreadSpec::new(0.1, 20).is_active());
/// assert!(!ThreadSpec::new(0.0, 20).is_active());
/// assert!(!ThreadSpec::new(0.1, 0).is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadSpec {
    /// Peak radial offset of the ridge.
    pub depth: f64,
    /// Full revolutions of the helix over the body height.
    pub turns: u32,
    /// Thread-free length at each end.
    pub flat_gap: f64,
    /// Ramp length between the flat zone and full depth.
    pub fade_length: f64,
}

impl ThreadSpec {
    /// Creates a thread with the default flat and fade zone lengths.
    pub fn new(depth: f64, turns: u32) -> Self {
        Self {
            depth,
            turns,
            flat_gap: THREAD_FLAT_GAP,
            fade_length: THREAD_FADE_LENGTH,
        }
    }

    /// Overrides the end zone lengths.
    pub fn with_zones(self, flat_gap: f64, fade_length: f64) -> Self {
        Self {
            flat_gap,
            fade_length,
            ..self
        }
    }

    /// A thread is only cut when both depth and turns are positive.
    pub fn is_active(&self) -> bool {
        self.depth > 0.0 && self.turns > 0
    }
}

/// End treatment of a threaded body of a given height.
///
/// When both end zones do not fit (`2·(flat_gap + fade_length) ≥ height`)
/// they are scaled down by the same factor, keeping them symmetric and
/// non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadProfile {
    height: f64,
    flat_gap: f64,
    fade_length: f64,
}

impl ThreadProfile {
    pub fn new(height: f64, flat_gap: f64, fade_length: f64) -> Self {
        let needed = 2.0 * (flat_gap + fade_length);
        let scale = if needed >= height && needed > 0.0 {
            height / needed
        } else {
            1.0
        };
        Self {
            height,
            flat_gap: flat_gap * scale,
            fade_length: fade_length * scale,
        }
    }

    /// Flat zone length after scaling.
    pub fn flat_gap(&self) -> f64 {
        self.flat_gap
    }

    /// Fade zone length after scaling.
    pub fn fade_length(&self) -> f64 {
        self.fade_length
    }

    /// Thread amplitude factor at local offset `z` in `[0, height]`.
    ///
    /// Depends only on the distance to the nearer end, so
    /// `fade(z) == fade(height - z)`.
    pub fn fade(&self, z: f64) -> f64 {
        let from_end = z.min(self.height - z);
        let into_ramp = from_end - self.flat_gap;
        if self.fade_length <= 0.0 {
            return if into_ramp >= 0.0 { 1.0 } else { 0.0 };
        }
        (into_ramp / self.fade_length).clamp(0.0, 1.0)
    }
}

/// Samples per row of a threaded body built with `segments`.
///
/// ```rust
/// use component_mesh::primitives::thread_ring_samples;
///
/// assert_eq!(thread_ring_samples(8), 16);
/// assert_eq!(thread_ring_samples(32), 32);
/// ```
pub fn thread_ring_samples(segments: u32) -> u32 {
    clamp_segments(segments).max(MIN_THREAD_THETA)
}

/// Creates a helically threaded cylinder spanning
/// `[frame.z0, frame.z0 + height]`.
///
/// Falls back to [`build_cylinder`] when the thread is inactive.
///
/// # Algorithm
///
/// - `res_theta = max(16, segments)` samples per row
/// - `res_z = max(segments·turns·2, turns·16)` rows, plus one
/// - `r(z, θ) = radius + depth·sin(2π(z/pitch − θ/2π))·fade(z)`
/// - Quad grid split into two triangles per cell, fan caps at both ends
///
/// The cap rings are sampled at `z = 0` and `z = height`, inside the flat
/// zones, so they sit exactly on the nominal radius.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidDimensions`] when the grid would exceed
/// [`MAX_VERTICES`] or [`MAX_TRIANGLES`]; nothing is allocated in that case.
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_threaded_cylinder, SegmentFrame, ThreadSpec};
/// use component_mesh::AxisBasis;
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let frame = SegmentFrame::new(DVec3::ZERO, basis, 1.0);
/// let body = build_threaded_cylinder(0.5, 2.0, 16, &ThreadSpec::new(0.05, 4), &frame).unwrap();
/// // (128 + 1) rows of 16 samples plus two cap centres
/// assert_eq!(body.vertex_count(), 129 * 16 + 2);
/// ```
pub fn build_threaded_cylinder(
    radius: f64,
    height: f64,
    segments: u32,
    thread: &ThreadSpec,
    frame: &SegmentFrame,
) -> Result<Mesh, ComponentError> {
    if !thread.is_active() {
        return build_cylinder(radius, height, segments, frame);
    }

    check_radius(radius)?;
    check_height(height)?;

    let segments = clamp_segments(segments);
    let turns = thread.turns;
    let res_theta = thread_ring_samples(segments);
    let res_z = segments
        .saturating_mul(turns)
        .saturating_mul(2)
        .max(turns.saturating_mul(THREAD_Z_PER_TURN));
    let pitch = height / f64::from(turns);
    let profile = ThreadProfile::new(height, thread.flat_gap, thread.fade_length);

    let radius_at = |z_local: f64, theta: f64| -> f64 {
        let amplitude = thread.depth * profile.fade(z_local);
        if amplitude == 0.0 {
            return radius;
        }
        let phase = z_local / pitch - theta / TAU;
        radius + amplitude * (TAU * phase).sin()
    };

    debug_assert_eq!(profile.fade(0.0), 0.0, "near cap ring must be unthreaded");
    debug_assert_eq!(profile.fade(height), 0.0, "far cap ring must be unthreaded");

    let vertex_total = (u64::from(res_z) + 1) * u64::from(res_theta) + 2;
    let triangle_total = 2 * (u64::from(res_z) + 1) * u64::from(res_theta);
    if vertex_total > MAX_VERTICES as u64 || triangle_total > MAX_TRIANGLES as u64 {
        return Err(ComponentError::invalid_dimensions(format!(
            "threaded body with {turns} turns needs {vertex_total} vertices, limit is {MAX_VERTICES}"
        )));
    }
    let mut mesh = Mesh::with_capacity(vertex_total as usize, triangle_total as usize);

    for iz in 0..=res_z {
        let z_local = height * (f64::from(iz) / f64::from(res_z));
        let z = frame.z0 + z_local;
        for it in 0..res_theta {
            let theta = ring_angle(it, res_theta);
            mesh.add_vertex(frame.point(z, radius_at(z_local, theta), theta));
        }
    }

    let id = |iz: u32, it: u32| iz * res_theta + it % res_theta;

    for iz in 0..res_z {
        for it in 0..res_theta {
            let p00 = id(iz, it);
            let p01 = id(iz, it + 1);
            let p10 = id(iz + 1, it);
            let p11 = id(iz + 1, it + 1);

            mesh.add_triangle(p00, p01, p11);
            mesh.add_triangle(p00, p11, p10);
        }
    }

    let near_center = mesh.add_vertex(frame.axis_point(frame.z0));
    let far_center = mesh.add_vertex(frame.axis_point(frame.z0 + height));

    for it in 0..res_theta {
        mesh.add_triangle(near_center, id(0, it + 1), id(0, it));
        mesh.add_triangle(far_center, id(res_z, it), id(res_z, it + 1));
    }

    Ok(mesh)
}
