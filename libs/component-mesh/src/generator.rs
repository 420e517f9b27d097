//! # Component Generator
//!
//! Validates parameters, resolves defaults, places the three segments along
//! the axis, and welds them into one mesh.
//!
//! [`generate`] is the pure core. [`ComponentGenerator`] layers the setter
//! API and last-good mesh retention on top of it.
//!
//! ## Segment placement
//!
//! Offsets are measured from `start` along the axis and chained exactly,
//! so each segment begins at the very value the previous one ends at:
//!
//! | Segment | Interval |
//! |---------|----------|
//! | neck | `[0, neck)` |
//! | body | `[neck, neck + body)` |
//! | head | `[neck + body, neck + body + head)` |
//!
//! ## Closure
//!
//! Neck, body and head share one ring count at each joint, except the
//! head's base ring, which is twice as fine. A seam disc placed with the
//! head reconciles the two, so after welding every edge borders exactly
//! two triangles.

use crate::assembler::{MeshAssembler, WeldStats};
use crate::basis::AxisBasis;
use crate::config::GeneratorConfig;
use crate::error::ComponentError;
use crate::mesh::Mesh;
use crate::params::ComponentParameters;
use crate::primitives::{
    build_cylinder, build_frustum, build_hemisphere, build_seam_disc, build_threaded_cylinder,
    hemisphere_ring_samples, thread_ring_samples, SegmentFrame, ThreadSpec,
};
use config::constants::{
    negligible, resolve_segments, DEFAULT_BODY_HEIGHT, DEFAULT_HEAD_HEIGHT, DEFAULT_NECK_HEIGHT,
    THREAD_DEPTH_LIMIT, TOP_RADIUS_FLARE, TOP_RADIUS_MIN_FLARE,
};
use glam::DVec3;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Shape of the body segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyProfile {
    Plain,
    Threaded { depth: f64, turns: u32 },
}

/// The values a build actually used after defaults and fallbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDimensions {
    pub segments: u32,
    pub neck_height: f64,
    pub body_height: f64,
    pub head_height: f64,
    /// Neck radius at the start end.
    pub top_radius: f64,
    pub body_radius: f64,
    pub body: BodyProfile,
}

impl ResolvedDimensions {
    /// Axial length of the whole component.
    pub fn total_height(&self) -> f64 {
        self.neck_height + self.body_height + self.head_height
    }

    /// Ring count at both body joints.
    ///
    /// A threaded body samples at least 16 points per row, and the neck
    /// and head follow it so the rings meet vertex for vertex.
    pub fn seam_segments(&self) -> u32 {
        match self.body {
            BodyProfile::Plain => self.segments,
            BodyProfile::Threaded { .. } => thread_ring_samples(self.segments),
        }
    }
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub dimensions: ResolvedDimensions,
    pub mesh: Arc<Mesh>,
    pub weld: WeldStats,
}

fn height_or_default(value: f64, default: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        default
    }
}

fn check_resolved_height(name: &str, value: f64, tolerance: f64) -> Result<(), ComponentError> {
    if negligible(value, tolerance) || !value.is_finite() {
        return Err(ComponentError::invalid_dimensions(format!(
            "{name} height must exceed {tolerance}: {value}"
        )));
    }
    Ok(())
}

/// Resolves the dimensions of a build without building anything.
///
/// # Errors
///
/// - [`ComponentError::InvalidRadius`] if `radius` is not larger than the
///   tolerance
/// - [`ComponentError::InvalidDimensions`] if a resolved height is not
///   larger than the tolerance
///
/// A thread deeper than 90% of the body radius is clamped to that depth.
///
/// # Example
///
/// ```rust
/// use component_mesh::config::GeneratorConfig;
/// use component_mesh::{resolve_dimensions, BodyProfile, ComponentParameters};
///
/// let dims = resolve_dimensions(&ComponentParameters::default(), 0.5, 16, &GeneratorConfig::default())
///     .unwrap();
/// assert_eq!((dims.neck_height, dims.body_height, dims.head_height), (1.0, 2.0, 1.0));
/// assert_eq!(dims.segments, 32);
/// assert!(dims.top_radius > 0.5);
/// assert_eq!(dims.body, BodyProfile::Plain);
/// ```
pub fn resolve_dimensions(
    params: &ComponentParameters,
    radius: f64,
    resolution: i32,
    config: &GeneratorConfig,
) -> Result<ResolvedDimensions, ComponentError> {
    let tolerance = config.tolerance;

    if negligible(radius, tolerance) || !radius.is_finite() {
        return Err(ComponentError::invalid_radius(radius));
    }

    let segments = resolve_segments(params.resolution, resolution);

    let neck_height = height_or_default(params.neck_height, DEFAULT_NECK_HEIGHT);
    let body_height = height_or_default(params.body_height, DEFAULT_BODY_HEIGHT);
    let head_height = height_or_default(params.head_height, DEFAULT_HEAD_HEIGHT);
    check_resolved_height("neck", neck_height, tolerance)?;
    check_resolved_height("body", body_height, tolerance)?;
    check_resolved_height("head", head_height, tolerance)?;

    let mut top_radius = if params.base_top_radius.is_finite() && params.base_top_radius > radius {
        params.base_top_radius
    } else {
        radius * TOP_RADIUS_FLARE
    };
    if top_radius <= radius {
        top_radius = radius * TOP_RADIUS_MIN_FLARE;
    }

    let body = match u32::try_from(params.thread_turns) {
        Ok(turns) if turns > 0 && params.thread_depth > 0.0 => {
            let limit = radius * THREAD_DEPTH_LIMIT;
            let depth = if params.thread_depth > limit {
                warn!(
                    requested = params.thread_depth,
                    depth = limit,
                    "thread depth clamped below body radius"
                );
                limit
            } else {
                params.thread_depth
            };
            BodyProfile::Threaded { depth, turns }
        }
        _ => BodyProfile::Plain,
    };

    Ok(ResolvedDimensions {
        segments,
        neck_height,
        body_height,
        head_height,
        top_radius,
        body_radius: radius,
        body,
    })
}

/// Builds the component mesh for `params` with the given radius and
/// resolution overrides.
///
/// Checks run in a fixed order: axis, radius, dimensions.
///
/// # Example
///
/// ```rust
/// use component_mesh::config::GeneratorConfig;
/// use component_mesh::{generate, ComponentParameters};
///
/// let report = generate(&ComponentParameters::default(), 0.5, 32, &GeneratorConfig::default())
///     .unwrap();
/// let (min, max) = report.mesh.bounding_box();
/// assert_eq!((min.z, max.z), (0.0, 4.0));
/// ```
#[instrument(skip(params, config))]
pub fn generate(
    params: &ComponentParameters,
    radius: f64,
    resolution: i32,
    config: &GeneratorConfig,
) -> Result<BuildReport, ComponentError> {
    let basis = AxisBasis::from_direction(params.direction(), config.tolerance)?;
    let dims = resolve_dimensions(params, radius, resolution, config)?;
    debug!(?dims, "resolved component dimensions");

    let neck_frame = SegmentFrame::new(params.start, basis, 0.0);
    let body_frame = neck_frame.at(dims.neck_height);
    let head_frame = body_frame.at(body_frame.z0 + dims.body_height);
    let seam = dims.seam_segments();

    let neck = build_frustum(
        dims.top_radius,
        dims.body_radius,
        dims.neck_height,
        seam,
        &neck_frame,
    )?;

    let body = match dims.body {
        BodyProfile::Plain => {
            build_cylinder(dims.body_radius, dims.body_height, dims.segments, &body_frame)?
        }
        BodyProfile::Threaded { depth, turns } => {
            let thread = ThreadSpec::new(depth, turns).with_zones(config.flat_gap, config.fade_length);
            build_threaded_cylinder(
                dims.body_radius,
                dims.body_height,
                dims.segments,
                &thread,
                &body_frame,
            )?
        }
    };

    let seam_disc = build_seam_disc(
        dims.body_radius,
        seam,
        hemisphere_ring_samples(seam),
        &head_frame,
    )?;
    let head = build_hemisphere(dims.body_radius, dims.head_height, seam, &head_frame)?;

    let mut assembler = MeshAssembler::new(config.tolerance);
    assembler
        .push(&neck)
        .push(&body)
        .push(&seam_disc)
        .push(&head);
    let (mut mesh, weld) = assembler.finish();
    mesh.compute_normals();

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        merged = weld.merged_vertices,
        dropped = weld.dropped_degenerate,
        culled = weld.culled_internal,
        "assembled component mesh"
    );

    Ok(BuildReport {
        dimensions: dims,
        mesh: Arc::new(mesh),
        weld,
    })
}

/// Stateful generator holding the parameters and the last good build.
///
/// A failed build returns the error and leaves the stored mesh untouched,
/// so [`mesh`] keeps returning the previous result.
///
/// [`mesh`]: ComponentGenerator::mesh
///
/// # Example
///
/// ```rust
/// use component_mesh::ComponentGenerator;
/// use glam::DVec3;
///
/// let mut generator = ComponentGenerator::new();
/// generator.set_base_top_radius(0.6);
/// generator.build_actor(0.5, 32).unwrap();
/// let first = generator.shared_mesh().unwrap();
///
/// generator.set_end_point(DVec3::ZERO);
/// assert!(generator.build_actor(0.5, 32).is_err());
/// assert_eq!(generator.mesh(), Some(&*first));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ComponentGenerator {
    params: ComponentParameters,
    config: GeneratorConfig,
    last: Option<BuildReport>,
}

impl ComponentGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn parameters(&self) -> &ComponentParameters {
        &self.params
    }

    pub fn set_parameters(&mut self, params: ComponentParameters) {
        self.params = params;
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_start_point(&mut self, point: DVec3) {
        self.params.start = point;
    }

    pub fn set_end_point(&mut self, point: DVec3) {
        self.params.end = point;
    }

    pub fn set_neck_height(&mut self, height: f64) {
        self.params.neck_height = height;
    }

    pub fn set_body_height(&mut self, height: f64) {
        self.params.body_height = height;
    }

    pub fn set_head_height(&mut self, height: f64) {
        self.params.head_height = height;
    }

    pub fn set_base_top_radius(&mut self, radius: f64) {
        self.params.base_top_radius = radius;
    }

    pub fn set_body_radius(&mut self, radius: f64) {
        self.params.body_radius = radius;
    }

    pub fn set_resolution(&mut self, resolution: i32) {
        self.params.resolution = resolution;
    }

    pub fn set_thread_depth(&mut self, depth: f64) {
        self.params.thread_depth = depth;
    }

    pub fn set_thread_turns(&mut self, turns: i32) {
        self.params.thread_turns = turns;
    }

    /// Builds with explicit radius and resolution overrides.
    ///
    /// A stored resolution above 3 still wins over `resolution`.
    #[instrument(skip(self))]
    pub fn build_actor(&mut self, radius: f64, resolution: i32) -> Result<BuildReport, ComponentError> {
        match generate(&self.params, radius, resolution, &self.config) {
            Ok(report) => {
                self.last = Some(report.clone());
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "component build rejected, keeping previous mesh");
                Err(err)
            }
        }
    }

    /// Builds with the stored body radius and the configured default
    /// resolution.
    pub fn build(&mut self) -> Result<BuildReport, ComponentError> {
        self.build_actor(self.params.body_radius, self.config.default_resolution)
    }

    /// Mesh of the last successful build.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.last.as_ref().map(|report| report.mesh.as_ref())
    }

    /// Shared handle to the mesh of the last successful build.
    pub fn shared_mesh(&self) -> Option<Arc<Mesh>> {
        self.last.as_ref().map(|report| Arc::clone(&report.mesh))
    }

    /// Dimensions used by the last successful build.
    pub fn last_dimensions(&self) -> Option<&ResolvedDimensions> {
        self.last.as_ref().map(|report| &report.dimensions)
    }

    pub fn last_report(&self) -> Option<&BuildReport> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn resolve(params: &ComponentParameters, radius: f64, resolution: i32) -> ResolvedDimensions {
        resolve_dimensions(params, radius, resolution, &GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_default_heights() {
        let dims = resolve(&ComponentParameters::default(), 0.5, 32);
        assert_eq!(dims.neck_height, 1.0);
        assert_eq!(dims.body_height, 2.0);
        assert_eq!(dims.head_height, 1.0);
        assert_eq!(dims.total_height(), 4.0);
    }

    #[test]
    fn test_explicit_heights_kept() {
        let params = ComponentParameters {
            neck_height: 0.3,
            body_height: 5.0,
            head_height: 0.7,
            ..Default::default()
        };
        let dims = resolve(&params, 0.5, 32);
        assert_eq!((dims.neck_height, dims.body_height, dims.head_height), (0.3, 5.0, 0.7));
    }

    #[test]
    fn test_tiny_height_rejected() {
        let params = ComponentParameters {
            body_height: 1e-7,
            ..Default::default()
        };
        let err = resolve_dimensions(&params, 0.5, 32, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_top_radius_fallbacks() {
        let mut params = ComponentParameters {
            base_top_radius: 0.6,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, 32).top_radius, 0.6);

        params.base_top_radius = 0.4;
        assert_relative_eq!(resolve(&params, 0.5, 32).top_radius, 0.55, epsilon = 1e-12);

        params.base_top_radius = 0.5;
        assert_relative_eq!(resolve(&params, 0.5, 32).top_radius, 0.55, epsilon = 1e-12);

        params.base_top_radius = f64::INFINITY;
        assert_relative_eq!(resolve(&params, 0.5, 32).top_radius, 0.55, epsilon = 1e-12);
    }

    #[test]
    fn test_stored_resolution_overrides_argument() {
        let mut params = ComponentParameters {
            resolution: 48,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, 16).segments, 48);

        params.resolution = 3;
        assert_eq!(resolve(&params, 0.5, 16).segments, 16);
        assert_eq!(resolve(&params, 0.5, 2).segments, 8);
    }

    #[test]
    fn test_body_profile() {
        let mut params = ComponentParameters {
            thread_depth: 0.05,
            thread_turns: 10,
            ..Default::default()
        };
        assert_eq!(
            resolve(&params, 0.5, 32).body,
            BodyProfile::Threaded {
                depth: 0.05,
                turns: 10
            }
        );

        params.thread_turns = 0;
        assert_eq!(resolve(&params, 0.5, 32).body, BodyProfile::Plain);

        params.thread_turns = -4;
        assert_eq!(resolve(&params, 0.5, 32).body, BodyProfile::Plain);
    }

    #[test]
    fn test_thread_depth_clamped_below_radius() {
        for depth in [0.45, 0.5, 2.0, f64::INFINITY] {
            let params = ComponentParameters {
                thread_depth: depth,
                thread_turns: 4,
                ..Default::default()
            };
            match resolve(&params, 0.5, 32).body {
                BodyProfile::Threaded { depth, turns } => {
                    assert_relative_eq!(depth, 0.45, epsilon = 1e-12);
                    assert_eq!(turns, 4);
                }
                BodyProfile::Plain => panic!("thread of depth {depth} dropped"),
            }
        }
    }

    #[test]
    fn test_deep_thread_builds_closed_mesh() {
        let params = ComponentParameters {
            thread_depth: 0.5,
            thread_turns: 4,
            ..Default::default()
        };
        let report = generate(&params, 0.5, 16, &GeneratorConfig::default()).unwrap();
        assert!(report.mesh.validate());
        assert!(report.mesh.is_closed_manifold());
    }

    #[test]
    fn test_nan_thread_depth_is_plain() {
        let params = ComponentParameters {
            thread_depth: f64::NAN,
            thread_turns: 4,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, 32).body, BodyProfile::Plain);
    }

    #[test]
    fn test_seam_segments_follow_body() {
        let mut params = ComponentParameters {
            resolution: 0,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, 8).seam_segments(), 8);

        params.thread_depth = 0.05;
        params.thread_turns = 3;
        assert_eq!(resolve(&params, 0.5, 8).seam_segments(), 16);
        assert_eq!(resolve(&params, 0.5, 32).seam_segments(), 32);
    }

    #[test]
    fn test_huge_thread_turns_rejected() {
        let params = ComponentParameters {
            thread_depth: 0.05,
            thread_turns: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            generate(&params, 0.5, 32, &GeneratorConfig::default()),
            Err(ComponentError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_huge_resolution_clamped() {
        let params = ComponentParameters {
            resolution: i32::MAX,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, 32).segments, 360);

        let params = ComponentParameters {
            resolution: 0,
            ..Default::default()
        };
        assert_eq!(resolve(&params, 0.5, i32::MAX).segments, 360);
    }

    #[test]
    fn test_error_order() {
        let config = GeneratorConfig::default();
        let params = ComponentParameters {
            end: DVec3::ZERO,
            body_height: 1e-9,
            ..Default::default()
        };
        assert!(matches!(
            generate(&params, 0.0, 32, &config),
            Err(ComponentError::DegenerateAxis { .. })
        ));

        let params = ComponentParameters {
            end: DVec3::Z,
            ..params
        };
        assert!(matches!(
            generate(&params, 0.0, 32, &config),
            Err(ComponentError::InvalidRadius { .. })
        ));
        assert!(matches!(
            generate(&params, 0.5, 32, &config),
            Err(ComponentError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_generator_setters() {
        let mut generator = ComponentGenerator::new();
        generator.set_start_point(DVec3::ONE);
        generator.set_end_point(DVec3::new(1.0, 1.0, 2.0));
        generator.set_neck_height(0.5);
        generator.set_body_height(1.5);
        generator.set_head_height(0.25);
        generator.set_base_top_radius(0.8);
        generator.set_body_radius(0.6);
        generator.set_resolution(12);
        generator.set_thread_depth(0.02);
        generator.set_thread_turns(3);

        let params = generator.parameters();
        assert_eq!(params.start, DVec3::ONE);
        assert_eq!(params.neck_height, 0.5);
        assert_eq!(params.base_top_radius, 0.8);
        assert_eq!(params.resolution, 12);
        assert_eq!(params.thread_turns, 3);
        assert!(generator.mesh().is_none());
    }

    #[test]
    fn test_build_uses_stored_radius_and_default_resolution() {
        let mut generator = ComponentGenerator::new();
        generator.set_resolution(0);
        generator.set_body_radius(0.75);
        let report = generator.build().unwrap();
        assert_eq!(report.dimensions.body_radius, 0.75);
        assert_eq!(report.dimensions.segments, 32);
        assert_eq!(generator.last_dimensions(), Some(&report.dimensions));
    }

    #[test]
    fn test_failed_build_keeps_previous_mesh() {
        let mut generator = ComponentGenerator::new();
        generator.build_actor(0.5, 16).unwrap();
        let before = generator.shared_mesh().unwrap();
        let dims = *generator.last_dimensions().unwrap();

        assert!(generator.build_actor(-1.0, 16).is_err());
        let after = generator.shared_mesh().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(generator.last_dimensions(), Some(&dims));
    }

    #[test]
    fn test_successful_build_replaces_mesh() {
        let mut generator = ComponentGenerator::new();
        generator.build_actor(0.5, 16).unwrap();
        let first = generator.shared_mesh().unwrap();

        generator.set_body_height(3.0);
        generator.build_actor(0.5, 16).unwrap();
        let second = generator.shared_mesh().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        // Handed-out meshes are not modified by later builds
        assert_eq!(first.bounding_box().1.z, 4.0);
        assert_eq!(second.bounding_box().1.z, 5.0);
    }
}
