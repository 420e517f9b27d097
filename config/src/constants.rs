//! # Configuration Constants
//!
//! Centralized constants for the component generator. All tolerances,
//! default dimensions, tessellation minimums, and thread zone lengths are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Dimensions**: Fallback heights and neck flare factors
//! - **Resolution**: Segment count minimums per shape builder
//! - **Thread**: Flat and fade zone lengths of the helical relief
//! - **Limits**: Upper bounds on segments and generated part size

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance used to reject degenerate builds.
///
/// An axis shorter than this, or a radius/height not larger than this, is
/// treated as zero.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// let axis_length: f64 = 1e-7;
/// assert!(axis_length <= EPSILON);
/// ```
pub const EPSILON: f64 = 1e-6;

/// Tolerance for vertex welding.
///
/// Two vertices closer than this are merged into one when segment meshes
/// are assembled. Seam rings are constructed to coincide exactly, so this
/// only absorbs floating-point drift.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// fn vertices_should_merge(v1: [f64; 3], v2: [f64; 3]) -> bool {
///     let dx = v1[0] - v2[0];
///     let dy = v1[1] - v2[1];
///     let dz = v1[2] - v2[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() <= VERTEX_MERGE_EPSILON
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [0.0, 0.0, 1e-9]));
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1e-6;

// =============================================================================
// DIMENSION CONSTANTS
// =============================================================================

/// Neck height used when the caller leaves it unset (sentinel `<= 0`).
pub const DEFAULT_NECK_HEIGHT: f64 = 1.0;

/// Body height used when the caller leaves it unset (sentinel `<= 0`).
pub const DEFAULT_BODY_HEIGHT: f64 = 2.0;

/// Head height used when the caller leaves it unset (sentinel `<= 0`).
pub const DEFAULT_HEAD_HEIGHT: f64 = 1.0;

/// Body radius used by a freshly created parameter set.
pub const DEFAULT_BODY_RADIUS: f64 = 1.0;

/// Neck top radius factor applied when no usable top radius is given.
///
/// # Example
///
/// ```rust
/// use config::constants::TOP_RADIUS_FLARE;
///
/// let body_radius = 0.5;
/// assert!(body_radius * TOP_RADIUS_FLARE > body_radius);
/// ```
pub const TOP_RADIUS_FLARE: f64 = 1.1;

/// Last-resort neck flare, used if the primary fallback still does not
/// exceed the body radius.
pub const TOP_RADIUS_MIN_FLARE: f64 = 1.05;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Resolution used when the caller does not pass one explicitly.
pub const DEFAULT_RESOLUTION: i32 = 32;

/// Minimum number of angular segments for any ring.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SEGMENTS;
///
/// let requested = 3;
/// assert_eq!(requested.max(MIN_SEGMENTS), 8);
/// ```
pub const MIN_SEGMENTS: u32 = 8;

/// A stored resolution must exceed this value to override the build
/// argument.
pub const RESOLUTION_OVERRIDE_THRESHOLD: i32 = 3;

/// Minimum angular resolution of the threaded body.
pub const MIN_THREAD_THETA: u32 = 16;

/// Minimum number of axial rows per thread turn.
pub const THREAD_Z_PER_TURN: u32 = 16;

/// Minimum number of polar steps of the head cap.
pub const MIN_HEMISPHERE_PHI: u32 = 8;

/// Minimum number of azimuthal steps of the head cap.
pub const MIN_HEMISPHERE_THETA: u32 = 12;

// =============================================================================
// THREAD CONSTANTS
// =============================================================================

/// Length of the thread-free zone at each end of the threaded body.
pub const THREAD_FLAT_GAP: f64 = 0.25;

/// Length of the zone over which the thread ramps from zero to full depth.
pub const THREAD_FADE_LENGTH: f64 = 0.2;

/// Largest thread depth as a fraction of the body radius. Deeper threads
/// are clamped so the profile never reaches the axis.
pub const THREAD_DEPTH_LIMIT: f64 = 0.9;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of angular segments for any ring.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_SEGMENTS, MIN_SEGMENTS};
///
/// let requested: u32 = 100_000;
/// assert_eq!(requested.clamp(MIN_SEGMENTS, MAX_SEGMENTS), 360);
/// ```
pub const MAX_SEGMENTS: u32 = 360;

/// Maximum number of vertices in a single generated part.
///
/// Safety limit to prevent memory exhaustion from extreme thread settings.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles in a single generated part.
pub const MAX_TRIANGLES: usize = 10_000_000;

// =============================================================================
// GLOBAL CONFIGURATION
// =============================================================================

/// Immutable snapshot of generator settings that can be shared between
/// crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Numeric tolerance for degeneracy checks and welding.
    pub tolerance: f64,
    /// Resolution used when none is given by the caller.
    pub default_resolution: i32,
    /// Thread-free zone length at each end of the threaded body.
    pub flat_gap: f64,
    /// Thread fade-in/fade-out zone length.
    pub fade_length: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 24, 0.25, 0.2).expect("valid config");
    /// assert_eq!(cfg.default_resolution, 24);
    /// ```
    pub fn new(
        tolerance: f64,
        default_resolution: i32,
        flat_gap: f64,
        fade_length: f64,
    ) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if default_resolution < 3 {
            return Err(ConfigError::InvalidSegments(default_resolution));
        }
        if flat_gap.is_nan() || flat_gap < 0.0 || fade_length.is_nan() || fade_length <= 0.0 {
            return Err(ConfigError::InvalidThreadZone {
                flat_gap,
                fade_length,
            });
        }
        Ok(Self {
            tolerance,
            default_resolution,
            flat_gap,
            fade_length,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            default_resolution: DEFAULT_RESOLUTION,
            flat_gap: THREAD_FLAT_GAP,
            fade_length: THREAD_FADE_LENGTH,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative, or NaN.
    InvalidTolerance(f64),
    /// Raised when the default resolution is too small to form a polygon.
    InvalidSegments(i32),
    /// Raised when the thread zone lengths cannot produce a fade ramp.
    InvalidThreadZone { flat_gap: f64, fade_length: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "default_resolution must be >= 3: {value}")
            }
            ConfigError::InvalidThreadZone {
                flat_gap,
                fade_length,
            } => write!(
                f,
                "thread zones need flat_gap >= 0 and fade_length > 0: {flat_gap}, {fade_length}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Resolves the angular segment count of a build.
///
/// A stored resolution above [`RESOLUTION_OVERRIDE_THRESHOLD`] wins over the
/// argument; the result is clamped to [`MIN_SEGMENTS`]..=[`MAX_SEGMENTS`].
///
/// # Example
///
/// ```rust
/// use config::constants::resolve_segments;
///
/// assert_eq!(resolve_segments(48, 16), 48);
/// assert_eq!(resolve_segments(0, 16), 16);
/// assert_eq!(resolve_segments(0, 4), 8);
/// assert_eq!(resolve_segments(i32::MAX, 16), 360);
/// ```
pub fn resolve_segments(stored: i32, argument: i32) -> u32 {
    let requested = if stored > RESOLUTION_OVERRIDE_THRESHOLD {
        stored
    } else {
        argument
    };
    u32::try_from(requested)
        .unwrap_or(0)
        .clamp(MIN_SEGMENTS, MAX_SEGMENTS)
}

/// Checks if a value is not larger than `tolerance`.
///
/// # Example
///
/// ```rust
/// use config::constants::{negligible, EPSILON};
///
/// assert!(negligible(1e-7, EPSILON));
/// assert!(negligible(-3.0, EPSILON));
/// assert!(!negligible(0.1, EPSILON));
/// ```
#[inline]
pub fn negligible(value: f64, tolerance: f64) -> bool {
    value.is_nan() || value <= tolerance
}
