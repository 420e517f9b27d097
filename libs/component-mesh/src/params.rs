//! # Component Parameters
//!
//! The caller-owned parameter bag read by every build.

use config::constants::{DEFAULT_BODY_RADIUS, DEFAULT_RESOLUTION};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Sentinel for heights and the neck top radius meaning "not set".
pub const UNSET: f64 = -1.0;

/// Shape parameters of a component.
///
/// Heights and `base_top_radius` use any value `<= 0` to mean "unset";
/// the build substitutes a default. Missing JSON fields take the values of
/// [`ComponentParameters::default`].
///
/// # Example
///
/// ```rust
/// use component_mesh::ComponentParameters;
///
/// let params: ComponentParameters =
///     serde_json::from_str(r#"{ "body_radius": 0.5, "thread_turns": 12 }"#).unwrap();
/// assert_eq!(params.body_radius, 0.5);
/// assert_eq!(params.thread_turns, 12);
/// assert_eq!(params.resolution, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentParameters {
    /// Anchor at the neck end.
    pub start: DVec3,
    /// Anchor fixing the axis direction.
    pub end: DVec3,
    pub neck_height: f64,
    pub body_height: f64,
    pub head_height: f64,
    /// Neck radius at the start end; must exceed the body radius.
    pub base_top_radius: f64,
    pub body_radius: f64,
    /// Stored resolution; overrides the build argument when above 3.
    pub resolution: i32,
    pub thread_depth: f64,
    pub thread_turns: i32,
}

impl Default for ComponentParameters {
    fn default() -> Self {
        Self {
            start: DVec3::ZERO,
            end: DVec3::Z,
            neck_height: UNSET,
            body_height: UNSET,
            head_height: UNSET,
            base_top_radius: UNSET,
            body_radius: DEFAULT_BODY_RADIUS,
            resolution: DEFAULT_RESOLUTION,
            thread_depth: 0.0,
            thread_turns: 0,
        }
    }
}

impl ComponentParameters {
    /// Axis vector from `start` to `end`.
    pub fn direction(&self) -> DVec3 {
        self.end - self.start
    }

    /// Whether the body would be threaded.
    pub fn is_threaded(&self) -> bool {
        self.thread_depth > 0.0 && self.thread_turns > 0
    }
}
