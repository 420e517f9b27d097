//! Generator-level configuration helpers building on the shared `config` crate.
//!
//! The module wraps the workspace configuration so builders can stay
//! decoupled from literal constants.

use config::constants::{
    ConfigError, GlobalConfig, DEFAULT_RESOLUTION, EPSILON, THREAD_FADE_LENGTH, THREAD_FLAT_GAP,
};

/// Component generator configuration wrapper.
///
/// # Examples
/// ```
/// use component_mesh::config::GeneratorConfig;
/// let cfg = GeneratorConfig::default();
/// assert!(cfg.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Degeneracy and weld tolerance.
    pub tolerance: f64,
    /// Resolution used by [`ComponentGenerator::build`].
    ///
    /// [`ComponentGenerator::build`]: crate::ComponentGenerator::build
    pub default_resolution: i32,
    /// Thread-free zone length at each body end.
    pub flat_gap: f64,
    /// Thread ramp length.
    pub fade_length: f64,
}

impl GeneratorConfig {
    /// Creates a new configuration from explicit values.
    ///
    /// # Examples
    /// ```
    /// use component_mesh::config::GeneratorConfig;
    /// let cfg = GeneratorConfig::new(1.0e-8, 48, 0.25, 0.2).unwrap();
    /// assert_eq!(cfg.default_resolution, 48);
    /// ```
    pub fn new(
        tolerance: f64,
        default_resolution: i32,
        flat_gap: f64,
        fade_length: f64,
    ) -> Result<Self, ConfigError> {
        GlobalConfig::new(tolerance, default_resolution, flat_gap, fade_length).map(Self::from)
    }
}

impl From<GlobalConfig> for GeneratorConfig {
    fn from(cfg: GlobalConfig) -> Self {
        Self {
            tolerance: cfg.tolerance,
            default_resolution: cfg.default_resolution,
            flat_gap: cfg.flat_gap,
            fade_length: cfg.fade_length,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            default_resolution: DEFAULT_RESOLUTION,
            flat_gap: THREAD_FLAT_GAP,
            fade_length: THREAD_FADE_LENGTH,
        }
    }
}
