//! WASM-facing entry points for the component mesh generator.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests use the `_internal` helpers, which expose
//! Rust error types directly instead of `JsValue`.
//!
//! ```
//! use component_wasm::ComponentCreator;
//!
//! let mut creator = ComponentCreator::new();
//! creator.set_base_top_radius(0.6);
//! assert!(creator.build_actor(0.5, 32));
//! assert!(creator.mesh().is_some());
//! ```

use component_mesh::{BuildReport, ComponentError, ComponentGenerator, ComponentParameters};
use config::constants::DEFAULT_RESOLUTION;
use glam::DVec3;
use wasm_bindgen::prelude::*;

mod mesh_handle;

pub use mesh_handle::MeshHandle;

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "component-wasm";
/// // init_panic_hook();
/// ```
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Returns the resolution used when the host does not choose one.
///
/// # Examples
/// ```
/// let resolution = component_wasm::default_resolution();
/// assert!(resolution >= 3);
/// ```
#[wasm_bindgen]
pub fn default_resolution() -> i32 {
    DEFAULT_RESOLUTION
}

/// Setter-style component builder exposed to JavaScript.
///
/// Failed builds return `false`; the reason is available from
/// [`last_error`](ComponentCreator::last_error) and the previous mesh stays
/// in place.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const creator = new ComponentCreator();
/// // creator.set_start_point(0, 0, 0);
/// // creator.set_end_point(0, 0, 1);
/// // if (!creator.build_actor(0.5, 32)) console.error(creator.last_error());
/// ```
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct ComponentCreator {
    generator: ComponentGenerator,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl ComponentCreator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start_point(&mut self, x: f64, y: f64, z: f64) {
        self.generator.set_start_point(DVec3::new(x, y, z));
    }

    pub fn set_end_point(&mut self, x: f64, y: f64, z: f64) {
        self.generator.set_end_point(DVec3::new(x, y, z));
    }

    pub fn set_neck_height(&mut self, height: f64) {
        self.generator.set_neck_height(height);
    }

    pub fn set_body_height(&mut self, height: f64) {
        self.generator.set_body_height(height);
    }

    pub fn set_head_height(&mut self, height: f64) {
        self.generator.set_head_height(height);
    }

    pub fn set_base_top_radius(&mut self, radius: f64) {
        self.generator.set_base_top_radius(radius);
    }

    pub fn set_body_radius(&mut self, radius: f64) {
        self.generator.set_body_radius(radius);
    }

    pub fn set_resolution(&mut self, resolution: i32) {
        self.generator.set_resolution(resolution);
    }

    pub fn set_thread_depth(&mut self, depth: f64) {
        self.generator.set_thread_depth(depth);
    }

    pub fn set_thread_turns(&mut self, turns: i32) {
        self.generator.set_thread_turns(turns);
    }

    /// Replaces all parameters from a JSON object. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns a JavaScript error when the JSON cannot be parsed.
    pub fn set_parameters_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.set_parameters_json_internal(json)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Current parameters as a JSON object.
    ///
    /// # Errors
    /// Returns a JavaScript error when serialization fails.
    pub fn parameters_json(&self) -> Result<String, JsValue> {
        self.parameters_json_internal()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Builds with explicit radius and resolution; returns whether the
    /// build succeeded.
    pub fn build_actor(&mut self, radius: f64, resolution: i32) -> bool {
        let result = self.generator.build_actor(radius, resolution);
        self.record(result)
    }

    /// Builds with the stored body radius and the configured default
    /// resolution.
    pub fn build(&mut self) -> bool {
        let result = self.generator.build();
        self.record(result)
    }

    /// Message of the most recent failed build, cleared by a successful one.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Mesh of the last successful build.
    pub fn mesh(&self) -> Option<MeshHandle> {
        self.generator.mesh().map(MeshHandle::from_mesh)
    }

    pub fn has_mesh(&self) -> bool {
        self.generator.mesh().is_some()
    }
}

impl ComponentCreator {
    /// Host-only variant of `set_parameters_json`.
    pub fn set_parameters_json_internal(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let params: ComponentParameters = serde_json::from_str(json)?;
        self.generator.set_parameters(params);
        Ok(())
    }

    /// Host-only variant of `parameters_json`.
    pub fn parameters_json_internal(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.generator.parameters())
    }

    pub fn parameters(&self) -> &ComponentParameters {
        self.generator.parameters()
    }

    fn record(&mut self, result: Result<BuildReport, ComponentError>) -> bool {
        match result {
            Ok(_) => {
                self.last_error = None;
                true
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                false
            }
        }
    }
}
