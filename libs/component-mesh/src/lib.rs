//! # Component Mesh
//!
//! Parametric mesh generation for a three-segment component: a tapered
//! neck, a plain or helically threaded body, and a rounded head, laid out
//! along the axis from a start point towards an end point.
//!
//! ## Architecture
//!
//! ```text
//! ComponentParameters → ComponentGenerator → primitives → MeshAssembler → Mesh
//! ```
//!
//! ## Algorithms
//!
//! - **Frame**: stable orthonormal basis from the axis direction
//! - **Primitives**: frustum, cylinder, threaded cylinder, hemispherical cap,
//!   seam disc
//! - **Weld**: spatial hash vertex merge with seam face culling
//!
//! ## Usage
//!
//! ```rust
//! use component_mesh::ComponentGenerator;
//! use glam::DVec3;
//!
//! let mut generator = ComponentGenerator::new();
//! generator.set_start_point(DVec3::ZERO);
//! generator.set_end_point(DVec3::Z);
//! generator.set_base_top_radius(0.6);
//!
//! let report = generator.build_actor(0.5, 32).unwrap();
//! assert_eq!(report.dimensions.total_height(), 4.0);
//! let mesh = generator.mesh().unwrap();
//! assert!(mesh.validate());
//! assert!(mesh.is_closed_manifold());
//! ```

pub mod assembler;
pub mod basis;
pub mod config;
pub mod error;
pub mod generator;
pub mod mesh;
pub mod params;
pub mod primitives;

pub use assembler::{weld, MeshAssembler, WeldStats};
pub use basis::AxisBasis;
pub use error::ComponentError;
pub use generator::{
    generate, resolve_dimensions, BodyProfile, BuildReport, ComponentGenerator,
    ResolvedDimensions,
};
pub use mesh::Mesh;
pub use params::ComponentParameters;
