//! # Config Crate
//!
//! Centralized configuration constants for the component generator.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, DEFAULT_BODY_HEIGHT, resolve_segments};
//!
//! // Heights not larger than EPSILON are rejected
//! let height: f64 = 1e-7;
//! assert!(height <= EPSILON);
//!
//! // Unset heights fall back to the defaults
//! let body_height = -1.0;
//! let resolved = if body_height > 0.0 { body_height } else { DEFAULT_BODY_HEIGHT };
//! assert_eq!(resolved, 2.0);
//!
//! // Segment counts are clamped to a minimum
//! assert_eq!(resolve_segments(0, 4), 8);
//! ```

pub mod constants;
