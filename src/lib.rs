//! # morphparam-rs
//!
//! `morphparam-rs` provides the parameter vectors of a linear statistical
//! shape/appearance model (a 3D Morphable Model): two parallel weight
//! vectors, one for the geometry principal components and one for the
//! color principal components, each of fixed length equal to the number
//! of model components.
//!
//! The library provides:
//! - Construction paths: identity, from explicit weight vectors, copy,
//!   and random draws with cube-shaped uniform weights
//! - A normalization step that makes each weight vector sum to one
//! - A two-phase cursor that walks the enabled components of both vectors
//!   (vertices first, then color) and scales the selected weight in place
//! - Linear interpolation between two parameter instances
//!
//! ## Basic Usage
//!
//! ```
//! use morphparam_rs::{EnablementMask, ModelParameter};
//!
//! let mask = EnablementMask::all_enabled(4);
//! let mut param = ModelParameter::identity(4);
//!
//! // Walk every enabled component of both weight vectors and damp it.
//! let mut visited = 0;
//! let mut more = param.start(&mask).unwrap();
//! while more {
//!     param.scale_current(0.5).unwrap();
//!     visited += 1;
//!     more = param.advance(&mask).unwrap();
//! }
//! assert_eq!(visited, 8);
//! assert_eq!(param.vertices_weight()[0], 0.5);
//! ```

// Public modules
pub mod error;

// Parameter system
pub mod parameters;

// Re-exports for convenience
pub use error::{MorphParamError, Result};
pub use parameters::{EnablementMask, ModelParameter, VectorKind};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
