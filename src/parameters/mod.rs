//! # Morphable Model Parameter System
//!
//! This module provides the parameter vectors of a linear statistical
//! shape/appearance model and the masked iteration protocol that external
//! fitting code uses to perturb one weight at a time.
//!
//! ## Key Features
//!
//! - **Parallel Weight Vectors**: One geometry ("vertices") weight and one
//!   color weight per principal component, always of equal length
//! - **Normalization**: Random construction paths normalize each vector to
//!   sum to one
//! - **Masked Two-Phase Cursor**: Walk the enabled components of both
//!   vectors in a fixed order (vertices first, then color) and scale the
//!   selected weight in place
//! - **Interpolation**: Linear blending between two parameter instances,
//!   with extrapolation for factors outside [0, 1]
//!
//! ## Core Components
//!
//! - [`ModelParameter`]: The parameter vector, its constructors, the
//!   cursor protocol, and interpolation
//! - [`EnablementMask`]: Caller-owned enable/disable flags consulted by
//!   the cursor
//! - [`VectorKind`]: Selects the vertices or color vector when addressing
//!   the mask or reading the cursor position
//!
//! ## Example Usage
//!
//! ```rust
//! use morphparam_rs::parameters::{EnablementMask, ModelParameter, VectorKind};
//!
//! // A mask and a random parameter for a 5-component model.
//! let mut mask = EnablementMask::all_enabled(5);
//! let mut rng = rand::thread_rng();
//! let mut param = ModelParameter::random(5, &mut rng);
//!
//! // Exclude one geometry component from the walk.
//! mask.set_enabled(VectorKind::Vertices, 2, false).unwrap();
//!
//! // Visit the remaining 4 vertices components and all 5 color ones.
//! let mut visited = 0;
//! let mut more = param.start(&mask).unwrap();
//! while more {
//!     visited += 1;
//!     more = param.advance(&mask).unwrap();
//! }
//! assert_eq!(visited, 9);
//! ```

pub mod mask;
pub mod model_parameter;


// Re-export key types
pub use mask::{EnablementMask, VectorKind};
pub use model_parameter::ModelParameter;
