//! Component enablement mask
//!
//! This module provides the EnablementMask struct, which records which
//! principal components of a morphable model take part in cursor
//! iteration. The mask is an explicitly owned policy value: the caller
//! creates it for a given component count, hands it by reference to the
//! iteration protocol, and mutates individual bits to exclude components
//! from a fitting pass.

use crate::error::{MorphParamError, Result};
use serde::{Deserialize, Serialize};

/// Selects one of the two weight vectors of a
/// [`ModelParameter`](crate::parameters::ModelParameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorKind {
    /// The geometry principal-component weights.
    Vertices,
    /// The color principal-component weights.
    Color,
}

/// Enable/disable flags for the principal components of a model
///
/// One flag per component, per weight vector. All components start
/// enabled; external model-fitting code clears individual flags to
/// restrict which components the cursor visits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablementMask {
    vertices: Vec<bool>,
    color: Vec<bool>,
}

impl EnablementMask {
    /// Create a mask for `model_count` components with every flag set.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::parameters::{EnablementMask, VectorKind};
    ///
    /// let mask = EnablementMask::all_enabled(3);
    /// assert_eq!(mask.model_count(), 3);
    /// assert!(mask.is_enabled(VectorKind::Color, 2));
    /// ```
    pub fn all_enabled(model_count: usize) -> Self {
        Self {
            vertices: vec![true; model_count],
            color: vec![true; model_count],
        }
    }

    /// Get the number of components the mask covers.
    pub fn model_count(&self) -> usize {
        self.vertices.len()
    }

    /// Check whether the component at `index` in the given vector is
    /// enabled. Out-of-range indices read as disabled.
    pub fn is_enabled(&self, kind: VectorKind, index: usize) -> bool {
        self.bits(kind).get(index).copied().unwrap_or(false)
    }

    /// Set or clear the flag for one component.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which weight vector the flag belongs to
    /// * `index` - Component index within that vector
    /// * `enabled` - Whether the component should take part in iteration
    ///
    /// # Returns
    ///
    /// `Ok(())` if the flag was updated, or `InvalidParameter` if `index`
    /// is out of range for the mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::parameters::{EnablementMask, VectorKind};
    ///
    /// let mut mask = EnablementMask::all_enabled(5);
    /// mask.set_enabled(VectorKind::Vertices, 2, false).unwrap();
    /// assert!(!mask.is_enabled(VectorKind::Vertices, 2));
    /// assert!(mask.set_enabled(VectorKind::Vertices, 5, false).is_err());
    /// ```
    pub fn set_enabled(&mut self, kind: VectorKind, index: usize, enabled: bool) -> Result<()> {
        let model_count = self.model_count();
        match self.bits_mut(kind).get_mut(index) {
            Some(bit) => {
                *bit = enabled;
                Ok(())
            }
            None => Err(MorphParamError::InvalidParameter(format!(
                "mask index {} out of range for model count {}",
                index, model_count
            ))),
        }
    }

    /// Count the enabled components in one vector.
    pub fn enabled_count(&self, kind: VectorKind) -> usize {
        self.bits(kind).iter().filter(|&&bit| bit).count()
    }

    /// Resize the mask to `model_count` components and re-enable every
    /// flag, discarding previous customization.
    pub fn reset(&mut self, model_count: usize) {
        *self = Self::all_enabled(model_count);
    }

    fn bits(&self, kind: VectorKind) -> &[bool] {
        match kind {
            VectorKind::Vertices => &self.vertices,
            VectorKind::Color => &self.color,
        }
    }

    fn bits_mut(&mut self, kind: VectorKind) -> &mut Vec<bool> {
        match kind {
            VectorKind::Vertices => &mut self.vertices,
            VectorKind::Color => &mut self.color,
        }
    }
}
