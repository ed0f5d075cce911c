//! Model parameter definition and implementation
//!
//! This module provides the ModelParameter struct, the coefficient vector
//! of a linear morphable model. It owns one weight per principal
//! component for the geometry ("vertices") vector and one for the color
//! vector, and carries the cursor state used by the masked iteration
//! protocol.

use crate::error::{MorphParamError, Result};
use crate::parameters::mask::{EnablementMask, VectorKind};
use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which weight vector the cursor is currently walking, or `Done` when no
/// walk is active. The cursor starts in `Done` and only `start` arms it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Vertices,
    Color,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    phase: Phase,
    index: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            phase: Phase::Done,
            index: 0,
        }
    }
}

/// The parameter vector of a linear morphable model
///
/// Holds two parallel weight vectors of length `model_count`: one
/// coefficient per geometry principal component and one per color
/// principal component. Instances are plain values; every construction
/// path produces independently owned storage, and `Clone` deep-copies.
///
/// The struct also exposes a stateful two-phase cursor
/// ([`start`](Self::start) / [`advance`](Self::advance) /
/// [`scale_current`](Self::scale_current)) that visits the enabled
/// components of the vertices vector, then the color vector, under an
/// [`EnablementMask`] supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawModelParameter")]
pub struct ModelParameter {
    /// Weights of the geometry principal components.
    vertices_weight: Array1<f64>,

    /// Weights of the color principal components.
    color_weight: Array1<f64>,

    /// Number of principal components; fixed for the lifetime of the
    /// instance.
    model_count: usize,

    /// Iteration state; transient, never serialized.
    #[serde(skip)]
    cursor: Cursor,
}

impl ModelParameter {
    /// Create the "no deformation" baseline parameter: the first
    /// coefficient of each vector set to 1.0, all others 0.0.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::ModelParameter;
    ///
    /// let param = ModelParameter::identity(3);
    /// assert_eq!(param.model_count(), 3);
    /// assert_eq!(param.vertices_weight()[0], 1.0);
    /// assert_eq!(param.color_weight()[1], 0.0);
    /// ```
    pub fn identity(model_count: usize) -> Self {
        let mut vertices_weight = Array1::zeros(model_count);
        let mut color_weight = Array1::zeros(model_count);

        if model_count > 0 {
            vertices_weight[0] = 1.0;
            color_weight[0] = 1.0;
        }

        Self {
            vertices_weight,
            color_weight,
            model_count,
            cursor: Cursor::default(),
        }
    }

    /// Create a parameter from explicit weight vectors.
    ///
    /// # Arguments
    ///
    /// * `vertices_weight` - Weights for the geometry components
    /// * `color_weight` - Weights for the color components
    ///
    /// # Returns
    ///
    /// A new parameter owning both vectors, or `DimensionMismatch` if the
    /// two lengths differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::ModelParameter;
    /// use ndarray::array;
    ///
    /// let param = ModelParameter::from_weights(
    ///     array![0.5, 0.3, 0.2],
    ///     array![0.9, 0.1, 0.0],
    /// )
    /// .unwrap();
    /// assert_eq!(param.model_count(), 3);
    ///
    /// let result = ModelParameter::from_weights(array![1.0], array![0.5, 0.5]);
    /// assert!(result.is_err());
    /// ```
    pub fn from_weights(vertices_weight: Array1<f64>, color_weight: Array1<f64>) -> Result<Self> {
        if vertices_weight.len() != color_weight.len() {
            return Err(MorphParamError::DimensionMismatch(format!(
                "vertices weights have {} components, color weights have {}",
                vertices_weight.len(),
                color_weight.len()
            )));
        }

        let model_count = vertices_weight.len();
        Ok(Self {
            vertices_weight,
            color_weight,
            model_count,
            cursor: Cursor::default(),
        })
    }

    /// Create a random parameter with normalized weights.
    ///
    /// Each component of both vectors is drawn uniformly from [0, 1) and
    /// cubed, skewing mass toward a few dominant components, then the
    /// vectors are normalized so each sums to one.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::ModelParameter;
    ///
    /// let mut rng = rand::thread_rng();
    /// let param = ModelParameter::random(10, &mut rng);
    /// assert!((param.vertices_weight().sum() - 1.0).abs() < 1e-9);
    /// assert!((param.color_weight().sum() - 1.0).abs() < 1e-9);
    /// ```
    pub fn random(model_count: usize, rng: &mut impl Rng) -> Self {
        let vertices_weight = Array1::from_shape_fn(model_count, |_| rng.gen::<f64>().powi(3));
        let color_weight = Array1::from_shape_fn(model_count, |_| rng.gen::<f64>().powi(3));

        let mut param = Self {
            vertices_weight,
            color_weight,
            model_count,
            cursor: Cursor::default(),
        };
        param.normalize();
        param
    }

    /// Overwrite both weight vectors in place with fresh cubed uniform
    /// draws, then normalize. Same distribution shaping as
    /// [`random`](Self::random), but mutates the receiver.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.vertices_weight
            .mapv_inplace(|_| rng.gen::<f64>().powi(3));
        self.color_weight.mapv_inplace(|_| rng.gen::<f64>().powi(3));

        self.normalize();
    }

    /// Divide each weight vector by its own sum so that both sums equal
    /// one.
    ///
    /// A vector whose sum is zero is not guarded: its components become
    /// NaN (or infinite), and the caller sees the non-finite weights.
    pub fn normalize(&mut self) {
        let vertices_total = self.vertices_weight.sum();
        let color_total = self.color_weight.sum();

        self.vertices_weight /= vertices_total;
        self.color_weight /= color_total;
    }

    /// Get the number of principal components.
    pub fn model_count(&self) -> usize {
        self.model_count
    }

    /// Get the weight vector for the vertices.
    pub fn vertices_weight(&self) -> &Array1<f64> {
        &self.vertices_weight
    }

    /// Get the weight vector for the colors.
    pub fn color_weight(&self) -> &Array1<f64> {
        &self.color_weight
    }

    /// Get mutable access to the vertices weights.
    pub fn vertices_weight_mut(&mut self) -> &mut Array1<f64> {
        &mut self.vertices_weight
    }

    /// Get mutable access to the color weights.
    pub fn color_weight_mut(&mut self) -> &mut Array1<f64> {
        &mut self.color_weight
    }

    /// Start a walk over the enabled components of both vectors.
    ///
    /// Resets the cursor to the vertices phase and immediately advances
    /// once, so that it lands on the first enabled component.
    ///
    /// # Arguments
    ///
    /// * `mask` - Enablement flags; must cover `model_count` components
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the cursor found an enabled component, `Ok(false)`
    /// if no component is enabled at all, or `DimensionMismatch` if the
    /// mask is sized for a different model.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::{EnablementMask, ModelParameter, VectorKind};
    ///
    /// let mask = EnablementMask::all_enabled(2);
    /// let mut param = ModelParameter::identity(2);
    ///
    /// assert!(param.start(&mask).unwrap());
    /// assert_eq!(param.current(), Some((VectorKind::Vertices, 0)));
    /// ```
    pub fn start(&mut self, mask: &EnablementMask) -> Result<bool> {
        self.check_mask(mask)?;

        self.cursor = Cursor {
            phase: Phase::Vertices,
            index: 0,
        };
        Ok(self.scan(mask))
    }

    /// Advance the cursor to the next enabled component.
    ///
    /// The walk covers the vertices vector first, then the color vector.
    /// Exhausting the vertices range rolls into the color range at index
    /// 0 within the same call, so a single `advance` may skip any number
    /// of disabled components on both sides of the phase boundary. Once
    /// the walk has ended, further calls keep returning `Ok(false)`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the cursor stopped on an enabled component,
    /// `Ok(false)` if the iteration is over, or `DimensionMismatch` if
    /// the mask is sized for a different model.
    pub fn advance(&mut self, mask: &EnablementMask) -> Result<bool> {
        self.check_mask(mask)?;

        if self.cursor.phase == Phase::Done {
            return Ok(false);
        }

        self.cursor.index += 1;
        Ok(self.scan(mask))
    }

    /// Get the position the cursor currently rests on, or `None` when no
    /// walk is active.
    pub fn current(&self) -> Option<(VectorKind, usize)> {
        match self.cursor.phase {
            Phase::Vertices => Some((VectorKind::Vertices, self.cursor.index)),
            Phase::Color => Some((VectorKind::Color, self.cursor.index)),
            Phase::Done => None,
        }
    }

    /// Multiply the currently selected component by `ratio`, in place.
    ///
    /// Only valid between a `true`-returning [`start`](Self::start) or
    /// [`advance`](Self::advance) and the next cursor movement. Direct
    /// scaling deliberately breaks the sum-to-one invariant; call
    /// [`normalize`](Self::normalize) to re-establish it.
    ///
    /// # Returns
    ///
    /// `Ok(())` if a component was scaled, or `InvalidState` if no walk
    /// is active.
    pub fn scale_current(&mut self, ratio: f64) -> Result<()> {
        match self.cursor.phase {
            Phase::Vertices => {
                self.vertices_weight[self.cursor.index] *= ratio;
                Ok(())
            }
            Phase::Color => {
                self.color_weight[self.cursor.index] *= ratio;
                Ok(())
            }
            Phase::Done => Err(MorphParamError::InvalidState(
                "no component selected: scale_current requires an active walk".to_string(),
            )),
        }
    }

    /// Linearly interpolate between this parameter and `target`.
    ///
    /// Component-wise on both vectors:
    /// `result[i] = (1 - alpha) * self[i] + alpha * target[i]`.
    /// `alpha` is not clamped, so values outside [0, 1] extrapolate.
    ///
    /// # Arguments
    ///
    /// * `target` - The parameter reached at `alpha = 1.0`
    /// * `alpha` - Interpolation factor
    ///
    /// # Returns
    ///
    /// A new, independently owned parameter, or `DimensionMismatch` if
    /// the two instances have different component counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphparam_rs::ModelParameter;
    /// use ndarray::array;
    ///
    /// let a = ModelParameter::from_weights(array![1.0, 0.0], array![1.0, 0.0]).unwrap();
    /// let b = ModelParameter::from_weights(array![0.0, 1.0], array![0.0, 1.0]).unwrap();
    ///
    /// let mid = a.lerp(&b, 0.5).unwrap();
    /// assert_eq!(mid.vertices_weight()[0], 0.5);
    /// assert_eq!(mid.color_weight()[1], 0.5);
    /// ```
    pub fn lerp(&self, target: &ModelParameter, alpha: f64) -> Result<ModelParameter> {
        if self.model_count != target.model_count {
            return Err(MorphParamError::DimensionMismatch(format!(
                "cannot interpolate between {} and {} components",
                self.model_count, target.model_count
            )));
        }

        let vertices_weight =
            (1.0 - alpha) * &self.vertices_weight + alpha * &target.vertices_weight;
        let color_weight = (1.0 - alpha) * &self.color_weight + alpha * &target.color_weight;

        Ok(ModelParameter {
            vertices_weight,
            color_weight,
            model_count: self.model_count,
            cursor: Cursor::default(),
        })
    }

    /// Scan forward from the current cursor position for the next enabled
    /// component, rolling from the vertices phase into the color phase
    /// within the same call when the vertices range is exhausted.
    fn scan(&mut self, mask: &EnablementMask) -> bool {
        loop {
            match self.cursor.phase {
                Phase::Vertices => {
                    while self.cursor.index < self.model_count {
                        if mask.is_enabled(VectorKind::Vertices, self.cursor.index) {
                            return true;
                        }
                        self.cursor.index += 1;
                    }
                    self.cursor.phase = Phase::Color;
                    self.cursor.index = 0;
                }
                Phase::Color => {
                    while self.cursor.index < self.model_count {
                        if mask.is_enabled(VectorKind::Color, self.cursor.index) {
                            return true;
                        }
                        self.cursor.index += 1;
                    }
                    self.cursor.phase = Phase::Done;
                    return false;
                }
                Phase::Done => return false,
            }
        }
    }

    fn check_mask(&self, mask: &EnablementMask) -> Result<()> {
        if mask.model_count() != self.model_count {
            return Err(MorphParamError::DimensionMismatch(format!(
                "mask covers {} components, parameter has {}",
                mask.model_count(),
                self.model_count
            )));
        }
        Ok(())
    }
}

/// Serde helper: deserialization funnels through the same length checks
/// as [`ModelParameter::from_weights`], so a decoded payload can never
/// violate the length invariant.
#[derive(Deserialize)]
struct RawModelParameter {
    vertices_weight: Array1<f64>,
    color_weight: Array1<f64>,
    model_count: usize,
}

impl TryFrom<RawModelParameter> for ModelParameter {
    type Error = MorphParamError;

    fn try_from(raw: RawModelParameter) -> Result<Self> {
        let param = ModelParameter::from_weights(raw.vertices_weight, raw.color_weight)?;
        if param.model_count != raw.model_count {
            return Err(MorphParamError::DimensionMismatch(format!(
                "model_count {} does not match weight vectors of length {}",
                raw.model_count, param.model_count
            )));
        }
        Ok(param)
    }
}

impl fmt::Display for ModelParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelParameter: ")?;
        for i in 0..self.model_count {
            write!(f, "({},{})", self.vertices_weight[i], self.color_weight[i])?;
        }
        Ok(())
    }
}
