//! Integration tests for the ModelParameter struct
//!
//! These tests verify construction, normalization, interpolation, and the
//! two-phase masked cursor protocol.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use morphparam_rs::parameters::{EnablementMask, ModelParameter, VectorKind};
use morphparam_rs::MorphParamError;
use ndarray::{array, Array1};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run a full walk and collect the positions the cursor stopped on.
fn walk(param: &mut ModelParameter, mask: &EnablementMask) -> Vec<(VectorKind, usize)> {
    let mut visited = Vec::new();
    let mut more = param.start(mask).unwrap();
    while more {
        visited.push(param.current().unwrap());
        more = param.advance(mask).unwrap();
    }
    visited
}

#[test]
fn test_length_invariant() {
    let identity = ModelParameter::identity(7);
    assert_eq!(identity.vertices_weight().len(), 7);
    assert_eq!(identity.color_weight().len(), 7);
    assert_eq!(identity.model_count(), 7);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let random = ModelParameter::random(7, &mut rng);
    assert_eq!(random.vertices_weight().len(), 7);
    assert_eq!(random.color_weight().len(), 7);

    let explicit = ModelParameter::from_weights(Array1::zeros(7), Array1::ones(7)).unwrap();
    assert_eq!(explicit.model_count(), 7);

    let copied = explicit.clone();
    assert_eq!(copied.model_count(), 7);
    assert_eq!(copied.vertices_weight().len(), copied.color_weight().len());
}

#[test]
fn test_mismatched_lengths_rejected() {
    let result = ModelParameter::from_weights(Array1::zeros(3), Array1::zeros(4));
    assert!(matches!(result, Err(MorphParamError::DimensionMismatch(_))));

    let a = ModelParameter::identity(3);
    let b = ModelParameter::identity(5);
    let result = a.lerp(&b, 0.5);
    assert!(matches!(result, Err(MorphParamError::DimensionMismatch(_))));
}

#[test]
fn test_deep_copy_isolation() {
    let a = ModelParameter::from_weights(array![0.5, 0.5], array![0.2, 0.8]).unwrap();
    let mut b = a.clone();

    b.vertices_weight_mut()[0] = 9.0;
    b.color_weight_mut()[1] = -1.0;

    assert_eq!(a.vertices_weight()[0], 0.5);
    assert_eq!(a.color_weight()[1], 0.8);
    assert_eq!(b.vertices_weight()[0], 9.0);

    // And the other way around
    let mut c = a.clone();
    let d = c.clone();
    c.vertices_weight_mut()[1] = 3.0;
    assert_eq!(d.vertices_weight()[1], 0.5);
}

#[test]
fn test_interpolation_endpoints() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let a = ModelParameter::random(6, &mut rng);
    let b = ModelParameter::random(6, &mut rng);

    let at_zero = a.lerp(&b, 0.0).unwrap();
    let at_one = a.lerp(&b, 1.0).unwrap();

    for i in 0..6 {
        assert_relative_eq!(at_zero.vertices_weight()[i], a.vertices_weight()[i]);
        assert_relative_eq!(at_zero.color_weight()[i], a.color_weight()[i]);
        assert_relative_eq!(at_one.vertices_weight()[i], b.vertices_weight()[i]);
        assert_relative_eq!(at_one.color_weight()[i], b.color_weight()[i]);
    }
}

#[test]
fn test_interpolation_midpoint_and_extrapolation() {
    let a = ModelParameter::from_weights(array![1.0, 0.0], array![0.0, 1.0]).unwrap();
    let b = ModelParameter::from_weights(array![0.0, 1.0], array![1.0, 0.0]).unwrap();

    let mid = a.lerp(&b, 0.5).unwrap();
    assert_abs_diff_eq!(mid.vertices_weight()[0], 0.5);
    assert_abs_diff_eq!(mid.vertices_weight()[1], 0.5);
    assert_abs_diff_eq!(mid.color_weight()[0], 0.5);

    // alpha outside [0, 1] extrapolates instead of failing
    let beyond = a.lerp(&b, 2.0).unwrap();
    assert_abs_diff_eq!(beyond.vertices_weight()[0], -1.0);
    assert_abs_diff_eq!(beyond.vertices_weight()[1], 2.0);

    let before = a.lerp(&b, -1.0).unwrap();
    assert_abs_diff_eq!(before.vertices_weight()[0], 2.0);
    assert_abs_diff_eq!(before.vertices_weight()[1], -1.0);
}

#[test]
fn test_iteration_all_enabled() {
    let mask = EnablementMask::all_enabled(5);
    let mut param = ModelParameter::identity(5);

    let visited = walk(&mut param, &mask);

    // 5 vertices positions then 5 color positions, in index order
    assert_eq!(visited.len(), 10);
    for i in 0..5 {
        assert_eq!(visited[i], (VectorKind::Vertices, i));
        assert_eq!(visited[5 + i], (VectorKind::Color, i));
    }

    // The walk is over: further advances keep reporting false
    assert!(!param.advance(&mask).unwrap());
    assert!(!param.advance(&mask).unwrap());
    assert!(param.current().is_none());
}

#[test]
fn test_iteration_skips_disabled_components() {
    let mut mask = EnablementMask::all_enabled(5);
    mask.set_enabled(VectorKind::Vertices, 2, false).unwrap();

    let mut param = ModelParameter::identity(5);
    let visited = walk(&mut param, &mask);

    assert_eq!(
        visited,
        vec![
            (VectorKind::Vertices, 0),
            (VectorKind::Vertices, 1),
            (VectorKind::Vertices, 3),
            (VectorKind::Vertices, 4),
            (VectorKind::Color, 0),
            (VectorKind::Color, 1),
            (VectorKind::Color, 2),
            (VectorKind::Color, 3),
            (VectorKind::Color, 4),
        ]
    );
}

#[test]
fn test_iteration_rolls_into_color_in_one_call() {
    // With every vertices component disabled, the very first cursor
    // movement crosses the phase boundary and lands on color index 0.
    let mut mask = EnablementMask::all_enabled(3);
    for i in 0..3 {
        mask.set_enabled(VectorKind::Vertices, i, false).unwrap();
    }

    let mut param = ModelParameter::identity(3);
    assert!(param.start(&mask).unwrap());
    assert_eq!(param.current(), Some((VectorKind::Color, 0)));

    // Disabling everything leaves nothing to visit at all
    for i in 0..3 {
        mask.set_enabled(VectorKind::Color, i, false).unwrap();
    }
    assert!(!param.start(&mask).unwrap());
    assert!(param.current().is_none());
}

#[test]
fn test_iteration_empty_model() {
    let mask = EnablementMask::all_enabled(0);
    let mut param = ModelParameter::identity(0);

    assert!(!param.start(&mask).unwrap());
    assert!(!param.advance(&mask).unwrap());
    assert!(param.current().is_none());
}

#[test]
fn test_iteration_rejects_mismatched_mask() {
    let mask = EnablementMask::all_enabled(4);
    let mut param = ModelParameter::identity(3);

    assert!(matches!(
        param.start(&mask),
        Err(MorphParamError::DimensionMismatch(_))
    ));
    assert!(matches!(
        param.advance(&mask),
        Err(MorphParamError::DimensionMismatch(_))
    ));
}

#[test]
fn test_scale_current_targets_selected_component() {
    let mask = EnablementMask::all_enabled(2);
    let mut param = ModelParameter::from_weights(array![1.0, 2.0], array![3.0, 4.0]).unwrap();

    // start lands on vertices index 0
    assert!(param.start(&mask).unwrap());
    param.scale_current(2.0).unwrap();
    assert_eq!(param.vertices_weight()[0], 2.0);
    assert_eq!(param.vertices_weight()[1], 2.0);
    assert_eq!(param.color_weight()[0], 3.0);

    // advance into the color phase and scale there
    assert!(param.advance(&mask).unwrap());
    assert!(param.advance(&mask).unwrap());
    assert_eq!(param.current(), Some((VectorKind::Color, 0)));
    param.scale_current(10.0).unwrap();
    assert_eq!(param.color_weight()[0], 30.0);
    assert_eq!(param.color_weight()[1], 4.0);
    assert_eq!(param.vertices_weight()[0], 2.0);
}

#[test]
fn test_scale_current_outside_walk_fails() {
    let mask = EnablementMask::all_enabled(2);
    let mut param = ModelParameter::identity(2);

    // Before start: no active walk
    assert!(matches!(
        param.scale_current(2.0),
        Err(MorphParamError::InvalidState(_))
    ));

    // After exhaustion: the walk is over
    let mut more = param.start(&mask).unwrap();
    while more {
        more = param.advance(&mask).unwrap();
    }
    assert!(matches!(
        param.scale_current(2.0),
        Err(MorphParamError::InvalidState(_))
    ));

    // The failed calls left the weights untouched
    assert_eq!(param.vertices_weight()[0], 1.0);
    assert_eq!(param.color_weight()[0], 1.0);
}

#[test]
fn test_restart_after_exhaustion() {
    let mask = EnablementMask::all_enabled(3);
    let mut param = ModelParameter::identity(3);

    assert_eq!(walk(&mut param, &mask).len(), 6);

    // start re-arms the cursor after a completed walk
    assert!(param.start(&mask).unwrap());
    assert_eq!(param.current(), Some((VectorKind::Vertices, 0)));
    assert_eq!(walk(&mut param, &mask).len(), 6);
}

#[test]
fn test_zero_sum_normalization_goes_non_finite() {
    // Normalizing all-zero vectors divides by zero. This is deliberately
    // unguarded: the weights become NaN and the caller sees it.
    let mut param = ModelParameter::from_weights(Array1::zeros(3), Array1::zeros(3)).unwrap();
    param.normalize();

    assert!(param.vertices_weight().iter().all(|w| w.is_nan()));
    assert!(param.color_weight().iter().all(|w| w.is_nan()));
}

#[test]
fn test_randomize_reuses_receiver_storage() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut param = ModelParameter::identity(8);
    let before = param.clone();

    param.randomize(&mut rng);

    assert_eq!(param.model_count(), 8);
    assert_abs_diff_eq!(param.vertices_weight().sum(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(param.color_weight().sum(), 1.0, epsilon = 1e-9);

    // The clone taken before randomization is untouched
    assert_eq!(before.vertices_weight()[0], 1.0);
}
