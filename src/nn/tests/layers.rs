/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 各层的前向/反向测试
 */

use approx::assert_abs_diff_eq;
use ndarray::{ArrayD, IxDyn, array};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::errors::GanError;
use crate::nn::{Dense, Layer, LeakyRelu, Reshape, Sigmoid, Tanh, TraitForLayer};

#[test]
fn test_dense_forward_backward() {
    // W = [[1, 2], [3, 4]], b = [0.5, -0.5]
    let mut dense = Dense::from_weights(array![[1.0_f32, 2.0], [3.0, 4.0]], array![0.5_f32, -0.5]);
    let x = array![[1.0_f32, 1.0]].into_dyn();

    let y = dense.forward(&x).unwrap();
    assert_eq!(y, array![[4.5_f32, 5.5]].into_dyn());

    let grad_x = dense.backward(&array![[1.0_f32, 2.0]].into_dyn()).unwrap();
    // grad_x = g @ W^T = [1*1 + 2*2, 1*3 + 2*4]
    assert_eq!(grad_x, array![[5.0_f32, 11.0]].into_dyn());
    // grad_W = x^T @ g
    assert_eq!(
        dense.weights().grad().unwrap(),
        &array![[1.0_f32, 2.0], [1.0, 2.0]].into_dyn()
    );
    assert_eq!(dense.bias().grad().unwrap(), &array![1.0_f32, 2.0].into_dyn());
    assert_eq!(dense.param_count(), 6);
}

#[test]
fn test_dense_rejects_wrong_width() {
    let dense = Dense::from_weights(array![[1.0_f32], [1.0]], array![0.0_f32]);
    let err = dense.infer(&array![[1.0_f32, 2.0, 3.0]].into_dyn()).unwrap_err();
    assert!(matches!(err, GanError::ShapeMismatch { .. }));
    assert!(dense.output_shape(&[3]).is_err());
    assert_eq!(dense.output_shape(&[2]).unwrap(), vec![1]);
}

#[test]
fn test_dense_glorot_init_is_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let dense = Dense::new(10, 5, &mut rng);
    let limit = (6.0_f32 / 15.0).sqrt();
    assert!(dense.weights().value().iter().all(|w| w.abs() <= limit));
    assert!(dense.bias().value().iter().all(|&b| b == 0.0));
}

#[test]
fn test_backward_before_forward_fails() {
    let mut dense = Dense::from_weights(array![[1.0_f32]], array![0.0_f32]);
    let err = dense.backward(&array![[1.0_f32]].into_dyn()).unwrap_err();
    assert!(matches!(err, GanError::MissingForwardCache(_)));
}

#[test]
fn test_leaky_relu() {
    let mut layer = LeakyRelu::new(0.2);
    let x = array![[-1.0_f32, 2.0]].into_dyn();
    let y = layer.forward(&x).unwrap();
    assert_abs_diff_eq!(y[[0, 0]], -0.2);
    assert_abs_diff_eq!(y[[0, 1]], 2.0);

    let g = layer.backward(&array![[1.0_f32, 1.0]].into_dyn()).unwrap();
    assert_abs_diff_eq!(g[[0, 0]], 0.2);
    assert_abs_diff_eq!(g[[0, 1]], 1.0);
}

#[test]
fn test_tanh_and_sigmoid() {
    let x = array![[0.0_f32, 1.0]].into_dyn();

    let mut tanh = Tanh::new();
    let y = tanh.forward(&x).unwrap();
    assert_abs_diff_eq!(y[[0, 1]], 1.0_f32.tanh());
    let g = tanh.backward(&array![[1.0_f32, 1.0]].into_dyn()).unwrap();
    assert_abs_diff_eq!(g[[0, 0]], 1.0);
    assert_abs_diff_eq!(g[[0, 1]], 1.0 - 1.0_f32.tanh().powi(2), epsilon = 1e-6);

    let mut sigmoid = Sigmoid::new();
    let y = sigmoid.forward(&x).unwrap();
    assert_abs_diff_eq!(y[[0, 0]], 0.5);
    let g = sigmoid.backward(&array![[1.0_f32, 1.0]].into_dyn()).unwrap();
    assert_abs_diff_eq!(g[[0, 0]], 0.25);
}

#[test]
fn test_reshape_round_trip() {
    let mut layer = Reshape::new(&[2, 3]);
    assert_eq!(layer.output_shape(&[6]).unwrap(), vec![2, 3]);
    assert!(layer.output_shape(&[5]).is_err());

    let x = ArrayD::from_shape_vec(IxDyn(&[2, 6]), (0..12).map(|v| v as f32).collect()).unwrap();
    let y = layer.forward(&x).unwrap();
    assert_eq!(y.shape(), &[2, 2, 3]);
    assert_eq!(y[[1, 0, 0]], 6.0);

    let back = layer.backward(&y).unwrap();
    assert_eq!(back, x);
}

#[test]
fn test_layer_enum_dispatch() {
    let mut rng = StdRng::seed_from_u64(0);
    let layers: Vec<Layer> = vec![
        Dense::new(4, 3, &mut rng).into(),
        LeakyRelu::new(0.1).into(),
        Sigmoid::new().into(),
    ];
    let total: usize = layers.iter().map(|layer| layer.param_count()).sum();
    assert_eq!(total, 4 * 3 + 3);
}
