/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Sequential 网络与网络构建器测试
 */

use ndarray::{Array2, ArrayD, IxDyn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::LATENT_DIM;
use crate::errors::GanError;
use crate::nn::{
    Dense, DenseBuilder, LayerKindDescriptor, Network, NetworkBuilder, NetworkDescriptor,
    Sequential, Sigmoid,
};
use crate::signal::SignalShape;

#[test]
fn test_add_checks_shapes() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = Sequential::new("net", &[4])
        .add(Dense::new(5, 2, &mut rng))
        .unwrap_err();
    assert!(matches!(err, GanError::ShapeMismatch { .. }));
}

#[test]
fn test_predict_checks_input_shape() {
    let mut rng = StdRng::seed_from_u64(1);
    let net = Sequential::new("net", &[4])
        .add(Dense::new(4, 1, &mut rng))
        .unwrap()
        .add(Sigmoid::new())
        .unwrap();
    assert_eq!(net.output_shape(), vec![1]);

    let ok = net.predict(&ArrayD::zeros(IxDyn(&[3, 4]))).unwrap();
    assert_eq!(ok.shape(), &[3, 1]);
    assert!(net.predict(&ArrayD::zeros(IxDyn(&[3, 5]))).is_err());
}

#[test]
fn test_predict_matches_forward() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut net = DenseBuilder::new(8)
        .build_discriminator(SignalShape::new(2, 5), &mut rng)
        .unwrap();
    let x = ArrayD::from_shape_fn(IxDyn(&[4, 2, 5]), |i| (i[0] + i[1] * 2 + i[2]) as f32 * 0.1);
    let inferred = net.predict(&x).unwrap();
    let trained = net.forward(&x).unwrap();
    assert_eq!(inferred, trained);
}

#[test]
fn test_dense_builder_shapes() {
    let mut rng = StdRng::seed_from_u64(5);
    let shape = SignalShape::default();
    let builder = DenseBuilder::new(4);

    let generator = builder.build_generator(shape, &mut rng).unwrap();
    assert_eq!(generator.input_shape(), vec![LATENT_DIM]);
    assert_eq!(generator.output_shape(), vec![3, 1200]);

    let discriminator = builder.build_discriminator(shape, &mut rng).unwrap();
    assert_eq!(discriminator.input_shape(), vec![3, 1200]);
    assert_eq!(discriminator.output_shape(), vec![1]);

    let noise = Array2::<f32>::zeros((2, LATENT_DIM)).into_dyn();
    let generated = generator.predict(&noise).unwrap();
    assert_eq!(generated.shape(), &[2, 3, 1200]);
    // tanh 输出范围
    assert!(generated.iter().all(|x| x.abs() <= 1.0));
}

#[test]
fn test_describe_round_trips_through_json() {
    let mut rng = StdRng::seed_from_u64(5);
    let generator = DenseBuilder::new(4)
        .build_generator(SignalShape::new(1, 6), &mut rng)
        .unwrap();
    let descriptor = generator.describe();

    assert_eq!(descriptor.name, "generator");
    assert_eq!(descriptor.layers.len(), 5);
    assert_eq!(
        descriptor.layers[0].kind,
        LayerKindDescriptor::Dense {
            in_features: LATENT_DIM,
            out_features: 4
        }
    );
    assert_eq!(descriptor.output_shape, vec![1, 6]);
    assert_eq!(descriptor.total_params(), generator.param_count());
    assert_eq!(descriptor.total_params(), LATENT_DIM * 4 + 4 + 4 * 6 + 6);

    let json = descriptor.to_json().unwrap();
    assert!(json.contains("\"type\": \"LeakyRelu\""));
    assert_eq!(NetworkDescriptor::from_json(&json).unwrap(), descriptor);
}
