/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 二元交叉熵与准确率测试
 */

use approx::assert_abs_diff_eq;
use ndarray::{ArrayD, IxDyn, array};

use crate::nn::{BatchMetrics, BinaryCrossEntropy, binary_accuracy};

fn column(values: &[f32]) -> ArrayD<f32> {
    ArrayD::from_shape_vec(IxDyn(&[values.len(), 1]), values.to_vec()).unwrap()
}

#[test]
fn test_bce_loss_value() {
    // -(ln(0.8) + ln(1 - 0.4)) / 2
    let predictions = column(&[0.8, 0.4]);
    let targets = column(&[1.0, 0.0]);
    let loss = BinaryCrossEntropy::default()
        .loss(&predictions, &targets)
        .unwrap();
    let expected = -(0.8_f32.ln() + 0.6_f32.ln()) / 2.0;
    assert_abs_diff_eq!(loss, expected, epsilon = 1e-6);
}

#[test]
fn test_bce_accepts_flat_targets() {
    // 组合网络的标签是长度为batch_size的一维向量
    let predictions = column(&[0.9, 0.9, 0.9]);
    let targets = array![1.0_f32, 1.0, 1.0].into_dyn();
    let loss = BinaryCrossEntropy::default()
        .loss(&predictions, &targets)
        .unwrap();
    assert_abs_diff_eq!(loss, -(0.9_f32.ln()), epsilon = 1e-6);
}

#[test]
fn test_bce_clips_extreme_probabilities() {
    let predictions = column(&[0.0, 1.0]);
    let targets = column(&[1.0, 0.0]);
    let loss = BinaryCrossEntropy::default()
        .loss(&predictions, &targets)
        .unwrap();
    assert!(loss.is_finite());
    assert!(loss > 15.0);
}

#[test]
fn test_bce_gradient() {
    let predictions = column(&[0.8, 0.4]);
    let targets = column(&[1.0, 0.0]);
    let grad = BinaryCrossEntropy::default()
        .gradient(&predictions, &targets)
        .unwrap();
    // (p - y) / (p(1-p)) / n
    assert_abs_diff_eq!(grad[[0, 0]], (0.8 - 1.0) / (0.8 * 0.2) / 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(grad[[1, 0]], 0.4 / (0.4 * 0.6) / 2.0, epsilon = 1e-5);
}

#[test]
fn test_bce_rejects_mismatched_lengths() {
    let predictions = column(&[0.5, 0.5]);
    let targets = column(&[1.0, 1.0, 1.0]);
    assert!(BinaryCrossEntropy::default()
        .loss(&predictions, &targets)
        .is_err());
}

#[test]
fn test_binary_accuracy_threshold() {
    let predictions = column(&[0.9, 0.51, 0.5, 0.1]);
    let targets = column(&[1.0, 1.0, 1.0, 1.0]);
    // 0.5 不算“真”
    assert_abs_diff_eq!(binary_accuracy(&predictions, &targets).unwrap(), 0.5);

    let targets = column(&[0.0, 0.0, 0.0, 0.0]);
    assert_abs_diff_eq!(binary_accuracy(&predictions, &targets).unwrap(), 0.5);
}

#[test]
fn test_metrics_mean() {
    let real = BatchMetrics::new(0.40, 0.80);
    let fake = BatchMetrics::new(0.60, 0.70);
    let averaged = real.mean(&fake);
    assert_abs_diff_eq!(averaged.loss, 0.50, epsilon = 1e-6);
    assert_abs_diff_eq!(averaged.accuracy, 0.75, epsilon = 1e-6);
}
