/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 神经网络能力层：GAN训练所依赖的网络接口、损失、优化器，
 *                 以及一个基于全连接层的参考实现
 */

mod builder;
mod descriptor;
pub mod layer;
mod loss;
pub mod optimizer;
mod parameter;
mod sequential;
mod stacked;

pub use builder::{DenseBuilder, NetworkBuilder};
pub use descriptor::{LayerDescriptor, LayerKindDescriptor, NetworkDescriptor};
pub use layer::{Dense, Layer, LeakyRelu, Reshape, Sigmoid, Tanh, TraitForLayer};
pub use loss::{BatchMetrics, BinaryCrossEntropy, binary_accuracy};
pub use optimizer::{Adam, AdamConfig};
pub use parameter::Parameter;
pub use sequential::Sequential;
pub use stacked::Stacked;

use crate::errors::{GanError, Result};
use ndarray::ArrayD;

#[cfg(test)]
mod tests;

/// 某次训练调用中网络权重是否允许更新，随每次训练调用显式传入。
/// 同一份判别器权重：独立训练时可训练，在组合网络中冻结。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trainability {
    Trainable,
    Frozen,
}

impl Trainability {
    pub fn is_trainable(&self) -> bool {
        matches!(self, Trainability::Trainable)
    }
}

/// 可训练网络的最小接口。
///
/// 所有形状都是“单个样本”的形状（不含batch维），
/// 所有输入/输出数组的第0维是batch维。
pub trait Network {
    fn input_shape(&self) -> Vec<usize>;
    fn output_shape(&self) -> Vec<usize>;

    /// 推理：不缓存中间结果
    fn predict(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>>;

    /// 训练用前向传播：缓存反向传播所需的中间结果
    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>>;

    /// 反向传播：把梯度累加到各参数上，并返回对输入的梯度
    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>>;

    /// 本次训练中需要交给优化器更新的参数
    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }
}

/// 在一个batch上训练一次。
///
/// 返回的损失和准确率来自更新之前的那次前向传播；
/// `trainability`为`Frozen`时只计算指标，不更新任何权重。
pub fn train_on_batch<N: Network + ?Sized>(
    network: &mut N,
    optimizer: &mut Adam,
    inputs: &ArrayD<f32>,
    targets: &ArrayD<f32>,
    trainability: Trainability,
) -> Result<BatchMetrics> {
    let batch = inputs.shape().first().copied().unwrap_or(0);
    if targets.shape().first().copied() != Some(batch) {
        return Err(GanError::ShapeMismatch {
            context: "训练标签的batch大小".to_string(),
            expected: vec![batch],
            got: targets.shape().to_vec(),
        });
    }

    network.zero_grad();
    let predictions = network.forward(inputs)?;
    let criterion = BinaryCrossEntropy::default();
    let metrics = BatchMetrics {
        loss: criterion.loss(&predictions, targets)?,
        accuracy: binary_accuracy(&predictions, targets)?,
    };

    if trainability.is_trainable() {
        let grad = criterion.gradient(&predictions, targets)?;
        network.backward(&grad)?;
        optimizer.step(network.parameters_mut())?;
    }
    Ok(metrics)
}
