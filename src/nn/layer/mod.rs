/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Layer 模块 - 组成`Sequential`网络的基本层
 *
 * 每个层都能：
 * - 推理（infer，不缓存）
 * - 训练前向（forward，缓存反向所需的值）
 * - 反向（backward，累加参数梯度并返回输入梯度）
 */

mod activation;
mod dense;
mod reshape;

pub use activation::{LeakyRelu, Sigmoid, Tanh};
pub use dense::Dense;
pub use reshape::Reshape;

use enum_dispatch::enum_dispatch;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::nn::{LayerKindDescriptor, Parameter};

#[enum_dispatch]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Dense,
    LeakyRelu,
    Tanh,
    Sigmoid,
    Reshape,
}

#[enum_dispatch(Layer)]
pub trait TraitForLayer {
    /// 层的类型描述（用于模型描述符）
    fn kind(&self) -> LayerKindDescriptor;
    /// 根据单个样本的输入形状推出输出形状，形状不兼容则报错
    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>>;
    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>>;
    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>>;
    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>>;
    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }
    fn param_count(&self) -> usize {
        0
    }
}
