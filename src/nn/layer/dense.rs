/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Dense (全连接) 层
 */

use ndarray::{Array, Array1, Array2, ArrayD, Axis, Ix1, Ix2};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use super::TraitForLayer;
use crate::errors::{GanError, Result};
use crate::nn::{LayerKindDescriptor, Parameter};

/// 全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    /// 权重参数 [in_features, out_features]
    weights: Parameter,
    /// 偏置参数 [out_features]
    bias: Parameter,
    in_features: usize,
    out_features: usize,
    #[serde(skip)]
    input: Option<Array2<f32>>,
}

impl Dense {
    /// 创建新的 Dense 层，权重用 Glorot 均匀分布初始化，偏置为零
    pub fn new<R: Rng + ?Sized>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        let limit = (6.0 / (in_features + out_features) as f32).sqrt();
        let uniform = Uniform::from(-limit..=limit);
        let weights = Array::from_shape_simple_fn((in_features, out_features), || {
            uniform.sample(&mut *rng)
        });
        Self::from_weights(weights, Array::zeros(out_features))
    }

    /// 由给定权重和偏置创建（主要用于测试）
    pub fn from_weights(weights: Array2<f32>, bias: Array1<f32>) -> Self {
        let (in_features, out_features) = weights.dim();
        Self {
            weights: Parameter::new(weights.into_dyn()),
            bias: Parameter::new(bias.into_dyn()),
            in_features,
            out_features,
            input: None,
        }
    }

    pub fn weights(&self) -> &Parameter {
        &self.weights
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    fn as_matrix(&self, inputs: &ArrayD<f32>) -> Result<Array2<f32>> {
        let inputs = inputs.view().into_dimensionality::<Ix2>()?;
        if inputs.ncols() != self.in_features {
            return Err(GanError::ShapeMismatch {
                context: "Dense层输入".to_string(),
                expected: vec![self.in_features],
                got: vec![inputs.ncols()],
            });
        }
        Ok(inputs.to_owned())
    }

    fn compute(&self, inputs: &Array2<f32>) -> Result<ArrayD<f32>> {
        let weights = self.weights.value().view().into_dimensionality::<Ix2>()?;
        let bias = self.bias.value().view().into_dimensionality::<Ix1>()?;
        Ok((inputs.dot(&weights) + &bias).into_dyn())
    }
}

impl TraitForLayer for Dense {
    fn kind(&self) -> LayerKindDescriptor {
        LayerKindDescriptor::Dense {
            in_features: self.in_features,
            out_features: self.out_features,
        }
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        if input_shape != [self.in_features] {
            return Err(GanError::ShapeMismatch {
                context: "Dense层输入".to_string(),
                expected: vec![self.in_features],
                got: input_shape.to_vec(),
            });
        }
        Ok(vec![self.out_features])
    }

    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let inputs = self.as_matrix(inputs)?;
        self.compute(&inputs)
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let inputs = self.as_matrix(inputs)?;
        let output = self.compute(&inputs)?;
        self.input = Some(inputs);
        Ok(output)
    }

    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let inputs = self
            .input
            .as_ref()
            .ok_or_else(|| GanError::MissingForwardCache("Dense".to_string()))?;
        let grad_output = grad_output.view().into_dimensionality::<Ix2>()?;

        let grad_weights = inputs.t().dot(&grad_output);
        let grad_bias = grad_output.sum_axis(Axis(0));
        let grad_inputs = {
            let weights = self.weights.value().view().into_dimensionality::<Ix2>()?;
            grad_output.dot(&weights.t())
        };

        self.weights.accumulate_grad(grad_weights.into_dyn())?;
        self.bias.accumulate_grad(grad_bias.into_dyn())?;
        Ok(grad_inputs.into_dyn())
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.weights, &mut self.bias]
    }

    fn param_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }
}
