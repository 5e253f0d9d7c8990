/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Reshape 层：只改变每个样本的形状，batch维保持不变
 */

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use super::TraitForLayer;
use crate::errors::{GanError, Result};
use crate::nn::LayerKindDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reshape {
    /// 目标形状（单个样本，不含batch维）
    target: Vec<usize>,
    #[serde(skip)]
    input_shape: Option<Vec<usize>>,
}

impl Reshape {
    pub fn new(target: &[usize]) -> Self {
        Self {
            target: target.to_vec(),
            input_shape: None,
        }
    }

    fn reshape_to(inputs: &ArrayD<f32>, shape: &[usize]) -> Result<ArrayD<f32>> {
        let reshaped = inputs
            .as_standard_layout()
            .into_owned()
            .into_shape(IxDyn(shape))?;
        Ok(reshaped)
    }
}

impl TraitForLayer for Reshape {
    fn kind(&self) -> LayerKindDescriptor {
        LayerKindDescriptor::Reshape {
            target: self.target.clone(),
        }
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        if input_shape.iter().product::<usize>() != self.target.iter().product::<usize>() {
            return Err(GanError::ShapeMismatch {
                context: "Reshape层元素个数".to_string(),
                expected: self.target.clone(),
                got: input_shape.to_vec(),
            });
        }
        Ok(self.target.clone())
    }

    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let mut shape = vec![inputs.shape().first().copied().unwrap_or(0)];
        shape.extend_from_slice(&self.target);
        Self::reshape_to(inputs, &shape)
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self.infer(inputs)?;
        self.input_shape = Some(inputs.shape().to_vec());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let input_shape = self
            .input_shape
            .as_ref()
            .ok_or_else(|| GanError::MissingForwardCache("Reshape".to_string()))?;
        Self::reshape_to(grad_output, input_shape)
    }
}
