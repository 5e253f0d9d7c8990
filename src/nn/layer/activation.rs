/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 逐元素激活层：LeakyReLU、Tanh、Sigmoid
 */

use ndarray::{ArrayD, Zip};
use serde::{Deserialize, Serialize};

use super::TraitForLayer;
use crate::errors::{GanError, Result};
use crate::nn::LayerKindDescriptor;

fn check_same_shape(context: &str, cached: &ArrayD<f32>, grad: &ArrayD<f32>) -> Result<()> {
    if cached.shape() != grad.shape() {
        return Err(GanError::ShapeMismatch {
            context: context.to_string(),
            expected: cached.shape().to_vec(),
            got: grad.shape().to_vec(),
        });
    }
    Ok(())
}

/// `x > 0 ? x : alpha * x`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeakyRelu {
    alpha: f32,
    #[serde(skip)]
    input: Option<ArrayD<f32>>,
}

impl LeakyRelu {
    pub fn new(alpha: f32) -> Self {
        Self { alpha, input: None }
    }
}

impl TraitForLayer for LeakyRelu {
    fn kind(&self) -> LayerKindDescriptor {
        LayerKindDescriptor::LeakyRelu { alpha: self.alpha }
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        Ok(input_shape.to_vec())
    }

    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let alpha = self.alpha;
        Ok(inputs.mapv(|x| if x > 0.0 { x } else { alpha * x }))
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self.infer(inputs)?;
        self.input = Some(inputs.clone());
        Ok(output)
    }

    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let input = self
            .input
            .as_ref()
            .ok_or_else(|| GanError::MissingForwardCache("LeakyRelu".to_string()))?;
        check_same_shape("LeakyRelu反向", input, grad_output)?;
        let alpha = self.alpha;
        Ok(Zip::from(input)
            .and(grad_output)
            .map_collect(|&x, &g| if x > 0.0 { g } else { alpha * g }))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tanh {
    #[serde(skip)]
    output: Option<ArrayD<f32>>,
}

impl Tanh {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitForLayer for Tanh {
    fn kind(&self) -> LayerKindDescriptor {
        LayerKindDescriptor::Tanh
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        Ok(input_shape.to_vec())
    }

    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        Ok(inputs.mapv(f32::tanh))
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self.infer(inputs)?;
        self.output = Some(output.clone());
        Ok(output)
    }

    // d(tanh)/dx = 1 - y²
    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| GanError::MissingForwardCache("Tanh".to_string()))?;
        check_same_shape("Tanh反向", output, grad_output)?;
        Ok(Zip::from(output)
            .and(grad_output)
            .map_collect(|&y, &g| g * (1.0 - y * y)))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sigmoid {
    #[serde(skip)]
    output: Option<ArrayD<f32>>,
}

impl Sigmoid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TraitForLayer for Sigmoid {
    fn kind(&self) -> LayerKindDescriptor {
        LayerKindDescriptor::Sigmoid
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        Ok(input_shape.to_vec())
    }

    fn infer(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        Ok(inputs.mapv(|x| 1.0 / (1.0 + (-x).exp())))
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self.infer(inputs)?;
        self.output = Some(output.clone());
        Ok(output)
    }

    // d(sigmoid)/dx = y * (1 - y)
    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| GanError::MissingForwardCache("Sigmoid".to_string()))?;
        check_same_shape("Sigmoid反向", output, grad_output)?;
        Ok(Zip::from(output)
            .and(grad_output)
            .map_collect(|&y, &g| g * y * (1.0 - y)))
    }
}
