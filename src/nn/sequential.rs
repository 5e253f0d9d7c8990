/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Sequential 网络：按顺序串联若干层，结构和权重可整体序列化
 */

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use super::descriptor::DESCRIPTOR_VERSION;
use crate::errors::{GanError, Result};
use crate::nn::{Layer, LayerDescriptor, Network, NetworkDescriptor, Parameter, TraitForLayer};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequential {
    name: String,
    input_shape: Vec<usize>,
    output_shape: Vec<usize>,
    layers: Vec<Layer>,
}

impl Sequential {
    /// 创建空网络，`input_shape`为单个样本的形状
    pub fn new(name: &str, input_shape: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            input_shape: input_shape.to_vec(),
            output_shape: input_shape.to_vec(),
            layers: Vec::new(),
        }
    }

    /// 追加一层，并检查它能否接在当前输出形状之后
    ///
    /// # 使用示例
    /// ```ignore
    /// let net = Sequential::new("d", &[3, 1200])
    ///     .add(Reshape::new(&[3600]))?
    ///     .add(Dense::new(3600, 1, &mut rng))?
    ///     .add(Sigmoid::new())?;
    /// ```
    pub fn add<L: Into<Layer>>(mut self, layer: L) -> Result<Self> {
        let layer = layer.into();
        self.output_shape = layer.output_shape(&self.output_shape)?;
        self.layers.push(layer);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn param_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.param_count()).sum()
    }

    pub fn describe(&self) -> NetworkDescriptor {
        let mut shape = self.input_shape.clone();
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                // 形状已在`add`时校验过
                shape = layer.output_shape(&shape).unwrap_or_default();
                LayerDescriptor {
                    kind: layer.kind(),
                    output_shape: shape.clone(),
                    param_count: layer.param_count(),
                }
            })
            .collect();
        NetworkDescriptor {
            version: DESCRIPTOR_VERSION.to_string(),
            name: self.name.clone(),
            input_shape: self.input_shape.clone(),
            output_shape: self.output_shape.clone(),
            layers,
            params_file: None,
        }
    }

    fn check_input(&self, inputs: &ArrayD<f32>) -> Result<()> {
        let per_sample = inputs.shape().get(1..).unwrap_or_default();
        if per_sample != self.input_shape.as_slice() {
            return Err(GanError::ShapeMismatch {
                context: format!("网络`{}`的输入", self.name),
                expected: self.input_shape.clone(),
                got: per_sample.to_vec(),
            });
        }
        Ok(())
    }
}

impl Network for Sequential {
    fn input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn output_shape(&self) -> Vec<usize> {
        self.output_shape.clone()
    }

    fn predict(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        self.check_input(inputs)?;
        self.layers
            .iter()
            .try_fold(inputs.clone(), |x, layer| layer.infer(&x))
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        self.check_input(inputs)?;
        self.layers
            .iter_mut()
            .try_fold(inputs.clone(), |x, layer| layer.forward(&x))
    }

    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        self.layers
            .iter_mut()
            .rev()
            .try_fold(grad_output.clone(), |grad, layer| layer.backward(&grad))
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.parameters_mut())
            .collect()
    }
}
