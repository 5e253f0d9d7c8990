/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 可训练参数：参数值及其累积的梯度
 */

use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

use crate::errors::{GanError, Result};

/// 可训练参数：当前值 + 累积梯度（梯度不参与序列化）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    value: ArrayD<f32>,
    #[serde(skip)]
    grad: Option<ArrayD<f32>>,
}

impl Parameter {
    pub fn new(value: ArrayD<f32>) -> Self {
        Self { value, grad: None }
    }

    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.value
    }

    pub fn grad(&self) -> Option<&ArrayD<f32>> {
        self.grad.as_ref()
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// 元素个数
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// 累加梯度，形状必须与参数一致
    pub fn accumulate_grad(&mut self, grad: ArrayD<f32>) -> Result<()> {
        if grad.shape() != self.value.shape() {
            return Err(GanError::ShapeMismatch {
                context: "参数梯度".to_string(),
                expected: self.value.shape().to_vec(),
                got: grad.shape().to_vec(),
            });
        }
        match &mut self.grad {
            Some(existing) => *existing += &grad,
            None => self.grad = Some(grad),
        }
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad = None;
    }

    /// 同时借出参数值（可变）和梯度（只读），供优化器原地更新
    pub(crate) fn value_and_grad_mut(&mut self) -> (&mut ArrayD<f32>, Option<&ArrayD<f32>>) {
        (&mut self.value, self.grad.as_ref())
    }
}
