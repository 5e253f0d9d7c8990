/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 组合网络：生成器的输出直接送入判别器
 */

use ndarray::ArrayD;

use crate::errors::{GanError, Result};
use crate::nn::{Network, Parameter, Trainability};

/// 借用一个生成器（head）和一个判别器（tail），作为一个整体网络使用。
///
/// tail 是否可训练由构造时传入的`Trainability`决定，只对这个组合视图生效：
/// - `Frozen`：梯度照常穿过 tail 传回 head，但 tail 的参数不交给优化器，
///   反向后累积在 tail 上的梯度会被清掉；
/// - `Trainable`：两段参数都参与更新。
///
/// 组合视图每次按需构造，不持有网络本身，
/// 所以替换生成器之后下一次构造的组合网络自然使用新的生成器。
pub struct Stacked<'a, G: Network, D: Network> {
    head: &'a mut G,
    tail: &'a mut D,
    tail_trainability: Trainability,
}

impl<'a, G: Network, D: Network> Stacked<'a, G, D> {
    pub fn new(
        head: &'a mut G,
        tail: &'a mut D,
        tail_trainability: Trainability,
    ) -> Result<Self> {
        let (head_out, tail_in) = (head.output_shape(), tail.input_shape());
        if head_out != tail_in {
            return Err(GanError::ShapeMismatch {
                context: "组合网络的衔接处".to_string(),
                expected: tail_in,
                got: head_out,
            });
        }
        Ok(Self {
            head,
            tail,
            tail_trainability,
        })
    }

    pub fn tail_trainability(&self) -> Trainability {
        self.tail_trainability
    }
}

impl<G: Network, D: Network> Network for Stacked<'_, G, D> {
    fn input_shape(&self) -> Vec<usize> {
        self.head.input_shape()
    }

    fn output_shape(&self) -> Vec<usize> {
        self.tail.output_shape()
    }

    fn predict(&self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let hidden = self.head.predict(inputs)?;
        self.tail.predict(&hidden)
    }

    fn forward(&mut self, inputs: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let hidden = self.head.forward(inputs)?;
        self.tail.forward(&hidden)
    }

    fn backward(&mut self, grad_output: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let grad_hidden = self.tail.backward(grad_output)?;
        if !self.tail_trainability.is_trainable() {
            self.tail.zero_grad();
        }
        self.head.backward(&grad_hidden)
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = self.head.parameters_mut();
        if self.tail_trainability.is_trainable() {
            params.extend(self.tail.parameters_mut());
        }
        params
    }
}
