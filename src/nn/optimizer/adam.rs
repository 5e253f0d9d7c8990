/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : Adam优化器实现
 */

use ndarray::{ArrayD, Zip};
use serde::{Deserialize, Serialize};

use crate::errors::{GanError, Result};
use crate::nn::Parameter;

/// Adam的超参数。
/// 整个GAN只构造一份，判别器和组合网络各自的`Adam`都由它创建。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdamConfig {
    pub learning_rate: f32,
    pub beta1: f32,
    pub beta2: f32,
    pub epsilon: f32,
}

impl Default for AdamConfig {
    /// lr=0.0002、beta1=0.5（对GAN更稳定）
    fn default() -> Self {
        Self {
            learning_rate: 0.0002,
            beta1: 0.5,
            beta2: 0.999,
            epsilon: 1e-7,
        }
    }
}

/// Adam优化器。
/// 矩估计按参数在`parameters_mut()`中的位置记录，
/// 因此同一个实例只能服务于同一个（参数列表顺序不变的）网络。
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    /// 一阶矩估计
    m: Vec<ArrayD<f32>>,
    /// 二阶矩估计
    v: Vec<ArrayD<f32>>,
    /// 时间步
    t: i32,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Self {
        Self {
            config,
            m: Vec::new(),
            v: Vec::new(),
            t: 0,
        }
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    pub fn learning_rate(&self) -> f32 {
        self.config.learning_rate
    }

    /// 已执行的更新步数
    pub fn steps(&self) -> i32 {
        self.t
    }

    /// 清除矩估计和时间步
    pub fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }

    /// 用参数上已累积的梯度执行一步更新（没有梯度的参数跳过）
    pub fn step(&mut self, mut params: Vec<&mut Parameter>) -> Result<()> {
        if self.m.is_empty() {
            self.m = params.iter().map(|p| ArrayD::zeros(p.shape())).collect();
            self.v = params.iter().map(|p| ArrayD::zeros(p.shape())).collect();
        } else if self.m.len() != params.len() {
            return Err(GanError::OptimizerStateMismatch {
                expected: self.m.len(),
                got: params.len(),
            });
        }
        self.t += 1;

        let AdamConfig {
            learning_rate,
            beta1,
            beta2,
            epsilon,
        } = self.config;
        // 偏差修正
        let correction1 = 1.0 - beta1.powi(self.t);
        let correction2 = 1.0 - beta2.powi(self.t);

        for ((param, m), v) in params.iter_mut().zip(&mut self.m).zip(&mut self.v) {
            let (value, grad) = param.value_and_grad_mut();
            let Some(grad) = grad else {
                continue;
            };
            if m.shape() != grad.shape() {
                return Err(GanError::ShapeMismatch {
                    context: "Adam矩估计".to_string(),
                    expected: m.shape().to_vec(),
                    got: grad.shape().to_vec(),
                });
            }

            // m = β1 * m + (1 - β1) * g
            // v = β2 * v + (1 - β2) * g²
            Zip::from(&mut *m).and(&mut *v).and(grad).for_each(|m, v, &g| {
                *m = beta1 * *m + (1.0 - beta1) * g;
                *v = beta2 * *v + (1.0 - beta2) * g * g;
            });

            // θ = θ - α * m_hat / (√v_hat + ε)
            Zip::from(value).and(&*m).and(&*v).for_each(|w, &m, &v| {
                let m_hat = m / correction1;
                let v_hat = v / correction2;
                *w -= learning_rate * m_hat / (v_hat.sqrt() + epsilon);
            });
        }
        Ok(())
    }
}
