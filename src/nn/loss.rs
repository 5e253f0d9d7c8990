/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 二元交叉熵损失及二元准确率
 */

use ndarray::{ArrayD, Zip};

use crate::errors::{GanError, Result};

/// 一次`train_on_batch`的结果
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BatchMetrics {
    pub loss: f32,
    /// 取值[0, 1]
    pub accuracy: f32,
}

impl BatchMetrics {
    pub fn new(loss: f32, accuracy: f32) -> Self {
        Self { loss, accuracy }
    }

    /// 逐项算术平均
    pub fn mean(&self, other: &BatchMetrics) -> BatchMetrics {
        BatchMetrics {
            loss: 0.5 * (self.loss + other.loss),
            accuracy: 0.5 * (self.accuracy + other.accuracy),
        }
    }
}

/// 二元交叉熵：对batch内所有元素取平均。
/// 概率先裁剪到`[epsilon, 1 - epsilon]`，避免`ln(0)`。
#[derive(Debug, Clone, Copy)]
pub struct BinaryCrossEntropy {
    epsilon: f32,
}

impl Default for BinaryCrossEntropy {
    fn default() -> Self {
        Self { epsilon: 1e-7 }
    }
}

impl BinaryCrossEntropy {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    pub fn loss(&self, predictions: &ArrayD<f32>, targets: &ArrayD<f32>) -> Result<f32> {
        let targets = broadcast_targets(predictions, targets)?;
        let (low, high) = (self.epsilon, 1.0 - self.epsilon);
        let mut sum = 0.0_f32;
        Zip::from(predictions).and(&targets).for_each(|&p, &y| {
            let p = p.clamp(low, high);
            sum -= y * p.ln() + (1.0 - y) * (1.0 - p).ln();
        });
        Ok(sum / predictions.len().max(1) as f32)
    }

    /// 损失对预测概率的梯度
    pub fn gradient(&self, predictions: &ArrayD<f32>, targets: &ArrayD<f32>) -> Result<ArrayD<f32>> {
        let targets = broadcast_targets(predictions, targets)?;
        let (low, high) = (self.epsilon, 1.0 - self.epsilon);
        let n = predictions.len().max(1) as f32;
        Ok(Zip::from(predictions).and(&targets).map_collect(|&p, &y| {
            let p = p.clamp(low, high);
            (p - y) / (p * (1.0 - p)) / n
        }))
    }
}

/// 预测概率>0.5视为1，与标签一致的比例
pub fn binary_accuracy(predictions: &ArrayD<f32>, targets: &ArrayD<f32>) -> Result<f32> {
    let targets = broadcast_targets(predictions, targets)?;
    let mut hits = 0usize;
    Zip::from(predictions).and(&targets).for_each(|&p, &y| {
        if (p > 0.5) == (y > 0.5) {
            hits += 1;
        }
    });
    Ok(hits as f32 / predictions.len().max(1) as f32)
}

// 标签可以是`[batch]`或`[batch, 1]`，统一成与预测相同的形状
fn broadcast_targets(predictions: &ArrayD<f32>, targets: &ArrayD<f32>) -> Result<ArrayD<f32>> {
    if predictions.len() != targets.len() {
        return Err(GanError::ShapeMismatch {
            context: "损失函数的标签".to_string(),
            expected: predictions.shape().to_vec(),
            got: targets.shape().to_vec(),
        });
    }
    let targets = targets
        .as_standard_layout()
        .into_owned()
        .into_shape(predictions.raw_dim())?;
    Ok(targets)
}
