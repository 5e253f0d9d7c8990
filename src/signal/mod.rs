/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 多通道时序信号（P300）的数据表示、缩放与幅值诊断
 */

mod dataset;
mod scaler;

pub use dataset::{SignalDataset, find_max};
pub use scaler::{SCALE_FACTOR, Scaler, down_scale, up_scale};

use serde::{Deserialize, Serialize};


/// 单个样本的形状：通道数 × 时间步数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalShape {
    pub channels: usize,
    pub timesteps: usize,
}

impl SignalShape {
    pub const fn new(channels: usize, timesteps: usize) -> Self {
        Self {
            channels,
            timesteps,
        }
    }

    /// 按`[通道, 时间步]`返回形状
    pub fn dims(&self) -> [usize; 2] {
        [self.channels, self.timesteps]
    }

    /// 单个样本展平后的元素个数
    pub fn len(&self) -> usize {
        self.channels * self.timesteps
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SignalShape {
    /// 3通道 × 1200个采样点
    fn default() -> Self {
        Self::new(3, 1200)
    }
}
