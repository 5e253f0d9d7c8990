//! # P300 GAN
//!
//! 用对抗生成网络（GAN）合成形状为`3通道 × 1200采样点`的P300时序信号，
//! 作为合成数据增强使用。
//!
//! 核心是对抗训练的编排：判别器与生成器交替优化、批次抽样、幅值缩放、
//! 定期检查点与模型的保存/加载。网络本身通过[`nn::Network`]接口接入，
//! crate内附带一个全连接的参考实现[`nn::DenseBuilder`]。
//!

pub mod errors;
pub mod gan;
pub mod nn;
pub mod signal;
pub mod vision;

pub use errors::{GanError, Result};
pub use gan::{Gan, TrainConfig, TrainingState};
pub use signal::{SignalDataset, SignalShape};

/// 隐向量维度，整个系统生命周期内固定
pub const LATENT_DIM: usize = 1000;
