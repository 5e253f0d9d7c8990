/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 训练与检查点配置（只定义结构，不负责从文件加载）
 */

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{GanError, Result};

/// 一次训练的参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    /// 生成器每步的样本数；判别器每步用其一半真样本、一半生成样本
    pub batch_size: usize,
    /// 每隔多少个epoch记录一次检查点（含第0个epoch）
    pub save_interval: usize,
    /// 每个检查点生成的样本条数
    pub sample_rows: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            batch_size: 64,
            save_interval: 50,
            sample_rows: 3,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_save_interval(mut self, save_interval: usize) -> Self {
        self.save_interval = save_interval;
        self
    }

    pub fn with_sample_rows(mut self, sample_rows: usize) -> Self {
        self.sample_rows = sample_rows;
        self
    }

    pub fn half_batch(&self) -> usize {
        self.batch_size / 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(GanError::InvalidConfig("epochs须≥1".to_string()));
        }
        if self.batch_size < 2 {
            return Err(GanError::InvalidConfig(format!(
                "batch_size须≥2（半batch不能为0），实际为{}",
                self.batch_size
            )));
        }
        if self.save_interval == 0 {
            return Err(GanError::InvalidConfig("save_interval须≥1".to_string()));
        }
        Ok(())
    }
}

/// 检查点图片的输出位置与尺寸
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// 输出目录，须事先存在
    pub dir: PathBuf,
    /// 文件名前缀：`<prefix>_<epoch>_<row>.png`
    pub prefix: String,
    /// 每个通道子图的宽、高（像素）
    pub panel_width: u32,
    pub panel_height: u32,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("training"),
            prefix: "P300".to_string(),
            panel_width: 320,
            panel_height: 240,
        }
    }
}

impl CheckpointConfig {
    pub fn image_path(&self, epoch: usize, row: usize) -> PathBuf {
        self.dir
            .join(format!("{}_{}_{}.png", self.prefix, epoch, row))
    }
}
