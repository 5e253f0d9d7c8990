/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 检查点：生成若干样本、还原到原始幅值后交给输出端
 */

use std::path::PathBuf;

use ndarray::{Array2, ArrayView2, Axis};
use rand::Rng;
use tracing::debug;

use super::config::CheckpointConfig;
use super::trainer::ModelHandles;
use crate::errors::Result;
use crate::nn::Network;
use crate::signal::Scaler;
use crate::vision::{PlotStyle, save_channels_plot};

/// 检查点样本的去处
pub trait CheckpointSink {
    /// 写出第`epoch`个epoch的第`row`条样本（形状`[通道, 时间步]`，原始幅值）
    fn write_sample(&mut self, epoch: usize, row: usize, sample: ArrayView2<'_, f32>) -> Result<()>;
}

/// 每条样本渲染成一张PNG：`<dir>/<prefix>_<epoch>_<row>.png`
#[derive(Debug, Clone)]
pub struct PngSink {
    config: CheckpointConfig,
    style: PlotStyle,
}

impl PngSink {
    pub fn new(config: CheckpointConfig) -> Self {
        let style = PlotStyle::default().with_panel_size(config.panel_width, config.panel_height);
        Self { config, style }
    }

    pub fn config(&self) -> &CheckpointConfig {
        &self.config
    }

    pub fn image_path(&self, epoch: usize, row: usize) -> PathBuf {
        self.config.image_path(epoch, row)
    }
}

impl Default for PngSink {
    fn default() -> Self {
        Self::new(CheckpointConfig::default())
    }
}

impl CheckpointSink for PngSink {
    fn write_sample(&mut self, epoch: usize, row: usize, sample: ArrayView2<'_, f32>) -> Result<()> {
        let path = self.image_path(epoch, row);
        save_channels_plot(sample, &self.style, &path)?;
        debug!(path = %path.display(), "已保存检查点图像");
        Ok(())
    }
}

/// 把样本留在内存里，供调用方自行处理
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub samples: Vec<(usize, usize, Array2<f32>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次检查点对应的epoch，按写入顺序
    pub fn epochs(&self) -> Vec<usize> {
        let mut epochs: Vec<usize> = Vec::new();
        for &(epoch, row, _) in &self.samples {
            if row == 0 {
                epochs.push(epoch);
            }
        }
        epochs
    }
}

impl CheckpointSink for MemorySink {
    fn write_sample(&mut self, epoch: usize, row: usize, sample: ArrayView2<'_, f32>) -> Result<()> {
        self.samples.push((epoch, row, sample.to_owned()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Checkpointer {
    rows: usize,
}

impl Checkpointer {
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// 用新的隐向量生成`rows`条样本，放大回原始幅值后逐条写出
    pub fn save<G, D, R, S>(
        &self,
        handles: &ModelHandles<G, D>,
        epoch: usize,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<()>
    where
        G: Network,
        D: Network,
        R: Rng + ?Sized,
        S: CheckpointSink + ?Sized,
    {
        let generated = Scaler::up_scale(&handles.generate(self.rows, rng)?);
        for (row, sample) in generated.axis_iter(Axis(0)).enumerate() {
            sink.write_sample(epoch, row, sample)?;
        }
        Ok(())
    }
}
