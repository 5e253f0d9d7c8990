/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 每个训练步的真实样本批次与隐向量批次
 */

use ndarray::{Array2, Array3};
use rand::Rng;

use crate::LATENT_DIM;
use crate::errors::{GanError, Result};
use crate::signal::SignalDataset;

/// 生成`count`个`LATENT_DIM`维的标准正态隐向量（Box-Muller 变换）。
/// 随机源由调用方传入，固定种子即可复现。
pub fn latent_batch<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Array2<f32>> {
    let data_len = count * LATENT_DIM;
    let mut data = Vec::with_capacity(data_len);

    while data.len() < data_len {
        let u1: f32 = rng.r#gen();
        let u2: f32 = rng.r#gen();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f32::consts::PI * u2;
        let z0 = r * theta.cos();
        let z1 = r * theta.sin();

        if z0.is_finite() {
            data.push(z0);
        }
        if data.len() < data_len && z1.is_finite() {
            data.push(z1);
        }
    }

    Ok(Array2::from_shape_vec((count, LATENT_DIM), data)?)
}

/// 按batch大小抽样。
/// 真实样本的索引是有放回的独立均匀抽样，同一批内允许重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSampler {
    batch_size: usize,
    half_batch: usize,
}

impl BatchSampler {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            half_batch: batch_size / 2,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn half_batch(&self) -> usize {
        self.half_batch
    }

    /// 从`[0, len)`中有放回地抽取半batch个索引
    pub fn sample_indices<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Result<Vec<usize>> {
        if len == 0 {
            return Err(GanError::EmptyDataset);
        }
        Ok((0..self.half_batch).map(|_| rng.gen_range(0..len)).collect())
    }

    /// 半batch个真实样本，形状`[半batch, 通道, 时间步]`
    pub fn real_batch<R: Rng + ?Sized>(
        &self,
        dataset: &SignalDataset,
        rng: &mut R,
    ) -> Result<Array3<f32>> {
        let indices = self.sample_indices(dataset.len(), rng)?;
        dataset.select(&indices)
    }

    /// 判别器一步所需的半batch个隐向量
    pub fn half_latent_batch<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f32>> {
        latent_batch(self.half_batch, rng)
    }

    /// 生成器一步所需的整batch个隐向量
    pub fn full_latent_batch<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f32>> {
        latent_batch(self.batch_size, rng)
    }
}
