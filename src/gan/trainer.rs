/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 判别器、生成器各自的单步训练，以及三者共享的模型句柄
 */

use ndarray::{Array2, Array3, ArrayD, Ix3, IxDyn};
use rand::Rng;

use super::sampler::{BatchSampler, latent_batch};
use crate::errors::Result;
use crate::nn::{
    Adam, AdamConfig, BatchMetrics, Network, Stacked, Trainability, train_on_batch,
};
use crate::signal::SignalDataset;

/// 生成器、判别器及其优化器。训练期间由编排器独占。
///
/// 组合网络（生成器 -> 冻结的判别器）不单独保存，而是每次通过`combined()`
/// 从当前的两个网络现场组装，它的优化器状态保存在`combined_optimizer`中。
pub struct ModelHandles<G: Network, D: Network> {
    pub generator: G,
    pub discriminator: D,
    pub discriminator_optimizer: Adam,
    pub combined_optimizer: Adam,
}

impl<G: Network, D: Network> ModelHandles<G, D> {
    /// 判别器和组合网络的优化器都由同一份超参数创建
    pub fn new(generator: G, discriminator: D, optimizer: AdamConfig) -> Self {
        Self {
            generator,
            discriminator,
            discriminator_optimizer: Adam::new(optimizer),
            combined_optimizer: Adam::new(optimizer),
        }
    }

    /// 组合网络视图及其优化器，判别器在其中冻结
    pub fn combined(&mut self) -> Result<(Stacked<'_, G, D>, &mut Adam)> {
        let combined = Stacked::new(
            &mut self.generator,
            &mut self.discriminator,
            Trainability::Frozen,
        )?;
        Ok((combined, &mut self.combined_optimizer))
    }

    /// 把一批隐向量送入生成器，输出`[N, 通道, 时间步]`（模型工作区间内）
    pub fn generate_from(&self, noise: Array2<f32>) -> Result<Array3<f32>> {
        let generated = self.generator.predict(&noise.into_dyn())?;
        Ok(generated.into_dimensionality::<Ix3>()?)
    }

    /// 用新抽取的隐向量生成`count`个样本
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Array3<f32>> {
        self.generate_from(latent_batch(count, rng)?)
    }
}

fn labels(count: usize, value: f32) -> ArrayD<f32> {
    ArrayD::from_elem(IxDyn(&[count, 1]), value)
}

/// 判别器单步：真样本标为1、生成样本标为0，分两次更新，指标取两者平均
#[derive(Debug, Clone, Copy)]
pub struct DiscriminatorTrainer {
    sampler: BatchSampler,
}

impl DiscriminatorTrainer {
    pub fn new(sampler: BatchSampler) -> Self {
        Self { sampler }
    }

    pub fn step<G, D, R>(
        &self,
        handles: &mut ModelHandles<G, D>,
        dataset: &SignalDataset,
        rng: &mut R,
    ) -> Result<BatchMetrics>
    where
        G: Network,
        D: Network,
        R: Rng + ?Sized,
    {
        let half_batch = self.sampler.half_batch();
        let real = self.sampler.real_batch(dataset, rng)?;
        let fake = handles.generate_from(self.sampler.half_latent_batch(rng)?)?;

        let real_metrics = train_on_batch(
            &mut handles.discriminator,
            &mut handles.discriminator_optimizer,
            &real.into_dyn(),
            &labels(half_batch, 1.0),
            Trainability::Trainable,
        )?;
        let fake_metrics = train_on_batch(
            &mut handles.discriminator,
            &mut handles.discriminator_optimizer,
            &fake.into_dyn(),
            &labels(half_batch, 0.0),
            Trainability::Trainable,
        )?;
        Ok(real_metrics.mean(&fake_metrics))
    }
}

/// 生成器单步：通过冻结判别器的组合网络，把整batch生成样本朝“真”(1)的方向训练
#[derive(Debug, Clone, Copy)]
pub struct GeneratorTrainer {
    sampler: BatchSampler,
}

impl GeneratorTrainer {
    pub fn new(sampler: BatchSampler) -> Self {
        Self { sampler }
    }

    pub fn step<G, D, R>(&self, handles: &mut ModelHandles<G, D>, rng: &mut R) -> Result<BatchMetrics>
    where
        G: Network,
        D: Network,
        R: Rng + ?Sized,
    {
        let batch_size = self.sampler.batch_size();
        let noise = self.sampler.full_latent_batch(rng)?.into_dyn();
        let valid = ArrayD::from_elem(IxDyn(&[batch_size]), 1.0_f32);

        let (mut combined, optimizer) = handles.combined()?;
        train_on_batch(
            &mut combined,
            optimizer,
            &noise,
            &valid,
            Trainability::Trainable,
        )
    }
}
