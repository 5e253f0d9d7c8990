/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : GAN训练编排：epoch循环、检查点、数据增强与模型存取
 */

use ndarray::Array3;
use rand::Rng;
use tracing::{debug, info};

use super::checkpoint::{CheckpointSink, Checkpointer};
use super::config::TrainConfig;
use super::sampler::BatchSampler;
use super::store::{PersistentNetwork, load_network, save_network};
use super::trainer::{DiscriminatorTrainer, GeneratorTrainer, ModelHandles};
use crate::LATENT_DIM;
use crate::errors::{GanError, Result};
use crate::nn::{AdamConfig, BatchMetrics, Network, NetworkBuilder, Sequential};
use crate::signal::{Scaler, SignalDataset, SignalShape, find_max};

/// 训练过程所处阶段：Idle -> Running -> Terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainingPhase {
    #[default]
    Idle,
    Running,
    Terminal,
}

/// 一条检查点日志
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointRecord {
    pub epoch: usize,
    pub d_loss: f32,
    /// 判别器准确率，取值[0, 1]
    pub d_accuracy: f32,
    pub g_loss: f32,
}

impl CheckpointRecord {
    pub fn new(epoch: usize, discriminator: BatchMetrics, generator: BatchMetrics) -> Self {
        Self {
            epoch,
            d_loss: discriminator.loss,
            d_accuracy: discriminator.accuracy,
            g_loss: generator.loss,
        }
    }
}

/// 一次训练的状态，训练结束后交还调用方查看
#[derive(Debug, Clone, Default)]
pub struct TrainingState {
    pub phase: TrainingPhase,
    /// 当前（结束后为最后一个）epoch的索引
    pub epoch: usize,
    /// 按触发顺序记录的全部检查点
    pub checkpoints: Vec<CheckpointRecord>,
}

/// 触发检查点的epoch：循环内每逢`epoch % save_interval == 0`触发一次（含第0个），
/// 循环结束后再对最后一个epoch无条件触发一次
pub fn checkpoint_epochs(epochs: usize, save_interval: usize) -> Vec<usize> {
    if epochs == 0 || save_interval == 0 {
        return Vec::new();
    }
    let mut schedule: Vec<usize> = (0..epochs).step_by(save_interval).collect();
    schedule.push(epochs - 1);
    schedule
}

/// 生成器 + 判别器 + 组合网络，以及围绕它们的训练编排
pub struct Gan<G: Network = Sequential, D: Network = Sequential> {
    handles: ModelHandles<G, D>,
    shape: SignalShape,
    max_amplitude: Option<f32>,
}

impl<G: Network, D: Network> Gan<G, D> {
    /// 用构建器创建两个网络；两者的优化器共用同一份超参数
    pub fn new<B, R>(builder: &B, shape: SignalShape, optimizer: AdamConfig, rng: &mut R) -> Result<Self>
    where
        B: NetworkBuilder<Generator = G, Discriminator = D>,
        R: Rng + ?Sized,
    {
        let generator = builder.build_generator(shape, rng)?;
        let discriminator = builder.build_discriminator(shape, rng)?;
        Self::from_networks(generator, discriminator, shape, optimizer)
    }

    /// 由现成的网络创建，检查它们的输入/输出形状
    pub fn from_networks(
        generator: G,
        discriminator: D,
        shape: SignalShape,
        optimizer: AdamConfig,
    ) -> Result<Self> {
        let sample = shape.dims().to_vec();
        check_shape("生成器输入", vec![LATENT_DIM], generator.input_shape())?;
        check_shape("生成器输出", sample.clone(), generator.output_shape())?;
        check_shape("判别器输入", sample, discriminator.input_shape())?;
        check_shape("判别器输出", vec![1], discriminator.output_shape())?;

        Ok(Self {
            handles: ModelHandles::new(generator, discriminator, optimizer),
            shape,
            max_amplitude: None,
        })
    }

    pub fn shape(&self) -> SignalShape {
        self.shape
    }

    pub fn generator(&self) -> &G {
        &self.handles.generator
    }

    pub fn discriminator(&self) -> &D {
        &self.handles.discriminator
    }

    pub fn handles(&self) -> &ModelHandles<G, D> {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut ModelHandles<G, D> {
        &mut self.handles
    }

    /// 训练`config.epochs`个epoch。
    ///
    /// 数据集先整体缩小到模型工作区间（生成一份新的副本，`dataset`本身不变）；
    /// 每个epoch依次训练判别器一步、生成器一步；
    /// 检查点的触发时机见[`checkpoint_epochs`]。
    pub fn train<R, S>(
        &mut self,
        dataset: &SignalDataset,
        config: &TrainConfig,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<TrainingState>
    where
        R: Rng + ?Sized,
        S: CheckpointSink + ?Sized,
    {
        config.validate()?;
        check_shape(
            "训练数据集",
            self.shape.dims().to_vec(),
            dataset.shape().dims().to_vec(),
        )?;

        let scaled = dataset.down_scaled();
        let sampler = BatchSampler::new(config.batch_size);
        let discriminator_trainer = DiscriminatorTrainer::new(sampler);
        let generator_trainer = GeneratorTrainer::new(sampler);
        let checkpointer = Checkpointer::new(config.sample_rows);

        let mut state = TrainingState {
            phase: TrainingPhase::Running,
            ..TrainingState::default()
        };
        info!(
            epochs = config.epochs,
            batch_size = config.batch_size,
            save_interval = config.save_interval,
            samples = dataset.len(),
            "开始训练"
        );

        let mut last_record = None;
        for epoch in 0..config.epochs {
            state.epoch = epoch;

            // ---------------------
            //  训练判别器
            // ---------------------
            let d_metrics = discriminator_trainer.step(&mut self.handles, &scaled, rng)?;

            // ---------------------
            //  训练生成器
            // ---------------------
            let g_metrics = generator_trainer.step(&mut self.handles, rng)?;

            let record = CheckpointRecord::new(epoch, d_metrics, g_metrics);
            if epoch % config.save_interval == 0 {
                self.checkpoint(record, &checkpointer, rng, sink)?;
                state.checkpoints.push(record);
            }
            last_record = Some(record);
        }

        // 最后一个epoch无论是否对齐间隔都再记录一次
        if let Some(record) = last_record {
            self.checkpoint(record, &checkpointer, rng, sink)?;
            state.checkpoints.push(record);
        }

        state.phase = TrainingPhase::Terminal;
        info!(epochs = config.epochs, "训练结束");
        Ok(state)
    }

    fn checkpoint<R, S>(
        &self,
        record: CheckpointRecord,
        checkpointer: &Checkpointer,
        rng: &mut R,
        sink: &mut S,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        S: CheckpointSink + ?Sized,
    {
        info!(
            epoch = record.epoch,
            d_loss = record.d_loss,
            d_accuracy = record.d_accuracy,
            g_loss = record.g_loss,
            "{} [D loss: {:.6}, acc.: {:.2}%] [G loss: {:.6}]",
            record.epoch,
            record.d_loss,
            100.0 * record.d_accuracy,
            record.g_loss
        );
        checkpointer.save(&self.handles, record.epoch, rng, sink)
    }

    /// 用新抽取的隐向量生成`count`个样本（模型工作区间内，未放大）
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Array3<f32>> {
        self.handles.generate(count, rng)
    }

    /// 数据增强：生成`floor(len * percentage / 100)`个新样本并放大回原始幅值，
    /// 返回“原样本（顺序不变）+ 新样本（按生成顺序）”
    pub fn predict<R: Rng + ?Sized>(
        &self,
        data: &SignalDataset,
        percentage: u32,
        rng: &mut R,
    ) -> Result<SignalDataset> {
        check_shape(
            "待增强数据集",
            self.shape.dims().to_vec(),
            data.shape().dims().to_vec(),
        )?;
        let count = data.len() * percentage as usize / 100;
        let generated = Scaler::up_scale(&self.generate(count, rng)?);
        debug!(originals = data.len(), generated = count, "数据增强");
        data.concat(generated.view())
    }

    /// 扫描数据集的最大绝对幅值并记录下来。
    /// 仅供诊断，缩放系数不受它影响。
    pub fn find_max(&mut self, data: &SignalDataset) -> f32 {
        let max_number = find_max(data);
        self.max_amplitude = Some(max_number);
        max_number
    }

    /// 最近一次`find_max`的结果
    pub fn max_amplitude(&self) -> Option<f32> {
        self.max_amplitude
    }
}

impl<G: PersistentNetwork, D: Network> Gan<G, D> {
    /// 保存生成器（结构 + 权重）
    pub fn save_model(&self, name: &str) -> Result<()> {
        save_network(&self.handles.generator, name)
    }

    /// 从存储恢复生成器，只替换生成器，判别器保持不变。
    ///
    /// 组合网络每步都从当前句柄现场组装，替换后自动使用新的生成器；
    /// 组合网络的优化器状态属于旧生成器，在这里一并重置。
    pub fn load_model(&mut self, name: &str) -> Result<()> {
        let generator: G = load_network(name)?;
        check_shape("生成器输入", vec![LATENT_DIM], generator.input_shape())?;
        check_shape(
            "生成器输出",
            self.shape.dims().to_vec(),
            generator.output_shape(),
        )?;
        self.handles.generator = generator;
        self.handles.combined_optimizer.reset();
        Ok(())
    }
}

fn check_shape(context: &str, expected: Vec<usize>, got: Vec<usize>) -> Result<()> {
    if expected != got {
        return Err(GanError::ShapeMismatch {
            context: context.to_string(),
            expected,
            got,
        });
    }
    Ok(())
}
