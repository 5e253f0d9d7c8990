/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : GAN对抗训练：批次抽样、判别器/生成器交替训练、检查点与模型存取
 */

mod checkpoint;
mod config;
mod orchestrator;
mod sampler;
mod store;
mod trainer;

pub use checkpoint::{CheckpointSink, Checkpointer, MemorySink, PngSink};
pub use config::{CheckpointConfig, TrainConfig};
pub use orchestrator::{
    CheckpointRecord, Gan, TrainingPhase, TrainingState, checkpoint_epochs,
};
pub use sampler::{BatchSampler, latent_batch};
pub use store::{PersistentNetwork, load_network, save_network};
pub use trainer::{DiscriminatorTrainer, GeneratorTrainer, ModelHandles};

#[cfg(test)]
mod tests;
