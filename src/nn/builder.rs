/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 网络构建器：按信号形状创建生成器和判别器
 */

use rand::Rng;

use crate::LATENT_DIM;
use crate::errors::Result;
use crate::nn::{Dense, LeakyRelu, Network, Reshape, Sequential, Sigmoid, Tanh};
use crate::signal::SignalShape;

/// 网络结构由构建器决定，训练编排只依赖`Network`接口
pub trait NetworkBuilder {
    type Generator: Network;
    type Discriminator: Network;

    /// 生成器：`[LATENT_DIM]` -> `[通道, 时间步]`
    fn build_generator<R: Rng + ?Sized>(
        &self,
        shape: SignalShape,
        rng: &mut R,
    ) -> Result<Self::Generator>;

    /// 判别器：`[通道, 时间步]` -> `[1]`（为真的概率）
    fn build_discriminator<R: Rng + ?Sized>(
        &self,
        shape: SignalShape,
        rng: &mut R,
    ) -> Result<Self::Discriminator>;
}

/// 参考实现：各含一个隐藏层的全连接网络
/// - Generator: z(1000) -> FC(hidden, `LeakyReLU`) -> FC(通道×时间步, Tanh) -> reshape
/// - Discriminator: reshape -> FC(hidden, `LeakyReLU`) -> FC(1, Sigmoid)
#[derive(Debug, Clone, Copy)]
pub struct DenseBuilder {
    pub hidden: usize,
    pub leaky_alpha: f32,
}

impl Default for DenseBuilder {
    fn default() -> Self {
        Self {
            hidden: 256,
            leaky_alpha: 0.2,
        }
    }
}

impl DenseBuilder {
    pub fn new(hidden: usize) -> Self {
        Self {
            hidden,
            ..Self::default()
        }
    }
}

impl NetworkBuilder for DenseBuilder {
    type Generator = Sequential;
    type Discriminator = Sequential;

    fn build_generator<R: Rng + ?Sized>(
        &self,
        shape: SignalShape,
        rng: &mut R,
    ) -> Result<Sequential> {
        Sequential::new("generator", &[LATENT_DIM])
            .add(Dense::new(LATENT_DIM, self.hidden, rng))?
            .add(LeakyRelu::new(self.leaky_alpha))?
            .add(Dense::new(self.hidden, shape.len(), rng))?
            .add(Tanh::new())?
            .add(Reshape::new(&shape.dims()))
    }

    fn build_discriminator<R: Rng + ?Sized>(
        &self,
        shape: SignalShape,
        rng: &mut R,
    ) -> Result<Sequential> {
        Sequential::new("discriminator", &shape.dims())
            .add(Reshape::new(&[shape.len()]))?
            .add(Dense::new(shape.len(), self.hidden, rng))?
            .add(LeakyRelu::new(self.leaky_alpha))?
            .add(Dense::new(self.hidden, 1, rng))?
            .add(Sigmoid::new())
    }
}
