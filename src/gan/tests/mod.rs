/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : GAN训练编排的单元测试
 */

use ndarray::{Array3, ArrayD};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::gan::Gan;
use crate::nn::{AdamConfig, DenseBuilder, Network};
use crate::signal::{SignalDataset, SignalShape};

mod checkpoint;

/// 测试用的小形状，保证训练足够快
const SMALL: SignalShape = SignalShape::new(2, 8);

fn small_gan(seed: u64) -> Gan {
    let mut rng = StdRng::seed_from_u64(seed);
    Gan::new(&DenseBuilder::new(4), SMALL, AdamConfig::default(), &mut rng).unwrap()
}

/// 幅值在±100附近的确定性数据集
fn dataset(len: usize, shape: SignalShape) -> SignalDataset {
    let data = Array3::from_shape_fn((len, shape.channels, shape.timesteps), |(n, c, t)| {
        (((n * 7 + c * 3 + t) % 11) as f32 - 5.0) * 20.0
    });
    SignalDataset::new(data, shape).unwrap()
}

fn snapshot<N: Network>(network: &mut N) -> Vec<ArrayD<f32>> {
    network
        .parameters_mut()
        .into_iter()
        .map(|p| p.value().clone())
        .collect()
}

fn same_params(a: &[ArrayD<f32>], b: &[ArrayD<f32>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// 每个测试独占的临时目录
fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("p300_gan_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
