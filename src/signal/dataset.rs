/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 信号数据集：N个形状固定为[通道, 时间步]的样本
 */

use std::path::Path;

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, concatenate};
use ndarray_npy::read_npy;
use tracing::{debug, trace};

use super::{Scaler, SignalShape};
use crate::errors::{GanError, Result};

/// 有序的信号样本集合，内部为形状`[N, 通道, 时间步]`的数组
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDataset {
    data: Array3<f32>,
}

impl SignalDataset {
    /// 由形状为`[N, 通道, 时间步]`的数组创建数据集。
    /// N必须≥1，且单个样本的形状必须与`shape`一致。
    pub fn new(data: Array3<f32>, shape: SignalShape) -> Result<Self> {
        let (n, channels, timesteps) = data.dim();
        if n == 0 {
            return Err(GanError::EmptyDataset);
        }
        if [channels, timesteps] != shape.dims() {
            return Err(GanError::ShapeMismatch {
                context: "数据集样本".to_string(),
                expected: shape.dims().to_vec(),
                got: vec![channels, timesteps],
            });
        }
        Ok(Self { data })
    }

    /// 由若干个`[通道, 时间步]`样本拼成数据集
    pub fn from_samples(samples: &[Array2<f32>], shape: SignalShape) -> Result<Self> {
        if samples.is_empty() {
            return Err(GanError::EmptyDataset);
        }
        let views = samples
            .iter()
            .map(|sample| sample.view().insert_axis(Axis(0)))
            .collect::<Vec<_>>();
        let data = concatenate(Axis(0), &views)?;
        Self::new(data, shape)
    }

    /// 从NumPy的`.npy`文件加载数据集（元素类型可为f32或f64）
    pub fn from_npy<P: AsRef<Path>>(path: P, shape: SignalShape) -> Result<Self> {
        let path = path.as_ref();
        let data: Array3<f32> = match read_npy::<_, Array3<f32>>(path) {
            Ok(data) => data,
            Err(_) => read_npy::<_, Array3<f64>>(path)?.mapv(|x| x as f32),
        };
        debug!(path = %path.display(), samples = data.len_of(Axis(0)), "已加载数据集");
        Self::new(data, shape)
    }

    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// 合法的数据集至少含1个样本，故恒为false
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> SignalShape {
        let (_, channels, timesteps) = self.data.dim();
        SignalShape::new(channels, timesteps)
    }

    pub fn samples(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    pub fn sample(&self, index: usize) -> Result<ArrayView2<'_, f32>> {
        if index >= self.len() {
            return Err(GanError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    pub fn into_inner(self) -> Array3<f32> {
        self.data
    }

    /// 按索引取出一批样本，允许重复索引
    pub fn select(&self, indices: &[usize]) -> Result<Array3<f32>> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(GanError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.data.select(Axis(0), indices))
    }

    /// 在本数据集之后追加`other`的样本，两边的顺序都保持不变
    pub fn concat<'a>(&'a self, other: ArrayView3<'a, f32>) -> Result<Self> {
        let data = concatenate(Axis(0), &[self.data.view(), other])?;
        Self::new(data, self.shape())
    }

    /// 返回缩放到模型工作区间的新数据集，`self`不变
    pub fn down_scaled(&self) -> Self {
        Self {
            data: Scaler::down_scale(&self.data),
        }
    }
}

/// 逐样本、逐通道、逐时间步扫描，返回所有元素绝对值的最大值。
/// 仅作诊断用途，缩放系数并不依赖它。
pub fn find_max(dataset: &SignalDataset) -> f32 {
    let mut max_number = 0.0_f32;
    for sample in dataset.samples().outer_iter() {
        for channel in sample.outer_iter() {
            for &digit in channel.iter() {
                if digit.abs() > max_number {
                    max_number = digit.abs();
                    trace!(max_number, "幅值最大值更新");
                }
            }
        }
    }
    max_number
}
