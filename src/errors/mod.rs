/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 全局错误类型
 */

use std::path::PathBuf;
use thiserror::Error;

/// 本crate统一使用的结果类型
pub type Result<T> = std::result::Result<T, GanError>;

#[derive(Error, Debug)]
pub enum GanError {
    // 形状相关
    #[error("形状不匹配（{context}）：期望{expected:?}，实际{got:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    #[error("数组形状错误：{0}")]
    Shape(#[from] ndarray::ShapeError),

    // 数据集
    #[error("数据集为空")]
    EmptyDataset,
    #[error("样本索引越界：{index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    // 训练配置
    #[error("训练配置无效：{0}")]
    InvalidConfig(String),

    // 网络与优化器
    #[error("网络`{0}`尚未执行过训练前向传播，无法反向传播")]
    MissingForwardCache(String),
    #[error("优化器状态与参数不匹配：已记录{expected}个参数，本次传入{got}个")]
    OptimizerStateMismatch { expected: usize, got: usize },

    // 读写
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("读取npy文件失败: {0}")]
    ReadNpy(#[from] ndarray_npy::ReadNpyError),
    #[error("图像保存失败: {0}")]
    Image(#[from] image::ImageError),
    #[error("序列化失败（{}）：{message}", .path.display())]
    Serialization { path: PathBuf, message: String },
}
