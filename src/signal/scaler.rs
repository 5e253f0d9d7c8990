/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 原始幅值与模型工作区间之间的线性缩放
 */

use ndarray::{Array, ArrayBase, Data, Dimension};

/// 固定缩放系数（不可配置）
pub const SCALE_FACTOR: f32 = 100.0;

/// 原始幅值 -> 模型工作区间
pub fn down_scale(number: f32) -> f32 {
    number / SCALE_FACTOR
}

/// 模型工作区间 -> 原始幅值
pub fn up_scale(number: f32) -> f32 {
    number * SCALE_FACTOR
}

/// 对整个数组逐元素缩放。
/// 所有方法都返回新数组，调用方持有的原数据不会被修改。
pub struct Scaler;

impl Scaler {
    pub fn down_scale<S, D>(data: &ArrayBase<S, D>) -> Array<f32, D>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        data.mapv(down_scale)
    }

    pub fn up_scale<S, D>(data: &ArrayBase<S, D>) -> Array<f32, D>
    where
        S: Data<Elem = f32>,
        D: Dimension,
    {
        data.mapv(up_scale)
    }
}
