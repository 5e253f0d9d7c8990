/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 多通道折线图：每个通道一个子图，横向排成一行
 */

use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use ndarray::{ArrayView1, ArrayView2};

use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotStyle {
    /// 每个子图的宽、高（像素）
    pub panel_width: u32,
    pub panel_height: u32,
    /// 子图边框到绘图区的留白
    pub margin: u32,
    pub background: Rgb<u8>,
    pub frame: Rgb<u8>,
    pub line: Rgb<u8>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            panel_width: 320,
            panel_height: 240,
            margin: 12,
            background: Rgb([255, 255, 255]),
            frame: Rgb([0, 0, 0]),
            line: Rgb([31, 119, 180]),
        }
    }
}

impl PlotStyle {
    pub fn with_panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width;
        self.panel_height = height;
        self
    }
}

/// 把`[通道, 时间步]`的样本画成一张图，每个通道占一个子图。
/// 每个子图的纵轴按该通道自身的最小/最大值缩放。
pub fn render_channels(sample: ArrayView2<'_, f32>, style: &PlotStyle) -> RgbImage {
    let channels = sample.nrows().max(1) as u32;
    let mut image = RgbImage::from_pixel(
        style.panel_width * channels,
        style.panel_height,
        style.background,
    );

    for (index, channel) in sample.outer_iter().enumerate() {
        let left = index as u32 * style.panel_width + style.margin;
        let width = style.panel_width.saturating_sub(2 * style.margin).max(2);
        let height = style.panel_height.saturating_sub(2 * style.margin).max(2);
        let area = Rect::at(left as i32, style.margin as i32).of_size(width, height);

        draw_hollow_rect_mut(&mut image, area, style.frame);
        draw_polyline(&mut image, channel, area, style.line);
    }
    image
}

/// 渲染并写出PNG，目录须已存在
pub fn save_channels_plot<P: AsRef<Path>>(
    sample: ArrayView2<'_, f32>,
    style: &PlotStyle,
    path: P,
) -> Result<()> {
    render_channels(sample, style).save(path)?;
    Ok(())
}

fn draw_polyline(image: &mut RgbImage, values: ArrayView1<'_, f32>, area: Rect, color: Rgb<u8>) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (low, high) = finite.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if low > high {
        return;
    }
    // 常数信号画在正中
    let (low, high) = if high - low < f32::EPSILON {
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    };

    // 边框占用最外一圈像素
    let x0 = area.left() as f32 + 1.0;
    let y0 = area.top() as f32 + 1.0;
    let plot_width = (area.width() as f32 - 3.0).max(1.0);
    let plot_height = (area.height() as f32 - 3.0).max(1.0);
    let steps = (values.len().max(2) - 1) as f32;

    let to_point = |t: usize, v: f32| {
        let x = x0 + t as f32 / steps * plot_width;
        let y = y0 + (high - v) / (high - low) * plot_height;
        (x, y)
    };

    if values.len() == 1 {
        let (_, y) = to_point(0, values[0]);
        draw_line_segment_mut(image, (x0, y), (x0 + plot_width, y), color);
        return;
    }
    for (t, pair) in values.windows(2).into_iter().enumerate() {
        let (a, b) = (pair[0], pair[1]);
        if a.is_finite() && b.is_finite() {
            draw_line_segment_mut(image, to_point(t, a), to_point(t + 1, b), color);
        }
    }
}
