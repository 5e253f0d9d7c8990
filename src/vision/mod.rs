/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 本模块提供信号可视化相关的功能：把多通道信号画成折线图。
 */

mod plot;

pub use plot::{PlotStyle, render_channels, save_channels_plot};

#[cfg(test)]
mod tests;
