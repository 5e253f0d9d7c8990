/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 折线图渲染测试
 */

use image::{GenericImageView, Rgb};
use ndarray::{Array2, array};

use crate::vision::{PlotStyle, render_channels, save_channels_plot};

fn count_color(image: &image::RgbImage, x_range: std::ops::Range<u32>, color: Rgb<u8>) -> usize {
    image
        .enumerate_pixels()
        .filter(|(x, _, p)| x_range.contains(x) && **p == color)
        .count()
}

#[test]
fn test_one_panel_per_channel() {
    let style = PlotStyle::default().with_panel_size(100, 60);
    let sample = Array2::from_shape_fn((3, 50), |(c, t)| ((t as f32) * 0.2 + c as f32).sin());
    let image = render_channels(sample.view(), &style);

    assert_eq!(image.dimensions(), (300, 60));
    // 左上角是背景色
    assert_eq!(*image.get_pixel(0, 0), style.background);
    // 每个子图里都有折线像素
    for panel in 0..3 {
        let range = panel * 100..(panel + 1) * 100;
        assert!(count_color(&image, range, style.line) > 0, "子图{panel}没有折线");
    }
}

#[test]
fn test_constant_and_non_finite_signals_do_not_panic() {
    let style = PlotStyle::default().with_panel_size(40, 30);
    let sample = array![[5.0_f32, 5.0, 5.0], [f32::NAN, 1.0, 2.0]];
    let image = render_channels(sample.view(), &style);
    assert_eq!(image.dimensions(), (80, 30));
    assert!(count_color(&image, 0..40, style.line) > 0);

    let single = array![[1.0_f32]];
    let image = render_channels(single.view(), &style);
    assert_eq!(image.dimensions(), (40, 30));
}

#[test]
fn test_save_png() {
    let dir = std::env::temp_dir().join(format!("p300_gan_plot_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sample.png");

    let style = PlotStyle::default().with_panel_size(64, 48);
    let sample = Array2::from_shape_fn((3, 20), |(c, t)| (t * (c + 1)) as f32);
    save_channels_plot(sample.view(), &style, &path).unwrap();

    let loaded = image::open(&path).unwrap();
    assert_eq!(loaded.dimensions(), (192, 48));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_save_into_missing_directory_fails() {
    let path = std::env::temp_dir()
        .join("p300_gan_missing_dir_for_plot")
        .join("nested")
        .join("sample.png");
    let sample = array![[0.0_f32, 1.0]];
    assert!(save_channels_plot(sample.view(), &PlotStyle::default(), &path).is_err());
}
