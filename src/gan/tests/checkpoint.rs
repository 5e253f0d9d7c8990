/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 检查点输出测试
 */

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use image::GenericImageView;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{small_gan, temp_dir};
use crate::gan::{CheckpointConfig, Checkpointer, Gan, MemorySink, PngSink};
use crate::nn::{AdamConfig, DenseBuilder};
use crate::signal::{SCALE_FACTOR, SignalShape};

#[test]
fn test_image_path_format() {
    let config = CheckpointConfig {
        dir: PathBuf::from("out"),
        ..CheckpointConfig::default()
    };
    assert_eq!(config.image_path(50, 2), PathBuf::from("out").join("P300_50_2.png"));
    assert_eq!(
        CheckpointConfig::default().image_path(0, 0),
        PathBuf::from("training").join("P300_0_0.png")
    );
}

#[test]
fn test_checkpoint_rows_are_up_scaled() {
    let mut rng = StdRng::seed_from_u64(31);
    let gan = Gan::new(
        &DenseBuilder::new(2),
        SignalShape::default(),
        AdamConfig::default(),
        &mut rng,
    )
    .unwrap();

    let mut sink = MemorySink::new();
    Checkpointer::new(3)
        .save(gan.handles(), 7, &mut StdRng::seed_from_u64(32), &mut sink)
        .unwrap();
    let expected = gan.generate(3, &mut StdRng::seed_from_u64(32)).unwrap();

    assert_eq!(sink.samples.len(), 3);
    for (row, (epoch, index, sample)) in sink.samples.iter().enumerate() {
        assert_eq!((*epoch, *index), (7, row));
        assert_eq!(sample.dim(), (3, 1200));
        for (got, raw) in sample.iter().zip(expected.index_axis(ndarray::Axis(0), row)) {
            assert_abs_diff_eq!(*got, raw * SCALE_FACTOR, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_png_sink_writes_one_file_per_row() {
    let dir = temp_dir("png_sink");
    let config = CheckpointConfig {
        dir: dir.clone(),
        prefix: "P300".to_string(),
        panel_width: 60,
        panel_height: 40,
    };
    let gan = small_gan(33);
    let mut sink = PngSink::new(config);
    Checkpointer::new(2)
        .save(gan.handles(), 50, &mut StdRng::seed_from_u64(34), &mut sink)
        .unwrap();

    for row in 0..2 {
        let path = dir.join(format!("P300_50_{row}.png"));
        assert!(path.exists(), "{} 不存在", path.display());
        let image = image::open(&path).unwrap();
        // 每个通道一个子图
        assert_eq!(image.dimensions(), (120, 40));
    }
    assert!(!dir.join("P300_50_2.png").exists());
    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_png_sink_missing_directory_is_an_error() {
    let config = CheckpointConfig {
        dir: std::env::temp_dir().join("p300_gan_no_such_dir").join("nested"),
        ..CheckpointConfig::default()
    };
    let gan = small_gan(35);
    let result = Checkpointer::new(1).save(
        gan.handles(),
        0,
        &mut StdRng::seed_from_u64(36),
        &mut PngSink::new(config),
    );
    assert!(result.is_err());
}
