/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 网络的保存/加载（结构描述 JSON + bincode 快照）
 *
 * `save_network("models/p300_gen")` 生成两个文件：
 * - `models/p300_gen.json`: 网络结构描述（可读）
 * - `models/p300_gen.bin`:  结构 + 权重的完整快照
 */

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::{GanError, Result};
use crate::nn::{Network, NetworkDescriptor, Sequential};

/// 能整体保存、恢复（结构 + 权重）的网络
pub trait PersistentNetwork: Network + Serialize + DeserializeOwned {
    fn describe(&self) -> NetworkDescriptor;
}

impl PersistentNetwork for Sequential {
    fn describe(&self) -> NetworkDescriptor {
        Sequential::describe(self)
    }
}

fn serialization_error(path: &Path, message: impl ToString) -> GanError {
    GanError::Serialization {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

// 后缀直接追加在`name`之后，`name`中已有的`.`保持原样
fn model_paths(name: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{name}.json")),
        PathBuf::from(format!("{name}.bin")),
    )
}

pub fn save_network<N: PersistentNetwork>(network: &N, name: &str) -> Result<()> {
    let (json_path, bin_path) = model_paths(name);

    // 1. 快照
    let writer = BufWriter::new(File::create(&bin_path)?);
    bincode::serialize_into(writer, network).map_err(|e| serialization_error(&bin_path, e))?;

    // 2. 描述符
    let mut descriptor = network.describe();
    descriptor.params_file = bin_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string());
    let json = descriptor
        .to_json()
        .map_err(|e| serialization_error(&json_path, e))?;
    std::fs::write(&json_path, json)?;

    info!(name, params = descriptor.total_params(), "模型已保存");
    Ok(())
}

/// 加载快照，并核对它与描述符记录的输入/输出形状一致
pub fn load_network<N: PersistentNetwork>(name: &str) -> Result<N> {
    let (json_path, default_bin_path) = model_paths(name);

    let json = std::fs::read_to_string(&json_path)?;
    let descriptor =
        NetworkDescriptor::from_json(&json).map_err(|e| serialization_error(&json_path, e))?;

    let bin_path = match (&descriptor.params_file, json_path.parent()) {
        (Some(file), Some(dir)) => dir.join(file),
        _ => default_bin_path,
    };
    let reader = BufReader::new(File::open(&bin_path)?);
    let network: N =
        bincode::deserialize_from(reader).map_err(|e| serialization_error(&bin_path, e))?;

    for (context, expected, got) in [
        ("模型快照的输入", descriptor.input_shape.clone(), network.input_shape()),
        ("模型快照的输出", descriptor.output_shape.clone(), network.output_shape()),
    ] {
        if expected != got {
            return Err(GanError::ShapeMismatch {
                context: context.to_string(),
                expected,
                got,
            });
        }
    }

    info!(name, params = descriptor.total_params(), "模型已加载");
    Ok(network)
}
