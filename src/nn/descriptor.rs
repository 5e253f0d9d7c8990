/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 网络描述符（Network Descriptor）
 *                 可读的结构描述，随模型一起保存为JSON，加载时用于核对形状
 */

use serde::{Deserialize, Serialize};

/// 当前描述符格式版本
pub const DESCRIPTOR_VERSION: &str = "1.0";

/// 网络的可序列化描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// 格式版本（用于向后兼容）
    pub version: String,
    pub name: String,
    pub input_shape: Vec<usize>,
    pub output_shape: Vec<usize>,
    pub layers: Vec<LayerDescriptor>,
    /// 参数文件名（相对于 JSON 文件），仅在保存完整模型时使用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params_file: Option<String>,
}

/// 层描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub kind: LayerKindDescriptor,
    pub output_shape: Vec<usize>,
    pub param_count: usize,
}

/// 层类型描述（包含类型特定参数）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerKindDescriptor {
    Dense {
        in_features: usize,
        out_features: usize,
    },
    LeakyRelu {
        alpha: f32,
    },
    Tanh,
    Sigmoid,
    Reshape {
        target: Vec<usize>,
    },
}

impl NetworkDescriptor {
    pub fn total_params(&self) -> usize {
        self.layers.iter().map(|layer| layer.param_count).sum()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
