//! 实验相关错误类型定义

use std::path::PathBuf;
use thiserror::Error;

use crate::data::DataError;
use crate::nn::GraphError;

/// 代价曲线绘制错误
#[derive(Debug, Error)]
pub enum PlotError {
    /// 没有任何数据点
    #[error("没有可绘制的数据点")]
    Empty,

    /// 数据点含 NaN 或无穷
    #[error("第{index}个数据点({x}, {y})不是有限数")]
    NonFinite { index: usize, x: f64, y: f64 },

    /// 画布过小，放不下标题与坐标轴
    #[error("画布尺寸{0}过小")]
    CanvasTooSmall(u32),

    /// 坐标系、刻度或散点绘制失败
    #[error("绘图失败: {0}")]
    Draw(String),

    /// 图像保存失败
    #[error("图像保存失败: {0}")]
    Save(#[from] image::ImageError),
}

/// 实验运行错误：任何一种都会中止整个实验
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("数据加载失败: {0}")]
    Data(#[from] DataError),

    #[error("计算图错误: {0}")]
    Graph(#[from] GraphError),

    #[error("绘图失败（{path}）: {source}")]
    Plot {
        path: PathBuf,
        #[source]
        source: PlotError,
    },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置无效: {0}")]
    InvalidConfig(String),
}
