//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件未找到
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    /// 格式错误（列数不对、数值无法解析等）
    #[error("格式错误: {0}")]
    FormatError(String),

    /// 数据集中没有任何样本
    #[error("数据集为空")]
    Empty,
}
