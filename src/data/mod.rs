//! 数据加载模块
//!
//! 提供两个固定数据集：
//!
//! - [`xor_table`]: XOR 真值表（玩具任务）
//! - [`IrisDataset`]: Fisher 鸢尾花测量数据（自编码重建任务）
//! - [`DataError`]: 数据加载错误类型
//!
//! 两者都按“特征为行、样本为列”的布局给出张量。
//!
//! # 使用示例
//!
//! ```ignore
//! use attention::data::{IrisDataset, xor_table};
//!
//! let (input, target) = xor_table();
//! let data = IrisDataset::load()?.measurements();
//! ```

pub mod datasets;
pub mod error;

#[cfg(test)]
mod tests;

// Re-exports
pub use datasets::{IrisDataset, IrisSample, xor_table};
pub use error::DataError;
