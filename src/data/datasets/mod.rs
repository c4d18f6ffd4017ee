//! 内置数据集
//!
//! - XOR：2输入1输出的逻辑异或真值表
//! - Iris：Fisher 鸢尾花数据集（150个样本，4个测量值）

mod iris;
mod xor;

pub use iris::{IrisDataset, IrisSample};
pub use xor::xor_table;
