//! # Attention
//!
//! 对比两种小型网络在两种权重初始化下的收敛速度：
//! 注意力式门控网络（两个线性分支逐元素相乘）与常规 sigmoid 前馈网络，
//! 初始化分为高斯采样与基于 FFT 的频谱采样，任务为 XOR 与鸢尾花测量值重建。
//!
//! 训练使用带动量、按全局梯度范数裁剪的梯度下降，每个变体用一批种子重复运行，
//! 以达到收敛阈值所需的迭代次数作为度量。
//!

pub mod data;
pub mod errors;
pub mod experiment;
pub mod init;
pub mod nn;
pub mod tensor;
pub mod utils;
