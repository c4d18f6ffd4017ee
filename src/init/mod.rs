/*
 * @Description  : 权重初始化。两种方式：
 *                 1. 高斯：逐元素独立采样标准正态分布；
 *                 2. 频谱：对零直流分量的复高斯白噪声做一次正向FFT，取实部。
 *                 两者都再乘以依赖扇入（fan-in）的缩放系数
 */

mod spectral;

pub use spectral::spectral_weights;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::experiment::Task;
use crate::nn::{Graph, GraphError, NodeId};

/// 权重初始化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InitMode {
    Gaussian,
    Spectral,
}

/// 按`mode`填充参数节点的值缓冲（按行优先的声明顺序逐个写入）。
///
/// 扇入取权重矩阵的列数（`[out, in]`布局中的输入维度），基础系数为`sqrt(2 / fan_in)`；
/// 鸢尾花任务的频谱初始化再额外乘以`sqrt(1 / n)`，`n`为元素个数
pub fn fill_parameter<R: Rng + ?Sized>(
    graph: &mut Graph,
    id: NodeId,
    mode: InitMode,
    task: Task,
    rng: &mut R,
) -> Result<(), GraphError> {
    let value = graph.parameter_value_mut(id)?;
    let n = value.size();
    let factor = (2.0 / value.cols() as f64).sqrt();

    match mode {
        InitMode::Gaussian => {
            for x in value.as_slice_mut() {
                let sample: f64 = rng.sample(StandardNormal);
                *x = sample * factor;
            }
        }
        InitMode::Spectral => {
            let scale = match task {
                Task::Xor => factor,
                Task::Iris => (1.0 / n as f64).sqrt() * factor,
            };
            let weights = spectral_weights(rng, n);
            for (x, weight) in value.as_slice_mut().iter_mut().zip(weights) {
                *x = weight * scale;
            }
        }
    }

    log::trace!("参数{id:?}以{mode:?}方式初始化，共{n}个元素");
    Ok(())
}
