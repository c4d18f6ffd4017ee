/*
 * @Description  : 收敛速度对比实验：
 *                 注意力/常规两种网络 × XOR/鸢尾花两个任务 × 高斯/频谱两种初始化，
 *                 每个变体先用固定种子详细跑一次（逐步打印并画代价曲线），
 *                 再用一批种子静默重复，汇总迭代次数的均值与标准差
 */

mod error;
mod harness;
mod model;
mod plot;
mod stats;
mod trainer;

pub use error::{ExperimentError, PlotError};
pub use harness::{ExperimentConfig, ExperimentHarness, VariantSummary};
pub use model::{Architecture, Model, Task, Variant, build_model};
pub use plot::save_cost_plot;
pub use stats::Statistics;
pub use trainer::{
    MomentumState, NormScope, RunStatus, TraceStep, TrainOutcome, Trainer, TrainerConfig,
    TrainingTrace,
};

#[cfg(test)]
mod tests;
