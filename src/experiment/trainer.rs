/*
 * @Description  : 带动量与全局梯度范数裁剪的梯度下降训练器。
 *
 *                 每次迭代：
 *                 1. 梯度清零；
 *                 2. 对代价做一次“前向+反向”，得到代价与各参数梯度；
 *                 3. 在NormScope指定的参数范围上求梯度的欧氏范数，范数大于1时缩放系数为1/范数，否则为1；
 *                 4. 对每个参数：v = alpha*v - eta*grad*scale，value += v；
 *                 5. 记录(迭代号, 代价)，代价低于阈值即收敛，否则迭代号加1，直到达到上限。
 *                 返回的迭代次数就是实验的度量指标（越小收敛越快）
 */

use serde::{Deserialize, Serialize};

use super::model::{Model, Task};
use crate::nn::{Graph, GraphError, NodeId, ParameterSet};
use crate::tensor::Tensor;

/// 梯度范数的统计范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormScope {
    /// 所有参数
    #[default]
    All,
    /// 除第一个声明的参数之外的所有参数（裁剪缩放仍作用于全部参数）
    SkipFirst,
}

/// 训练超参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// 动量系数
    pub alpha: f64,
    /// 学习率
    pub eta: f64,
    /// 迭代上限
    pub iterations: usize,
    /// 收敛阈值：代价严格小于该值即停止
    pub threshold: f64,
    pub norm_scope: NormScope,
}

impl TrainerConfig {
    /// 任务预设：XOR 的代价按样本求和，阈值取1e-6；鸢尾花按样本平均，阈值取5
    pub const fn for_task(task: Task) -> Self {
        let threshold = match task {
            Task::Xor => 1e-6,
            Task::Iris => 5.0,
        };
        Self {
            alpha: 0.3,
            eta: 0.3,
            iterations: 1024,
            threshold,
            norm_scope: NormScope::All,
        }
    }

    pub const fn with_norm_scope(mut self, norm_scope: NormScope) -> Self {
        self.norm_scope = norm_scope;
        self
    }
}

/// 训练结束时的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Converged,
    IterationCapReached,
}

/// 单次迭代的记录
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    pub iteration: usize,
    pub cost: f64,
    /// 裁剪前的梯度范数
    pub grad_norm: f64,
    /// 实际使用的裁剪缩放系数
    pub scale: f64,
}

pub type TrainingTrace = Vec<TraceStep>;

/// 一次训练的结果
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    /// 收敛时的迭代号，或迭代上限
    pub iterations: usize,
    pub status: RunStatus,
    /// 最后一次迭代算得的代价
    pub final_cost: f64,
    /// 仅在要求记录时非空
    pub trace: TrainingTrace,
}

impl TrainOutcome {
    /// 代价曲线上的点`(迭代号, 代价)`
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.trace
            .iter()
            .map(|step| (step.iteration as f64, step.cost))
            .collect()
    }
}

/// 动量（速度）缓冲，与参数集合按声明顺序一一对应，初始为0
pub struct MomentumState {
    velocities: Vec<Tensor>,
}

impl MomentumState {
    pub fn new(graph: &Graph, params: &ParameterSet) -> Result<Self, GraphError> {
        let velocities = params
            .ids()
            .into_iter()
            .map(|id| graph.get_node_shape(id).map(Tensor::zeros))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { velocities })
    }

    pub fn velocities(&self) -> &[Tensor] {
        &self.velocities
    }

    /// 对每个参数执行`v = alpha*v - eta*grad*scale; value += v`
    pub fn step(
        &mut self,
        graph: &mut Graph,
        params: &ParameterSet,
        alpha: f64,
        eta: f64,
        scale: f64,
    ) -> Result<(), GraphError> {
        if params.len() != self.velocities.len() {
            return Err(GraphError::InvalidOperation(format!(
                "动量缓冲数{}与参数数{}不一致",
                self.velocities.len(),
                params.len()
            )));
        }

        for (velocity, id) in self.velocities.iter_mut().zip(params.ids()) {
            let grad = graph.parameter_grad(id)?;
            let update = &(&*velocity * alpha) - &(grad * (eta * scale));
            velocity.fill_from(&update);
            *graph.parameter_value_mut(id)? += &*velocity;
        }
        Ok(())
    }
}

pub struct Trainer;

impl Trainer {
    /// 训练模型直到收敛或达到迭代上限。`record_trace`为真时记录每次迭代
    pub fn train(
        model: &mut Model,
        config: &TrainerConfig,
        record_trace: bool,
    ) -> Result<TrainOutcome, GraphError> {
        if config.iterations == 0 {
            return Err(GraphError::InvalidOperation(
                "迭代上限必须大于0".to_string(),
            ));
        }

        let norm_ids = norm_scope_ids(&model.params, config.norm_scope);
        let mut momentum = MomentumState::new(&model.graph, &model.params)?;
        let mut trace = TrainingTrace::new();
        let mut final_cost = f64::NAN;
        let mut status = RunStatus::IterationCapReached;

        let mut i = 0;
        while i < config.iterations {
            model.graph.zero_grad();
            let total = model.graph.gradient(model.cost)?;
            final_cost = total;

            let grad_norm = gradient_norm(&model.graph, &norm_ids)?;
            let scale = if grad_norm > 1.0 { 1.0 / grad_norm } else { 1.0 };
            momentum.step(
                &mut model.graph,
                &model.params,
                config.alpha,
                config.eta,
                scale,
            )?;

            log::trace!("迭代{i}：代价={total}，梯度范数={grad_norm}，缩放={scale}");
            if record_trace {
                trace.push(TraceStep {
                    iteration: i,
                    cost: total,
                    grad_norm,
                    scale,
                });
            }

            if total < config.threshold {
                status = RunStatus::Converged;
                break;
            }
            i += 1;
        }

        log::debug!("训练结束：{status:?}，迭代{i}次，最终代价{final_cost}");
        Ok(TrainOutcome {
            iterations: i,
            status,
            final_cost,
            trace,
        })
    }
}

fn norm_scope_ids(params: &ParameterSet, norm_scope: NormScope) -> Vec<NodeId> {
    let skip = match norm_scope {
        NormScope::All => 0,
        NormScope::SkipFirst => 1,
    };
    params.ids().into_iter().skip(skip).collect()
}

/// 给定参数梯度拼接后的欧氏范数
fn gradient_norm(graph: &Graph, ids: &[NodeId]) -> Result<f64, GraphError> {
    let mut sum = 0.0;
    for &id in ids {
        sum += graph.parameter_grad(id)?.norm_squared();
    }
    Ok(sum.sqrt())
}
