/*
 * @Description  : 四种计算图的构建。张量统一为`[out, in]`布局，样本按列排布：
 *
 *                 注意力/XOR：  la = aw·x + ab，lb = bw·x + bb，f = la ⊙ lb，cost = Σ q(f, t)
 *                 常规/XOR：    l1 = σ(aw·x + ab)，l2 = σ(bw·l1 + bb)，cost = Σ q(l2, t)
 *                 注意力/鸢尾花：la、lb同上，lc = la ⊙ lb，f = cw·lc + cb，cost = mean q(f, x)
 *                 常规/鸢尾花：  l1 = σ(aw·x + ab)，l2 = bw·l1 + bb，cost = mean q(l2, x)
 *
 *                 其中 q 为每个样本的 0.5 * Σ(差)²。只有权重矩阵按初始化方式取值，偏置保持为0
 */

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::xor_table;
use crate::init::{InitMode, fill_parameter};
use crate::nn::{Graph, GraphError, NodeId, ParameterSet};
use crate::tensor::Tensor;

/// 网络结构
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Architecture {
    /// 两个线性分支逐元素相乘
    Attention,
    /// 常规的 sigmoid 前馈网络
    Regular,
}

/// 任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// XOR 真值表拟合，代价按样本求和
    Xor,
    /// 鸢尾花测量值自编码重建，代价按样本取平均
    Iris,
}

/// 一个实验变体：结构 × 任务 × 初始化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    pub architecture: Architecture,
    pub task: Task,
    pub init: InitMode,
}

impl Variant {
    pub const fn new(architecture: Architecture, task: Task, init: InitMode) -> Self {
        Self {
            architecture,
            task,
            init,
        }
    }

    /// 汇总输出用的名称，如`Attention`、`IRIS Regular FFT`
    pub fn label(&self) -> String {
        let task = match self.task {
            Task::Xor => "",
            Task::Iris => "IRIS ",
        };
        let architecture = match self.architecture {
            Architecture::Attention => "Attention",
            Architecture::Regular => "Regular",
        };
        let init = match self.init {
            InitMode::Gaussian => "",
            InitMode::Spectral => " FFT",
        };
        format!("{task}{architecture}{init}")
    }

    /// 代价曲线图的文件名，如`cost_attention.png`、`cost_iris_regular_fft.png`
    pub fn artifact_name(&self) -> String {
        let task = match self.task {
            Task::Xor => "",
            Task::Iris => "iris_",
        };
        let architecture = match self.architecture {
            Architecture::Attention => "attention",
            Architecture::Regular => "regular",
        };
        let init = match self.init {
            InitMode::Gaussian => "",
            InitMode::Spectral => "_fft",
        };
        format!("cost_{task}{architecture}{init}.png")
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 构建好的模型
pub struct Model {
    pub graph: Graph,
    /// 按声明顺序排列的可训练参数
    pub params: ParameterSet,
    /// 标量代价节点
    pub cost: NodeId,
    /// 详细模式下训练结束后打印的输出节点
    pub output: NodeId,
}

impl Model {
    /// 输出节点的值按样本依次展开：先是第1个样本的全部输出，再是第2个，依此类推
    pub fn output_by_sample(&self) -> Result<Vec<f64>, GraphError> {
        Ok(self.graph.value(self.output)?.transpose().to_vec())
    }
}

/// 构建变体对应的计算图，并用`rng`初始化其中的权重矩阵。
/// 鸢尾花任务需要传入形状为`[4, 样本数]`的测量值矩阵
pub fn build_model<R: Rng + ?Sized>(
    variant: Variant,
    rng: &mut R,
    iris: Option<&Tensor>,
) -> Result<Model, GraphError> {
    let mut graph = Graph::with_name(&variant.label());
    let mut params = ParameterSet::new();

    let (cost, output, weights) = match (variant.architecture, variant.task) {
        (Architecture::Attention, Task::Xor) => {
            let (input, target) = xor_table();
            let x = graph.new_input_node(&input, Some("input"))?;
            let t = graph.new_input_node(&target, Some("output"))?;

            let aw = params.declare(&mut graph, "aw", &[1, 2])?;
            let bw = params.declare(&mut graph, "bw", &[1, 2])?;
            let ab = params.declare(&mut graph, "ab", &[1, 1])?;
            let bb = params.declare(&mut graph, "bb", &[1, 1])?;

            let la = linear(&mut graph, aw, x, ab)?;
            let lb = linear(&mut graph, bw, x, bb)?;
            let f = graph.new_multiply_node(la, lb, Some("f"))?;
            let q = graph.new_quadratic_node(f, t, None)?;
            (graph.new_sum_node(q, Some("cost"))?, f, 2)
        }
        (Architecture::Regular, Task::Xor) => {
            let (input, target) = xor_table();
            let x = graph.new_input_node(&input, Some("input"))?;
            let t = graph.new_input_node(&target, Some("output"))?;

            let aw = params.declare(&mut graph, "aw", &[2, 2])?;
            let bw = params.declare(&mut graph, "bw", &[1, 2])?;
            let ab = params.declare(&mut graph, "ab", &[2, 1])?;
            let bb = params.declare(&mut graph, "bb", &[1, 1])?;

            let l1 = linear(&mut graph, aw, x, ab)?;
            let l1 = graph.new_sigmoid_node(l1, Some("l1"))?;
            let l2 = linear(&mut graph, bw, l1, bb)?;
            let l2 = graph.new_sigmoid_node(l2, Some("l2"))?;
            let q = graph.new_quadratic_node(l2, t, None)?;
            (graph.new_sum_node(q, Some("cost"))?, l2, 2)
        }
        (Architecture::Attention, Task::Iris) => {
            let x = graph.new_input_node(iris_data(iris)?, Some("data"))?;

            let aw = params.declare(&mut graph, "aw", &[8, 4])?;
            let bw = params.declare(&mut graph, "bw", &[8, 4])?;
            let cw = params.declare(&mut graph, "cw", &[4, 8])?;
            let ab = params.declare(&mut graph, "ab", &[8, 1])?;
            let bb = params.declare(&mut graph, "bb", &[8, 1])?;
            let cb = params.declare(&mut graph, "cb", &[4, 1])?;

            let la = linear(&mut graph, aw, x, ab)?;
            let lb = linear(&mut graph, bw, x, bb)?;
            let lc = graph.new_multiply_node(la, lb, Some("lc"))?;
            let f = linear(&mut graph, cw, lc, cb)?;
            let q = graph.new_quadratic_node(f, x, None)?;
            (graph.new_mean_node(q, Some("cost"))?, f, 3)
        }
        (Architecture::Regular, Task::Iris) => {
            let x = graph.new_input_node(iris_data(iris)?, Some("data"))?;

            let aw = params.declare(&mut graph, "aw", &[4, 4])?;
            let bw = params.declare(&mut graph, "bw", &[4, 4])?;
            let ab = params.declare(&mut graph, "ab", &[4, 1])?;
            let bb = params.declare(&mut graph, "bb", &[4, 1])?;

            let l1 = linear(&mut graph, aw, x, ab)?;
            let l1 = graph.new_sigmoid_node(l1, Some("l1"))?;
            let l2 = linear(&mut graph, bw, l1, bb)?;
            let q = graph.new_quadratic_node(l2, x, None)?;
            (graph.new_mean_node(q, Some("cost"))?, l2, 2)
        }
    };

    // 先声明的`weights`个参数是权重矩阵，按声明顺序共用同一个随机流
    for id in params.ids().into_iter().take(weights) {
        fill_parameter(&mut graph, id, variant.init, variant.task, rng)?;
    }

    Ok(Model {
        graph,
        params,
        cost,
        output,
    })
}

/// `weight·input + bias`
fn linear(graph: &mut Graph, weight: NodeId, input: NodeId, bias: NodeId) -> Result<NodeId, GraphError> {
    let product = graph.new_mat_mul_node(weight, input, None)?;
    graph.new_add_node(product, bias, None)
}

fn iris_data(iris: Option<&Tensor>) -> Result<&Tensor, GraphError> {
    let data = iris.ok_or_else(|| {
        GraphError::InvalidOperation("鸢尾花任务需要提供测量值矩阵".to_string())
    })?;
    if data.rows() != 4 {
        return Err(GraphError::ShapeMismatch {
            expected: vec![4, data.cols()],
            got: data.shape().to_vec(),
            message: "鸢尾花测量值矩阵必须为4行（每行一个测量项）".to_string(),
        });
    }
    Ok(data)
}
