/*
 * @Description  : Graph 模块：计算图的核心实现
 *
 * 公开 API：
 * - `Graph`: 计算图本身，负责节点构建、前向求值与梯度计算
 * - `GraphError`: 错误类型
 */

mod backward;
mod core;
mod error;
mod node_builders;

use std::collections::HashMap;

use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;

pub use error::GraphError;

/// 计算图：节点以`NodeId`为键存放，`backward_edges`记录每个节点的父节点（按声明顺序）
pub struct Graph {
    name: String,
    nodes: HashMap<NodeId, NodeHandle>,
    backward_edges: HashMap<NodeId, Vec<NodeId>>,
    next_id: u64,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
