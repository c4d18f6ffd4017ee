/*
 * @Description  : Graph 核心操作 + 前向传播
 */

use std::collections::{HashMap, HashSet};

use super::{Graph, GraphError};
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::NodeType;
use crate::tensor::Tensor;

impl Graph {
    // ========== 创建 ==========

    pub fn new() -> Self {
        Self::with_name("default_graph")
    }

    pub fn with_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            nodes: HashMap::new(),
            backward_edges: HashMap::new(),
            next_id: 0,
        }
    }

    // ========== 基础访问器 ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::nn) fn get_node(&self, id: NodeId) -> Result<&NodeHandle, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_node_mut(&mut self, id: NodeId) -> Result<&mut NodeHandle, GraphError> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub(in crate::nn) fn get_nodes(&self, ids: &[NodeId]) -> Result<Vec<&NodeHandle>, GraphError> {
        ids.iter().map(|&id| self.get_node(id)).collect()
    }

    pub fn get_node_parents(&self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        // 先检查节点是否存在
        let _ = self.get_node(id)?;
        Ok(self.backward_edges.get(&id).cloned().unwrap_or_default())
    }

    pub fn get_node_name(&self, id: NodeId) -> Result<&str, GraphError> {
        Ok(self.get_node(id)?.name())
    }

    pub fn get_node_shape(&self, id: NodeId) -> Result<&[usize], GraphError> {
        Ok(self.get_node(id)?.value_expected_shape())
    }

    /// 节点的当前值。非叶子节点须先经`forward`或`gradient`计算过
    pub fn value(&self, id: NodeId) -> Result<&Tensor, GraphError> {
        let node = self.get_node(id)?;
        node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("{node}没有值，请先执行 forward"))
        })
    }

    /// 设置输入或参数节点的值（形状须与声明一致）
    pub fn set_node_value(&mut self, id: NodeId, value: &Tensor) -> Result<(), GraphError> {
        self.get_node_mut(id)?.set_value(value)
    }

    // ========== 参数缓冲 ==========

    /// 参数节点值缓冲的可变引用，供初始化与优化器原地更新
    pub fn parameter_value_mut(&mut self, id: NodeId) -> Result<&mut Tensor, GraphError> {
        let node = self.get_node_mut(id)?;
        let display = node.to_string();
        match node.node_type_mut() {
            NodeType::Parameter(parameter) => Ok(parameter.value_mut()),
            _ => Err(GraphError::InvalidOperation(format!("{display}不是参数节点"))),
        }
    }

    /// 参数节点梯度缓冲（自上次`zero_grad`以来累加的结果）
    pub fn parameter_grad(&self, id: NodeId) -> Result<&Tensor, GraphError> {
        let node = self.get_node(id)?;
        match node.node_type() {
            NodeType::Parameter(parameter) => Ok(parameter.grad()),
            _ => Err(GraphError::InvalidOperation(format!("{node}不是参数节点"))),
        }
    }

    // ========== 命名与id ==========

    pub(in crate::nn::graph) fn generate_valid_node_id(&mut self) -> NodeId {
        // 先递增再返回，所以第一个节点 ID 是 1
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub(in crate::nn::graph) fn check_duplicate_node_name(&self, name: &str) -> Result<(), GraphError> {
        if self.nodes.values().any(|node| node.name() == name) {
            return Err(GraphError::DuplicateNodeName(format!(
                "节点{}在图{}中重复",
                name,
                self.name()
            )));
        }
        Ok(())
    }

    pub(in crate::nn::graph) fn generate_valid_new_node_name(
        &self,
        base_name: &str,
        node_type: &str,
    ) -> Result<String, GraphError> {
        if !base_name.is_empty() {
            self.check_duplicate_node_name(base_name)?;
            return Ok(base_name.to_string());
        }

        let mut counter = 1;
        loop {
            let name = format!("{node_type}_{counter}");
            if self.check_duplicate_node_name(&name).is_ok() {
                return Ok(name);
            }
            counter += 1;
        }
    }

    // ========== 前向传播 ==========

    /// 计算目标节点及其所有祖先节点的值
    pub fn forward(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let topo_order = self.topological_order(node_id)?;
        self.forward_in_order(&topo_order)
    }

    pub(in crate::nn::graph) fn forward_in_order(&mut self, topo_order: &[NodeId]) -> Result<(), GraphError> {
        for &id in topo_order {
            if !self.get_node(id)?.is_leaf() {
                self.calc_node_value(id)?;
            }
        }
        Ok(())
    }

    fn calc_node_value(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        // 暂时把节点从表中取出，以便同时借用它的父节点
        let mut node = self
            .nodes
            .remove(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let result = self
            .get_nodes(&parent_ids)
            .and_then(|parents| node.calc_value_by_parents(&parents));
        self.nodes.insert(node_id, node);
        result
    }

    /// 以`target`为终点的拓扑序（父节点总在子节点之前），只包含`target`的祖先及其自身
    pub(in crate::nn::graph) fn topological_order(&self, target: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let _ = self.get_node(target)?;

        let mut order = Vec::new();
        let mut visited = HashSet::new();
        // (节点, 父节点是否已展开)
        let mut stack = vec![(target, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            if let Some(parents) = self.backward_edges.get(&id) {
                for &parent_id in parents.iter().rev() {
                    if !visited.contains(&parent_id) {
                        stack.push((parent_id, false));
                    }
                }
            }
        }
        Ok(order)
    }
}
