use std::fmt;

use super::raw_node::{NodeType, TraitNode};
use crate::nn::{GraphError, format_node_display};
use crate::tensor::Tensor;

/// 计算图中节点的唯一标识（在所属图内唯一，从1开始递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// 图中节点的句柄：绑定了id、名称以及具体的节点实现
pub(in crate::nn) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
}

impl NodeHandle {
    pub(in crate::nn) fn new<T: Into<NodeType>>(id: NodeId, name: &str, raw_node: T) -> Self {
        Self {
            id,
            name: name.to_string(),
            raw_node: raw_node.into(),
        }
    }

    pub(in crate::nn) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) const fn node_type(&self) -> &NodeType {
        &self.raw_node
    }

    pub(in crate::nn) fn node_type_mut(&mut self) -> &mut NodeType {
        &mut self.raw_node
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        self.raw_node.value_expected_shape()
    }

    pub(in crate::nn) fn value(&self) -> Option<&Tensor> {
        self.raw_node.value()
    }

    pub(in crate::nn) fn set_value(&mut self, value: &Tensor) -> Result<(), GraphError> {
        if value.shape() != self.value_expected_shape() {
            return Err(GraphError::ShapeMismatch {
                expected: self.value_expected_shape().to_vec(),
                got: value.shape().to_vec(),
                message: format!("{self}的值形状与声明不符"),
            });
        }
        self.raw_node.set_value(value)
    }

    /// 是否为叶子节点（输入或参数），叶子节点的值不由父节点计算
    pub(in crate::nn) const fn is_leaf(&self) -> bool {
        matches!(self.raw_node, NodeType::Input(_) | NodeType::Parameter(_))
    }

    pub(in crate::nn) fn calc_value_by_parents(
        &mut self,
        parents: &[&NodeHandle],
    ) -> Result<(), GraphError> {
        self.raw_node.calc_value_by_parents(parents)
    }

    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        self.raw_node
            .calc_grad_to_parent(parent_index, parents, upstream_grad)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_node_display(self.id, &self.name, self.raw_node.type_name())
        )
    }
}
