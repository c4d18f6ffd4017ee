mod input;
mod loss;
mod ops;
mod parameter;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use loss::*;
pub(in crate::nn) use ops::*;
pub use ops::Reduction;
pub(in crate::nn) use parameter::Parameter;

use enum_dispatch::enum_dispatch;

use super::NodeHandle;
use crate::nn::GraphError;
use crate::tensor::Tensor;

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    Input(Input),
    Parameter(Parameter),
    Add(Add),
    MatMul(MatMul),
    Multiply(Multiply),
    Sigmoid(Sigmoid),
    Quadratic(Quadratic),
    Reduce(Reduce),
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    fn type_name(&self) -> &'static str;

    fn value_expected_shape(&self) -> &[usize];

    // 根据父节点的值计算本节点的值（只在Graph中调用，调用前所有父节点的值均已算好）
    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError>;

    fn value(&self) -> Option<&Tensor>;

    fn set_value(&mut self, _value: &Tensor) -> Result<(), GraphError> {
        Err(GraphError::InvalidOperation(format!(
            "{}节点的值不应该被手动设置",
            self.type_name()
        )))
    }

    /// 给定本节点的上游梯度（形状同本节点的值），计算对第`parent_index`个父节点的梯度
    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;
}

/// 取第`index`个父节点的值
pub(super) fn parent_value<'a>(
    parents: &[&'a NodeHandle],
    index: usize,
    type_name: &str,
) -> Result<&'a Tensor, GraphError> {
    let parent: &'a NodeHandle = parents.get(index).copied().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{type_name}节点缺少第{index}个父节点。不该触及本错误，否则说明crate代码有问题"
        ))
    })?;
    parent.value().ok_or_else(|| {
        GraphError::ComputationError(format!(
            "{type_name}节点的父节点{parent}没有值。不该触及本错误，否则说明crate代码有问题"
        ))
    })
}

/// 叶子节点（输入、参数）没有父节点，反向传播不应向其索要父梯度
pub(super) fn leaf_has_no_parent(type_name: &str) -> GraphError {
    GraphError::InvalidOperation(format!("{type_name}节点没有父节点"))
}

// ↓↓↓ 反向传播时对父节点下标的检查
pub(super) fn check_parent_index(
    parent_index: usize,
    parent_count: usize,
    type_name: &str,
) -> Result<(), GraphError> {
    if parent_index >= parent_count {
        return Err(GraphError::InvalidOperation(format!(
            "{type_name}节点只有{parent_count}个父节点，无法对第{parent_index}个求梯度"
        )));
    }
    Ok(())
}
