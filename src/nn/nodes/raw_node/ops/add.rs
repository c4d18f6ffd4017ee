use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

/// Add节点：左右两个父节点相加。
/// 右父节点可以与左父节点同形，也可以是同行数的列向量`[rows, 1]`或标量`[1, 1]`，
/// 此时右父节点沿列广播（偏置加到每个样本上）
pub(crate) struct Add {
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Add {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        // 1.1 父节点数量验证
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "Add节点需要正好2个父节点".to_string(),
            ));
        }

        // 1.2 形状验证
        let left = parents[0].value_expected_shape();
        let right = parents[1].value_expected_shape();
        let broadcastable = left == right
            || (right[1] == 1 && right[0] == left[0])
            || (right[0] == 1 && right[1] == 1);
        if !broadcastable {
            return Err(GraphError::ShapeMismatch {
                expected: left.to_vec(),
                got: right.to_vec(),
                message: "Add节点的右父节点必须与左父节点同形，或为同行数的列向量，或为标量"
                    .to_string(),
            });
        }

        // 2. 返回
        Ok(Self {
            value: None,
            shape: left.to_vec(),
        })
    }
}

impl TraitNode for Add {
    fn type_name(&self) -> &'static str {
        "Add"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let left = parent_value(parents, 0, self.type_name())?;
        let right = parent_value(parents, 1, self.type_name())?;
        self.value = Some(left + right);
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        check_parent_index(parent_index, 2, self.type_name())?;
        let parent = parent_value(parents, parent_index, self.type_name())?;

        // 被广播的父节点需把梯度沿广播方向求和，折回自身形状
        if parent.is_same_shape(upstream_grad) {
            Ok(upstream_grad.clone())
        } else if parent.is_scalar() {
            Ok(upstream_grad.sum())
        } else {
            Ok(upstream_grad.sum_cols())
        }
    }
}
