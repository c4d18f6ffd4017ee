/*
 * @Description  : 逐元素乘法节点（Hadamard积），注意力的门控就靠它
 */

use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

/// Multiply节点：逐元素乘法（Hadamard积）
/// 两个父节点必须形状相同，输出形状与输入相同
pub(crate) struct Multiply {
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Multiply {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 验证父节点数量
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "Multiply节点需要正好2个父节点".to_string(),
            ));
        }

        // 2. 验证两个父节点形状相同
        let shape = parents[0].value_expected_shape().to_vec();
        if parents[1].value_expected_shape() != shape {
            return Err(GraphError::ShapeMismatch {
                expected: shape,
                got: parents[1].value_expected_shape().to_vec(),
                message: "Multiply节点的两个父节点形状必须相同".to_string(),
            });
        }

        // 3. 返回
        Ok(Self { value: None, shape })
    }
}

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "Multiply"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let left = parent_value(parents, 0, self.type_name())?;
        let right = parent_value(parents, 1, self.type_name())?;
        self.value = Some(left * right);
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
        // d(a*b)/da = b, d(a*b)/db = a
        let other = parent_value(parents, 1 - parent_index, self.type_name())?;
        Ok(upstream_grad * other)
    }
}
