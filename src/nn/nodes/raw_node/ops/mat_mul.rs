use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

/// MatMul节点：`[m, k] x [k, n] -> [m, n]`
pub(crate) struct MatMul {
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl MatMul {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        // 1.1 父节点数量验证
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "MatMul节点需要正好2个父节点".to_string(),
            ));
        }

        // 1.2 验证前一个张量的列数等于后一个张量的行数
        let left = parents[0].value_expected_shape();
        let right = parents[1].value_expected_shape();
        if left[1] != right[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left[1], right[1]],
                got: right.to_vec(),
                message: format!(
                    "MatMul节点的2个父节点形状不兼容：左父节点的列数{}与右父节点的行数{}不相等",
                    left[1], right[0]
                ),
            });
        }

        // 2. 返回
        Ok(Self {
            value: None,
            shape: vec![left[0], right[1]],
        })
    }
}

impl TraitNode for MatMul {
    fn type_name(&self) -> &'static str {
        "MatMul"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let left = parent_value(parents, 0, self.type_name())?;
        let right = parent_value(parents, 1, self.type_name())?;
        self.value = Some(left.mat_mul(right));
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
        // C = A @ B
        // dL/dA = dL/dC @ B^T
        // dL/dB = A^T @ dL/dC
        if parent_index == 0 {
            let right = parent_value(parents, 1, self.type_name())?;
            Ok(upstream_grad.mat_mul(&right.transpose()))
        } else {
            let left = parent_value(parents, 0, self.type_name())?;
            Ok(left.transpose().mat_mul(upstream_grad))
        }
    }
}
