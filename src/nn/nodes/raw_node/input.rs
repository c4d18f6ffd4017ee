use super::{NodeHandle, TraitNode, leaf_has_no_parent};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 输入节点：保存外部喂入的数据（如XOR真值表、鸢尾花测量值），不参与训练
pub(crate) struct Input {
    value: Tensor,
    shape: Vec<usize>,
}

impl Input {
    pub(crate) fn new(data: &Tensor) -> Self {
        Self {
            value: data.clone(),
            shape: data.shape().to_vec(),
        }
    }
}

impl TraitNode for Input {
    fn type_name(&self) -> &'static str {
        "Input"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, _parents: &[&NodeHandle]) -> Result<(), GraphError> {
        // 输入节点的值只能由外部设置，前向传播时直接跳过
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        Some(&self.value)
    }

    fn set_value(&mut self, value: &Tensor) -> Result<(), GraphError> {
        self.value.fill_from(value);
        Ok(())
    }

    fn calc_grad_to_parent(
        &self,
        _parent_index: usize,
        _parents: &[&NodeHandle],
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(leaf_has_no_parent(self.type_name()))
    }
}
