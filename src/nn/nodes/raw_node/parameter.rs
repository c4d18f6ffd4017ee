use super::{NodeHandle, TraitNode, leaf_has_no_parent};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 参数节点：可训练的权重或偏置。
/// 值和梯度缓冲在声明时即按形状分配并置零，训练期间缓冲本身不会被替换，只会被原地修改
pub(crate) struct Parameter {
    value: Tensor,
    grad: Tensor,
    shape: Vec<usize>,
}

impl Parameter {
    pub(crate) fn new(shape: &[usize]) -> Self {
        Self {
            value: Tensor::zeros(shape),
            grad: Tensor::zeros(shape),
            shape: shape.to_vec(),
        }
    }

    pub(crate) fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub(crate) const fn grad(&self) -> &Tensor {
        &self.grad
    }

    /// 把本次反向传播得到的梯度累加进梯度缓冲
    pub(crate) fn accumulate_grad(&mut self, grad: &Tensor) {
        self.grad += grad;
    }

    pub(crate) fn zero_grad(&mut self) {
        self.grad.fill_zero();
    }
}

impl TraitNode for Parameter {
    fn type_name(&self) -> &'static str {
        "Parameter"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, _parents: &[&NodeHandle]) -> Result<(), GraphError> {
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
