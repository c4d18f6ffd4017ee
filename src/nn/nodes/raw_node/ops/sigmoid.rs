use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

/// Sigmoid 激活函数节点
///
/// forward: sigmoid(x) = 1 / (1 + e^(-x))
/// backward: d(sigmoid)/dx = sigmoid(x) * (1 - sigmoid(x))
pub(crate) struct Sigmoid {
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Sigmoid {
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 父节点数量验证
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "Sigmoid节点只需要1个父节点".to_string(),
            ));
        }

        // 2. 返回
        Ok(Self {
            value: None,
            shape: parents[0].value_expected_shape().to_vec(),
        })
    }
}

impl TraitNode for Sigmoid {
    fn type_name(&self) -> &'static str {
        "Sigmoid"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let parent = parent_value(parents, 0, self.type_name())?;
        self.value = Some(parent.sigmoid());
        Ok(())
    }

    fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    fn calc_grad_to_parent(
        &self,
        parent_index: usize,
        _parents: &[&NodeHandle],
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        check_parent_index(parent_index, 1, self.type_name())?;
        let value = self.value().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "{}节点没有值，无法计算梯度",
                self.type_name()
            ))
        })?;

        // 计算 sigmoid(x) * (1 - sigmoid(x))（逐元素），再乘以上游梯度
        let one_minus_sigmoid = &Tensor::ones(value.shape()) - value;
        let local_grad = value * &one_minus_sigmoid;
        Ok(upstream_grad * &local_grad)
    }
}
