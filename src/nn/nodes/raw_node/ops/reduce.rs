use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

/// 归约方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// 所有元素求和
    Sum,
    /// 所有元素求平均
    Mean,
}

/// Reduce节点：把父节点的所有元素归约为形状`[1, 1]`的标量
pub(crate) struct Reduce {
    value: Option<Tensor>,
    shape: Vec<usize>,
    reduction: Reduction,
}

impl Reduce {
    pub(crate) fn new(parents: &[&NodeHandle], reduction: Reduction) -> Result<Self, GraphError> {
        if parents.len() != 1 {
            return Err(GraphError::InvalidOperation(
                "Reduce节点只需要1个父节点".to_string(),
            ));
        }
        Ok(Self {
            value: None,
            shape: vec![1, 1],
            reduction,
        })
    }
}

impl TraitNode for Reduce {
    fn type_name(&self) -> &'static str {
        match self.reduction {
            Reduction::Sum => "Sum",
            Reduction::Mean => "Mean",
        }
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let parent = parent_value(parents, 0, self.type_name())?;
        self.value = Some(match self.reduction {
            Reduction::Sum => parent.sum(),
            Reduction::Mean => parent.mean(),
        });
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
        check_parent_index(parent_index, 1, self.type_name())?;
        let parent = parent_value(parents, 0, self.type_name())?;
        let upstream = upstream_grad
            .number()
            .ok_or_else(|| GraphError::ShapeMismatch {
                expected: vec![1, 1],
                got: upstream_grad.shape().to_vec(),
                message: format!("{}节点的上游梯度必须是标量", self.type_name()),
            })?;

        // 每个元素对和的偏导都是1，对平均值的偏导都是1/n
        let local = match self.reduction {
            Reduction::Sum => upstream,
            Reduction::Mean => upstream / parent.size() as f64,
        };
        Ok(Tensor::ones(parent.shape()) * local)
    }
}
