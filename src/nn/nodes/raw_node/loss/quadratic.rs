/*
 * @Description  : 平方误差节点。样本按列排布，每列（每个样本）输出 0.5 * Σ(output - target)²，
 *                 结果形状为`[1, 样本数]`，再交由Reduce节点按求和或平均汇总成代价
 */

use crate::nn::GraphError;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{TraitNode, check_parent_index, parent_value};
use crate::tensor::Tensor;

pub(crate) struct Quadratic {
    value: Option<Tensor>,
    shape: Vec<usize>,
}

impl Quadratic {
    /// `parents[0]`为模型输出，`parents[1]`为目标值，二者形状须一致
    pub(crate) fn new(parents: &[&NodeHandle]) -> Result<Self, GraphError> {
        // 1. 必要的验证
        if parents.len() != 2 {
            return Err(GraphError::InvalidOperation(
                "Quadratic节点需要正好2个父节点：输出和目标".to_string(),
            ));
        }
        let output_shape = parents[0].value_expected_shape();
        let target_shape = parents[1].value_expected_shape();
        if output_shape != target_shape {
            return Err(GraphError::ShapeMismatch {
                expected: output_shape.to_vec(),
                got: target_shape.to_vec(),
                message: "Quadratic节点的输出与目标形状必须相同".to_string(),
            });
        }

        // 2. 返回
        Ok(Self {
            value: None,
            shape: vec![1, output_shape[1]],
        })
    }
}

impl TraitNode for Quadratic {
    fn type_name(&self) -> &'static str {
        "Quadratic"
    }

    fn value_expected_shape(&self) -> &[usize] {
        &self.shape
    }

    fn calc_value_by_parents(&mut self, parents: &[&NodeHandle]) -> Result<(), GraphError> {
        let output = parent_value(parents, 0, self.type_name())?;
        let target = parent_value(parents, 1, self.type_name())?;
        let diff = output - target;
        let squared = &diff * &diff;
        // 用全1行向量左乘即可逐列求和
        let per_sample = Tensor::ones(&[1, squared.rows()]).mat_mul(&squared) * 0.5;
        self.value = Some(per_sample);
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
        let output = parent_value(parents, 0, self.type_name())?;
        let target = parent_value(parents, 1, self.type_name())?;

        // 上游梯度形状为[1, n]，先沿行复制成[rows, n]
        let spread = Tensor::ones(&[output.rows(), 1]).mat_mul(upstream_grad);
        let diff = output - target;
        let grad = &spread * &diff;
        if parent_index == 0 {
            Ok(grad)
        } else {
            Ok(grad * -1.0)
        }
    }
}
