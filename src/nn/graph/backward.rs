/*
 * @Description  : Graph 反向传播：前向求值后按逆拓扑序传播梯度，累加到参数节点的梯度缓冲
 */

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::{Graph, GraphError};
use crate::nn::NodeId;
use crate::nn::nodes::raw_node::NodeType;
use crate::tensor::Tensor;

impl Graph {
    /// 对标量损失做一次“前向+反向”，返回损失值。
    ///
    /// 每个可达参数节点的梯度会被**累加**到其梯度缓冲（需要时请先`zero_grad`），
    /// 中间节点的梯度每次调用都重新计算，输入节点不接收梯度
    pub fn gradient(&mut self, loss: NodeId) -> Result<f64, GraphError> {
        let topo_order = self.topological_order(loss)?;
        self.forward_in_order(&topo_order)?;

        let loss_value = self.value(loss)?;
        let loss_scalar = loss_value.number().ok_or_else(|| {
            GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量 [1, 1]，但得到 {:?}",
                loss_value.shape()
            ))
        })?;

        let mut grads: HashMap<NodeId, Tensor> = HashMap::new();
        grads.insert(loss, Tensor::ones(&[1, 1]));

        for &node_id in topo_order.iter().rev() {
            let Some(upstream_grad) = grads.remove(&node_id) else {
                continue;
            };

            if let NodeType::Parameter(parameter) = self.get_node_mut(node_id)?.node_type_mut() {
                parameter.accumulate_grad(&upstream_grad);
                continue;
            }
            self.propagate_grad_to_parents(node_id, &upstream_grad, &mut grads)?;
        }

        Ok(loss_scalar)
    }

    /// 将梯度从当前节点传播到其父节点（输入节点跳过）
    fn propagate_grad_to_parents(
        &self,
        node_id: NodeId,
        upstream_grad: &Tensor,
        grads: &mut HashMap<NodeId, Tensor>,
    ) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        if parent_ids.is_empty() {
            return Ok(());
        }

        let node = self.get_node(node_id)?;
        let parents = self.get_nodes(&parent_ids)?;
        for (index, (&parent_id, parent)) in parent_ids.iter().zip(&parents).enumerate() {
            if let NodeType::Input(_) = parent.node_type() {
                continue;
            }

            let parent_grad = node.calc_grad_to_parent(index, &parents, upstream_grad)?;
            if parent_grad.shape() != parent.value_expected_shape() {
                return Err(GraphError::ShapeMismatch {
                    expected: parent.value_expected_shape().to_vec(),
                    got: parent_grad.shape().to_vec(),
                    message: format!("{node}传给{parent}的梯度形状有误"),
                });
            }

            match grads.entry(parent_id) {
                Entry::Occupied(mut entry) => *entry.get_mut() += &parent_grad,
                Entry::Vacant(entry) => {
                    entry.insert(parent_grad);
                }
            }
        }
        Ok(())
    }

    /// 将所有参数节点的梯度缓冲精确置零
    pub fn zero_grad(&mut self) {
        for node in self.nodes.values_mut() {
            if let NodeType::Parameter(parameter) = node.node_type_mut() {
                parameter.zero_grad();
            }
        }
    }
}
