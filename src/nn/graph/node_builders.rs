/*
 * @Description  : Graph 节点构建方法（new_*_node），形状兼容性在构建时校验
 */

use super::{Graph, GraphError};
use crate::nn::NodeId;
use crate::nn::nodes::NodeHandle;
use crate::nn::nodes::raw_node::{
    Add, Input, MatMul, Multiply, NodeType, Parameter, Quadratic, Reduce, Reduction, Sigmoid,
};
use crate::tensor::Tensor;

impl Graph {
    /// 添加节点到列表
    fn add_node_to_list<T: Into<NodeType>>(
        &mut self,
        raw_node: T,
        name: Option<&str>,
        node_type: &str,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_name = self.generate_valid_new_node_name(name.unwrap_or(""), node_type)?;
        let node_id = self.generate_valid_node_id();
        self.backward_edges.insert(node_id, parents.to_vec());
        self.nodes
            .insert(node_id, NodeHandle::new(node_id, &node_name, raw_node));
        Ok(node_id)
    }

    /// 创建输入节点，初值为`data`
    pub fn new_input_node(&mut self, data: &Tensor, name: Option<&str>) -> Result<NodeId, GraphError> {
        if data.shape().contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "输入节点的形状{:?}不能含0",
                data.shape()
            )));
        }
        self.add_node_to_list(Input::new(data), name, "input", &[])
    }

    /// 创建参数节点，值与梯度缓冲均按形状分配并置零
    pub fn new_parameter_node(&mut self, shape: &[usize], name: Option<&str>) -> Result<NodeId, GraphError> {
        if shape.len() != 2 || shape.contains(&0) {
            return Err(GraphError::ShapeMismatch {
                expected: vec![2],
                got: shape.to_vec(),
                message: "参数张量必须是形状不含0的2维张量".to_string(),
            });
        }
        self.add_node_to_list(Parameter::new(shape), name, "parameter", &[])
    }

    pub fn new_add_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Add::new(&self.get_nodes(&[left, right])?)?;
        self.add_node_to_list(node, name, "add", &[left, right])
    }

    pub fn new_mat_mul_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = MatMul::new(&self.get_nodes(&[left, right])?)?;
        self.add_node_to_list(node, name, "mat_mul", &[left, right])
    }

    pub fn new_multiply_node(
        &mut self,
        left: NodeId,
        right: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Multiply::new(&self.get_nodes(&[left, right])?)?;
        self.add_node_to_list(node, name, "multiply", &[left, right])
    }

    pub fn new_sigmoid_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let node = Sigmoid::new(&self.get_nodes(&[parent])?)?;
        self.add_node_to_list(node, name, "sigmoid", &[parent])
    }

    /// 创建平方误差节点，`output`与`target`形状须一致，结果为每个样本（每列）一个值
    pub fn new_quadratic_node(
        &mut self,
        output: NodeId,
        target: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Quadratic::new(&self.get_nodes(&[output, target])?)?;
        self.add_node_to_list(node, name, "quadratic", &[output, target])
    }

    pub fn new_reduce_node(
        &mut self,
        parent: NodeId,
        reduction: Reduction,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let node = Reduce::new(&self.get_nodes(&[parent])?, reduction)?;
        let node_type = match reduction {
            Reduction::Sum => "sum",
            Reduction::Mean => "mean",
        };
        self.add_node_to_list(node, name, node_type, &[parent])
    }

    pub fn new_sum_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_reduce_node(parent, Reduction::Sum, name)
    }

    pub fn new_mean_node(&mut self, parent: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_reduce_node(parent, Reduction::Mean, name)
    }
}
