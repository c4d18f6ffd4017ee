/*
 * @Description  : Graph 基础功能单元测试（节点创建、命名、查询、设值）
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_new_graph() {
    let graph = Graph::new();
    assert_eq!(graph.name(), "default_graph");
    assert_eq!(graph.nodes_count(), 0);

    let graph = Graph::with_name("xor");
    assert_eq!(graph.name(), "xor");
}

#[test]
fn test_node_ids_start_from_one() {
    let mut graph = Graph::new();
    let a = graph.new_parameter_node(&[1, 2], None).unwrap();
    let b = graph.new_parameter_node(&[1, 2], None).unwrap();
    assert_eq!(a, NodeId(1));
    assert_eq!(b, NodeId(2));
    assert_eq!(graph.nodes_count(), 2);
}

#[test]
fn test_node_name_generation() {
    let mut graph = Graph::new();

    // 1. 显式命名
    let w = graph.new_parameter_node(&[1, 2], Some("aw")).unwrap();
    assert_eq!(graph.get_node_name(w).unwrap(), "aw");

    // 2. 自动命名
    let p = graph.new_parameter_node(&[1, 2], None).unwrap();
    assert_eq!(graph.get_node_name(p).unwrap(), "parameter_1");
    let s = graph.new_sigmoid_node(w, None).unwrap();
    assert_eq!(graph.get_node_name(s).unwrap(), "sigmoid_1");

    // 3. 名称重复
    let result = graph.new_parameter_node(&[1, 2], Some("aw"));
    assert_err!(
        result,
        GraphError::DuplicateNodeName("节点aw在图default_graph中重复")
    );
}

#[test]
fn test_parameter_node_is_zeroed() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[2, 3], Some("w")).unwrap();
    assert_eq!(graph.value(w).unwrap(), &Tensor::zeros(&[2, 3]));
    assert_eq!(graph.parameter_grad(w).unwrap(), &Tensor::zeros(&[2, 3]));
}

#[test]
fn test_parameter_node_rejects_bad_shape() {
    let mut graph = Graph::new();
    assert_err!(graph.new_parameter_node(&[2], None), GraphError::ShapeMismatch { .. });
    assert_err!(graph.new_parameter_node(&[0, 3], None), GraphError::ShapeMismatch { .. });
}

#[test]
fn test_node_not_found() {
    let graph = Graph::new();
    assert_err!(graph.value(NodeId(42)), GraphError::NodeNotFound(NodeId(42)));
    assert_err!(graph.get_node_parents(NodeId(7)), GraphError::NodeNotFound(_));
}

#[test]
fn test_set_node_value() {
    let mut graph = Graph::new();
    let x = graph
        .new_input_node(&Tensor::zeros(&[2, 4]), Some("x"))
        .unwrap();
    let data = Tensor::new(&[0., 0., 1., 1., 0., 1., 0., 1.], &[2, 4]);
    graph.set_node_value(x, &data).unwrap();
    assert_eq!(graph.value(x).unwrap(), &data);

    // 形状不符
    let result = graph.set_node_value(x, &Tensor::zeros(&[4, 2]));
    assert_err!(result, GraphError::ShapeMismatch { expected, got, .. } if expected == &[2, 4] && got == &[4, 2]);
}

#[test]
fn test_computed_node_value_cannot_be_set() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[1, 2], Some("w")).unwrap();
    let s = graph.new_sigmoid_node(w, Some("s")).unwrap();
    let result = graph.set_node_value(s, &Tensor::zeros(&[1, 2]));
    assert_err!(result, GraphError::InvalidOperation("Sigmoid节点的值不应该被手动设置"));
}

#[test]
fn test_parameter_buffers_only_for_parameters() {
    let mut graph = Graph::new();
    let x = graph.new_input_node(&Tensor::zeros(&[2, 2]), Some("x")).unwrap();
    assert_err!(graph.parameter_grad(x), GraphError::InvalidOperation(_));
    assert_err!(graph.parameter_value_mut(x), GraphError::InvalidOperation(_));
}

#[test]
fn test_node_parents_keep_declaration_order() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[1, 2], Some("w")).unwrap();
    let x = graph.new_input_node(&Tensor::zeros(&[2, 4]), Some("x")).unwrap();
    let wx = graph.new_mat_mul_node(w, x, None).unwrap();
    assert_eq!(graph.get_node_parents(wx).unwrap(), vec![w, x]);
    assert_eq!(graph.get_node_shape(wx).unwrap(), &[1, 4]);
    assert!(graph.get_node_parents(w).unwrap().is_empty());
}
