/*
 * @Description  : Add 节点单元测试（含偏置的列广播）
 */

use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::nn::{Graph, GraphError};
use crate::tensor::Tensor;

#[test]
fn test_add_shape_validation() {
    let mut graph = Graph::new();
    let x = graph.new_input_node(&Tensor::zeros(&[8, 150]), Some("x")).unwrap();
    let bias = graph.new_parameter_node(&[8, 1], Some("bias")).unwrap();
    let scalar = graph.new_parameter_node(&[1, 1], Some("scalar")).unwrap();
    let same = graph.new_parameter_node(&[8, 150], Some("same")).unwrap();
    let wrong = graph.new_parameter_node(&[4, 1], Some("wrong")).unwrap();

    // 1. 同形、列向量、标量都可以
    for right in [bias, scalar, same] {
        let add = graph.new_add_node(x, right, None).unwrap();
        assert_eq!(graph.get_node_shape(add).unwrap(), &[8, 150]);
    }

    // 2. 行数不一致的列向量不行
    assert_err!(
        graph.new_add_node(x, wrong, None),
        GraphError::ShapeMismatch([8, 150], [4, 1], "Add节点的右父节点必须与左父节点同形，或为同行数的列向量，或为标量")
    );
}

#[test]
fn test_add_broadcasts_bias_over_samples() {
    let mut graph = Graph::new();
    let x = graph
        .new_input_node(&Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]), Some("x"))
        .unwrap();
    let b = graph.new_parameter_node(&[2, 1], Some("b")).unwrap();
    graph.set_node_value(b, &Tensor::new(&[10., -10.], &[2, 1])).unwrap();
    let add = graph.new_add_node(x, b, None).unwrap();
    graph.forward(add).unwrap();
    assert_eq!(
        graph.value(add).unwrap(),
        &Tensor::new(&[11., 12., 13., -6., -5., -4.], &[2, 3])
    );
}

#[test]
fn test_add_bias_gradient_sums_over_samples() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[2, 3], Some("w")).unwrap();
    let b = graph.new_parameter_node(&[2, 1], Some("b")).unwrap();
    let c = graph.new_parameter_node(&[1, 1], Some("c")).unwrap();
    let add = graph.new_add_node(w, b, None).unwrap();
    let add = graph.new_add_node(add, c, None).unwrap();
    let cost = graph.new_sum_node(add, None).unwrap();
    graph.gradient(cost).unwrap();

    // 求和的梯度处处为1，广播方向上折叠求和
    assert_eq!(graph.parameter_grad(w).unwrap(), &Tensor::ones(&[2, 3]));
    assert_eq!(graph.parameter_grad(b).unwrap(), &Tensor::new(&[3., 3.], &[2, 1]));
    assert_abs_diff_eq!(graph.parameter_grad(c).unwrap()[[0, 0]], 6.0, epsilon = 1e-12);
}
