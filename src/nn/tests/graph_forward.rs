use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::nn::{Graph, GraphError};
use crate::tensor::Tensor;

#[test]
fn test_value_before_forward() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[1, 1], Some("w")).unwrap();
    let s = graph.new_sigmoid_node(w, Some("s")).unwrap();
    assert_err!(graph.value(s), GraphError::ComputationError(_));
}

#[test]
fn test_forward_linear_layer_with_bias() {
    let mut graph = Graph::new();
    let x = graph
        .new_input_node(&Tensor::new(&[0., 0., 1., 1., 0., 1., 0., 1.], &[2, 4]), Some("x"))
        .unwrap();
    let w = graph.new_parameter_node(&[1, 2], Some("w")).unwrap();
    let b = graph.new_parameter_node(&[1, 1], Some("b")).unwrap();
    graph.set_node_value(w, &Tensor::new(&[2., 3.], &[1, 2])).unwrap();
    graph.set_node_value(b, &Tensor::new(&[-1.], &[1, 1])).unwrap();

    let wx = graph.new_mat_mul_node(w, x, None).unwrap();
    let l = graph.new_add_node(wx, b, None).unwrap();
    graph.forward(l).unwrap();

    // 每列一个样本：(0,0)->-1, (0,1)->2, (1,0)->1, (1,1)->4
    assert_eq!(graph.value(l).unwrap(), &Tensor::new(&[-1., 2., 1., 4.], &[1, 4]));
}

#[test]
fn test_forward_reuses_shared_ancestor() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[1, 2], Some("w")).unwrap();
    graph.set_node_value(w, &Tensor::new(&[0., 1.], &[1, 2])).unwrap();
    let s = graph.new_sigmoid_node(w, Some("s")).unwrap();
    // s * s，同一个父节点出现两次
    let sq = graph.new_multiply_node(s, s, Some("sq")).unwrap();
    graph.forward(sq).unwrap();

    let value = graph.value(sq).unwrap();
    assert_abs_diff_eq!(value[[0, 0]], 0.25, epsilon = 1e-12);
    let s1 = 1.0 / (1.0 + (-1.0f64).exp());
    assert_abs_diff_eq!(value[[0, 1]], s1 * s1, epsilon = 1e-12);
}

#[test]
fn test_forward_reflects_new_parameter_values() {
    let mut graph = Graph::new();
    let w = graph.new_parameter_node(&[1, 1], Some("w")).unwrap();
    let s = graph.new_sum_node(w, None).unwrap();

    graph.forward(s).unwrap();
    assert_eq!(graph.value(s).unwrap().number(), Some(0.0));

    graph.parameter_value_mut(w).unwrap()[[0, 0]] = 3.5;
    graph.forward(s).unwrap();
    assert_eq!(graph.value(s).unwrap().number(), Some(3.5));
}
