/*
 * @Description  : 模型构建单元测试
 */

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::IrisDataset;
use crate::experiment::{Architecture, Task, Variant, build_model};
use crate::init::InitMode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

fn all_variants() -> Vec<Variant> {
    let mut variants = Vec::new();
    for architecture in [Architecture::Attention, Architecture::Regular] {
        for task in [Task::Xor, Task::Iris] {
            for init in [InitMode::Gaussian, InitMode::Spectral] {
                variants.push(Variant::new(architecture, task, init));
            }
        }
    }
    variants
}

#[test]
fn test_labels_and_artifact_names() {
    let cases = [
        (Architecture::Attention, Task::Xor, InitMode::Gaussian, "Attention", "cost_attention.png"),
        (Architecture::Regular, Task::Xor, InitMode::Spectral, "Regular FFT", "cost_regular_fft.png"),
        (Architecture::Attention, Task::Iris, InitMode::Spectral, "IRIS Attention FFT", "cost_iris_attention_fft.png"),
        (Architecture::Regular, Task::Iris, InitMode::Gaussian, "IRIS Regular", "cost_iris_regular.png"),
    ];
    for (architecture, task, init, label, artifact) in cases {
        let variant = Variant::new(architecture, task, init);
        assert_eq!(variant.label(), label);
        assert_eq!(variant.to_string(), label);
        assert_eq!(variant.artifact_name(), artifact);
    }
}

#[test]
fn test_parameter_shapes_and_order() {
    let iris = IrisDataset::load().unwrap().measurements();
    let expected: [(Architecture, Task, &[(&str, [usize; 2])]); 4] = [
        (
            Architecture::Attention,
            Task::Xor,
            &[("aw", [1, 2]), ("bw", [1, 2]), ("ab", [1, 1]), ("bb", [1, 1])],
        ),
        (
            Architecture::Regular,
            Task::Xor,
            &[("aw", [2, 2]), ("bw", [1, 2]), ("ab", [2, 1]), ("bb", [1, 1])],
        ),
        (
            Architecture::Attention,
            Task::Iris,
            &[
                ("aw", [8, 4]),
                ("bw", [8, 4]),
                ("cw", [4, 8]),
                ("ab", [8, 1]),
                ("bb", [8, 1]),
                ("cb", [4, 1]),
            ],
        ),
        (
            Architecture::Regular,
            Task::Iris,
            &[("aw", [4, 4]), ("bw", [4, 4]), ("ab", [4, 1]), ("bb", [4, 1])],
        ),
    ];

    for (architecture, task, params) in expected {
        let variant = Variant::new(architecture, task, InitMode::Gaussian);
        let model = build_model(variant, &mut StdRng::seed_from_u64(1), Some(&iris)).unwrap();
        let declared: Vec<_> = model.params.iter().collect();
        assert_eq!(declared.len(), params.len(), "{variant}");
        for ((name, id), (expected_name, shape)) in declared.into_iter().zip(params) {
            assert_eq!(name, *expected_name);
            assert_eq!(model.graph.get_node_shape(id).unwrap(), shape);
        }
    }
}

/// 每个变体先声明的权重矩阵个数
fn weight_count(variant: Variant) -> usize {
    match (variant.architecture, variant.task) {
        (Architecture::Attention, Task::Iris) => 3,
        _ => 2,
    }
}

#[test]
fn test_only_leading_weights_are_filled() {
    let iris = IrisDataset::load().unwrap().measurements();
    for variant in all_variants() {
        let model = build_model(variant, &mut StdRng::seed_from_u64(7), Some(&iris)).unwrap();
        let weights = weight_count(variant);
        for (index, (name, id)) in model.params.iter().enumerate() {
            let value = model.graph.value(id).unwrap();
            if index < weights {
                assert!(name.ends_with('w'), "{variant} {name}");
                assert!(value.norm_squared() > 0.0, "{variant} {name}");
            } else {
                assert_eq!(value, &Tensor::zeros(value.shape()), "{variant} {name}");
            }
        }
    }
}

#[test]
fn test_gaussian_weights_share_one_stream() {
    use rand::Rng;
    use rand_distr::StandardNormal;

    let variant = Variant::new(Architecture::Attention, Task::Iris, InitMode::Gaussian);
    let iris = IrisDataset::load().unwrap().measurements();
    let model = build_model(variant, &mut StdRng::seed_from_u64(9), Some(&iris)).unwrap();

    // aw、bw、cw依次消耗同一随机流：32 + 32 + 32 个样本
    let mut rng = StdRng::seed_from_u64(9);
    for name in ["aw", "bw", "cw"] {
        let value = model.graph.value(model.params.get(name).unwrap()).unwrap();
        let factor = (2.0 / value.cols() as f64).sqrt();
        for &x in value.as_slice() {
            let sample: f64 = rng.sample(StandardNormal);
            assert_abs_diff_eq!(x, sample * factor, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_same_seed_builds_same_weights() {
    let variant = Variant::new(Architecture::Regular, Task::Xor, InitMode::Spectral);
    let a = build_model(variant, &mut StdRng::seed_from_u64(3), None).unwrap();
    let b = build_model(variant, &mut StdRng::seed_from_u64(3), None).unwrap();
    for ((_, ia), (_, ib)) in a.params.iter().zip(b.params.iter()) {
        assert_eq!(a.graph.value(ia).unwrap(), b.graph.value(ib).unwrap());
    }
}

#[test]
fn test_attention_xor_cost_at_hand_point() {
    let variant = Variant::new(Architecture::Attention, Task::Xor, InitMode::Gaussian);
    let mut model = build_model(variant, &mut StdRng::seed_from_u64(1), None).unwrap();
    let aw = model.params.get("aw").unwrap();
    let bw = model.params.get("bw").unwrap();
    model.graph.set_node_value(aw, &Tensor::new(&[1., 0.], &[1, 2])).unwrap();
    model.graph.set_node_value(bw, &Tensor::new(&[0., 1.], &[1, 2])).unwrap();

    // f = x1 * x2 = [0, 0, 0, 1]，代价 = 0.5 * (0 + 1 + 1 + 1)
    let cost = model.graph.gradient(model.cost).unwrap();
    assert_abs_diff_eq!(cost, 1.5, epsilon = 1e-12);
    assert_eq!(
        model.graph.value(model.output).unwrap(),
        &Tensor::new(&[0., 0., 0., 1.], &[1, 4])
    );
}

#[test]
fn test_iris_cost_is_mean_over_samples() {
    let data = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8.], &[4, 2]);
    let variant = Variant::new(Architecture::Regular, Task::Iris, InitMode::Gaussian);
    let mut model = build_model(variant, &mut StdRng::seed_from_u64(1), Some(&data)).unwrap();
    let bw = model.params.get("bw").unwrap();
    model.graph.set_node_value(bw, &Tensor::zeros(&[4, 4])).unwrap();

    // 输出恒为0，两列的 0.5Σx² 分别为 0.5*(1+9+25+49)=42 与 0.5*(4+16+36+64)=60
    let cost = model.graph.gradient(model.cost).unwrap();
    assert_abs_diff_eq!(cost, 51.0, epsilon = 1e-12);
}

#[test]
fn test_output_dump_is_grouped_by_sample() {
    let data = Tensor::new(&[1., 2., 3., 4., 5., 6., 7., 8.], &[4, 2]);
    let variant = Variant::new(Architecture::Regular, Task::Iris, InitMode::Gaussian);
    let mut model = build_model(variant, &mut StdRng::seed_from_u64(1), Some(&data)).unwrap();
    let bw = model.params.get("bw").unwrap();
    let bb = model.params.get("bb").unwrap();
    model.graph.set_node_value(bw, &Tensor::zeros(&[4, 4])).unwrap();
    model.graph.set_node_value(bb, &Tensor::new(&[1., 2., 3., 4.], &[4, 1])).unwrap();
    model.graph.forward(model.output).unwrap();

    // 输出形状[4, 2]，两列都等于偏置；按样本展开即两遍[1, 2, 3, 4]
    assert_eq!(
        model.output_by_sample().unwrap(),
        vec![1., 2., 3., 4., 1., 2., 3., 4.]
    );
}

#[test]
fn test_iris_requires_measurements() {
    let variant = Variant::new(Architecture::Attention, Task::Iris, InitMode::Gaussian);
    let result = build_model(variant, &mut StdRng::seed_from_u64(1), None);
    assert!(matches!(result, Err(GraphError::InvalidOperation(_))));

    let wrong = Tensor::zeros(&[3, 5]);
    let result = build_model(variant, &mut StdRng::seed_from_u64(1), Some(&wrong));
    assert!(matches!(result, Err(GraphError::ShapeMismatch { .. })));
}
