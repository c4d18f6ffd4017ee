//! 鸢尾花数据集单元测试

use std::io::Write;

use approx::assert_abs_diff_eq;

use crate::assert_err;
use crate::data::{DataError, IrisDataset};

#[test]
fn test_iris_load_embedded() {
    let dataset = IrisDataset::load().expect("加载数据集失败");
    assert_eq!(dataset.len(), 150);
    assert!(!dataset.is_empty());

    let first = &dataset.samples()[0];
    assert_eq!(first.measures, [5.1, 3.5, 1.4, 0.2]);
    assert_eq!(first.label, "Iris-setosa");

    // 3 个品种各 50 个
    for species in ["Iris-setosa", "Iris-versicolor", "Iris-virginica"] {
        let count = dataset.samples().iter().filter(|s| s.label == species).count();
        assert_eq!(count, 50, "{species}");
    }
}

#[test]
fn test_iris_measurements_layout() {
    let dataset = IrisDataset::load().unwrap();
    let data = dataset.measurements();
    assert_eq!(data.shape(), &[4, 150]);

    // 第0列即第一个样本
    assert_eq!(data[[0, 0]], 5.1);
    assert_eq!(data[[1, 0]], 3.5);
    assert_eq!(data[[2, 0]], 1.4);
    assert_eq!(data[[3, 0]], 0.2);

    // 萼片长度的均值约为5.843
    let sepal_mean: f64 = (0..150).map(|c| data[[0, c]]).sum::<f64>() / 150.0;
    assert_abs_diff_eq!(sepal_mean, 5.843, epsilon = 1e-3);
}

#[test]
fn test_iris_from_path() {
    let path = std::env::temp_dir().join("attention_iris_from_path_test.csv");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "sepal_length,sepal_width,petal_length,petal_width,species").unwrap();
        writeln!(file, "5.0,3.0,1.0,0.5,Iris-setosa").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "6.0,2.5,4.5,1.5,Iris-versicolor").unwrap();
    }
    let dataset = IrisDataset::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.measurements().to_vec(), vec![5.0, 6.0, 3.0, 2.5, 1.0, 4.5, 0.5, 1.5]);
}

#[test]
fn test_iris_errors() {
    let missing = std::env::temp_dir().join("attention_iris_missing.csv");
    assert_err!(IrisDataset::from_path(&missing), DataError::FileNotFound(_));

    let path = std::env::temp_dir().join("attention_iris_bad_format.csv");
    std::fs::write(&path, "header\n5.0,3.0,abc,0.5,Iris-setosa\n").unwrap();
    let result = IrisDataset::from_path(&path);
    assert_err!(result, DataError::FormatError(msg) if msg.contains("abc"));

    std::fs::write(&path, "header\n5.0,3.0,0.5,Iris-setosa\n").unwrap();
    assert_err!(IrisDataset::from_path(&path), DataError::FormatError(_));

    std::fs::write(&path, "header\n\n").unwrap();
    assert_err!(IrisDataset::from_path(&path), DataError::Empty);
    std::fs::remove_file(&path).unwrap();
}
