//! Fisher 鸢尾花数据集
//!
//! 来源：UCI Machine Learning Repository
//! - 150 个样本，3 个品种各 50 个
//! - 4 个测量值：sepal_length, sepal_width, petal_length, petal_width（单位：厘米）
//!
//! 数据随crate一起发布于`data/iris.csv`，编译时嵌入，无需网络

use std::fs;
use std::path::Path;

use crate::data::error::DataError;
use crate::tensor::Tensor;

/// 编译时嵌入的数据文件
const EMBEDDED_CSV: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/iris.csv"));

/// 测量值数量
pub const NUM_MEASURES: usize = 4;

/// 单个样本
#[derive(Debug, Clone, PartialEq)]
pub struct IrisSample {
    pub measures: [f64; NUM_MEASURES],
    pub label: String,
}

/// 鸢尾花数据集
#[derive(Debug, Clone)]
pub struct IrisDataset {
    samples: Vec<IrisSample>,
}

impl IrisDataset {
    /// 解析嵌入的数据副本
    pub fn load() -> Result<Self, DataError> {
        Self::parse(EMBEDDED_CSV)
    }

    /// 从磁盘上的 CSV 文件加载（首行为表头，每行4个测量值加品种名）
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Self, DataError> {
        let mut samples = Vec::new();

        // 跳过表头与空行
        for (line_no, line) in text.lines().enumerate().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            if values.len() != NUM_MEASURES + 1 {
                return Err(DataError::FormatError(format!(
                    "第{}行应有{}列，实际{}列",
                    line_no + 1,
                    NUM_MEASURES + 1,
                    values.len()
                )));
            }

            let mut measures = [0.0; NUM_MEASURES];
            for (measure, value) in measures.iter_mut().zip(&values) {
                *measure = value.parse().map_err(|_| {
                    DataError::FormatError(format!("第{}行的数值“{}”无法解析", line_no + 1, value))
                })?;
            }
            samples.push(IrisSample {
                measures,
                label: values[NUM_MEASURES].to_string(),
            });
        }

        if samples.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[IrisSample] {
        &self.samples
    }

    /// 测量值矩阵，形状`[4, 样本数]`：每行一个测量项，每列一个样本
    pub fn measurements(&self) -> Tensor {
        let len = self.len();
        let mut data = vec![0.0; NUM_MEASURES * len];
        for (col, sample) in self.samples.iter().enumerate() {
            for (row, &value) in sample.measures.iter().enumerate() {
                data[row * len + col] = value;
            }
        }
        Tensor::new(&data, &[NUM_MEASURES, len])
    }
}
