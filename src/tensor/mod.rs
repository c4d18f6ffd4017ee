/*
 * @Description  : 张量模块。本crate中的张量固定为2阶（矩阵），元素类型为f64，
 *                 数据始终以行优先（row-major）的标准布局连续存放，
 *                 因此参数的值缓冲区可按声明时的(行, 列)形状逐索引寻址。
 */

use ndarray::Array2;

use crate::errors::TensorError;

mod ops {
    pub mod add;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod print;
mod property;


/// 定义张量的结构体。形状恒为`[rows, cols]`：
/// 标量为`[1, 1]`，列向量为`[n, 1]`，行向量为`[1, n]`。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array2<f64>,
}

impl Tensor {
    /// 按行优先顺序用`data`创建一个形状为`shape`的张量。
    /// `shape`必须含2个元素，且`data`的长度必须等于其乘积，否则会panic。
    pub fn new(data: &[f64], shape: &[usize]) -> Tensor {
        assert!(
            shape.len() == 2 && data.len() == shape.iter().product::<usize>(),
            "{}",
            TensorError::DataLengthMismatch {
                len: data.len(),
                shape: shape.to_vec(),
            }
        );
        let data = Array2::from_shape_vec((shape[0], shape[1]), data.to_vec())
            .unwrap_or_else(|e| panic!("{e}"));
        Tensor { data }
    }

    /// 创建全零张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor::new(&vec![0.0; shape.iter().product()], shape)
    }

    /// 创建全一张量
    pub fn ones(shape: &[usize]) -> Tensor {
        Tensor::new(&vec![1.0; shape.iter().product()], shape)
    }

    /// 创建形状为`[1, 1]`的标量张量
    pub fn scalar(value: f64) -> Tensor {
        Tensor::new(&[value], &[1, 1])
    }
}

// 私有方法
impl Tensor {
    /// 由ndarray的二维数组构造张量，并统一成行优先的标准布局
    fn from_array(data: Array2<f64>) -> Tensor {
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Tensor { data }
    }

    fn array(&self) -> &Array2<f64> {
        &self.data
    }
}

impl From<Array2<f64>> for Tensor {
    fn from(data: Array2<f64>) -> Self {
        Tensor::from_array(data)
    }
}
