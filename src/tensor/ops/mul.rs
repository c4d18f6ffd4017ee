/*
 * @Description  : 张量的乘法：
 *                 1. 张量与纯数相乘：每个元素乘以该纯数；
 *                 2. 张量与张量相乘：逐元素相乘（Hadamard积），两者形状必须严格一致。
 *                 注意：矩阵乘法请使用`mat_mul`。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::Mul;

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 * f64↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Mul<f64> for Tensor {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Tensor::from_array(self.data * scalar)
    }
}

impl Mul<f64> for &Tensor {
    type Output = Tensor;

    fn mul(self, scalar: f64) -> Tensor {
        Tensor::from_array(&self.data * scalar)
    }
}

impl<'a> Mul<&'a Tensor> for f64 {
    type Output = Tensor;

    fn mul(self, tensor: &'a Tensor) -> Tensor {
        tensor * self
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 * f64↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓带引用的张量 * 带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl<'b> Mul<&'b Tensor> for &Tensor {
    type Output = Tensor;

    fn mul(self, other: &'b Tensor) -> Tensor {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator: Operator::Mul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        Tensor::from_array(&self.data * &other.data)
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑带引用的张量 * 带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
