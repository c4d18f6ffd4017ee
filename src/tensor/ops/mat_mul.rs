use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 实现矩阵乘法。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则会触发panic。
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        assert!(
            self.cols() == other.rows(),
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        Tensor::from_array(self.data.dot(&other.data))
    }

    /// 转置，结果仍是行优先的标准布局
    pub fn transpose(&self) -> Tensor {
        Tensor::from_array(self.data.t().to_owned())
    }
}
