use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::Sub;

impl<'b> Sub<&'b Tensor> for &Tensor {
    type Output = Tensor;

    fn sub(self, other: &'b Tensor) -> Tensor {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator: Operator::Sub,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        Tensor::from_array(&self.data - &other.data)
    }
}

impl Sub for Tensor {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}
