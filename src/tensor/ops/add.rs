/*
 * @Description  : 张量的加法，实现了两个张量“逐元素”相加的运算，并返回一个新的张量。
 *                 该运算支持以下情况：
 *                 1. 两个张量形状严格一致；
 *                 2. 右操作数为`[rows, 1]`的列向量（或`[1, 1]`的标量），沿列方向广播到左操作数的每一列。
 *                 第2种情况用于把偏置加到“每列一个样本”的批量输出上。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use std::ops::{Add, AddAssign};

impl Add for Tensor {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        add_within_tensors(&self, &other)
    }
}

impl<'a> Add<&'a Self> for Tensor {
    type Output = Self;

    fn add(self, other: &'a Self) -> Self {
        add_within_tensors(&self, other)
    }
}

impl<'b> Add<&'b Tensor> for &Tensor {
    type Output = Tensor;

    fn add(self, other: &'b Tensor) -> Tensor {
        add_within_tensors(self, other)
    }
}

impl<'a> AddAssign<&'a Tensor> for Tensor {
    fn add_assign(&mut self, other: &'a Tensor) {
        assert!(
            self.is_same_shape(other),
            "{}",
            TensorError::OperatorError {
                operator: Operator::AddAssign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        self.data += &other.data;
    }
}

impl Tensor {
    /// 判断`other`能否作为右操作数广播到本张量：形状一致，或为同行数的列向量，或为标量
    pub fn can_broadcast_with(&self, other: &Tensor) -> bool {
        self.is_same_shape(other)
            || (other.cols() == 1 && other.rows() == self.rows())
            || other.is_scalar()
    }
}

fn add_within_tensors(tensor_1: &Tensor, tensor_2: &Tensor) -> Tensor {
    assert!(
        tensor_1.can_broadcast_with(tensor_2),
        "{}",
        TensorError::OperatorError {
            operator: Operator::Add,
            tensor1_shape: tensor_1.shape().to_vec(),
            tensor2_shape: tensor_2.shape().to_vec(),
        }
    );
    Tensor::from_array(&tensor_1.data + &tensor_2.data)
}
