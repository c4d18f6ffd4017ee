/*
 * @Description  : 本类仅包含一些属性方法，不包含任何运算方法
 */

use super::Tensor;
use std::ops::{Index, IndexMut};

impl Tensor {
    /// 张量的形状，恒为`[rows, cols]`
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// 计算张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 判断两个张量的形状是否严格一致
    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 判断张量是否为标量（形状为`[1, 1]`）
    pub fn is_scalar(&self) -> bool {
        self.size() == 1
    }

    /// 转化为纯数（number）。若为标量，则返回Some(number)，否则返回None
    pub fn number(&self) -> Option<f64> {
        if self.is_scalar() {
            Some(self.data[[0, 0]])
        } else {
            None
        }
    }

    /// 以行优先顺序访问底层连续缓冲区
    pub fn as_slice(&self) -> &[f64] {
        self.data
            .as_slice()
            .expect("张量始终保持行优先的标准布局")
    }

    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        self.data
            .as_slice_mut()
            .expect("张量始终保持行优先的标准布局")
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.as_slice().to_vec()
    }
}

impl Index<[usize; 2]> for Tensor {
    type Output = f64;

    fn index(&self, index: [usize; 2]) -> &f64 {
        &self.data[index]
    }
}

impl IndexMut<[usize; 2]> for Tensor {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut f64 {
        &mut self.data[index]
    }
}
