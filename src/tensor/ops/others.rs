use crate::tensor::Tensor;
use ndarray::Axis;

impl Tensor {
    /// 逐元素计算 sigmoid(x) = 1 / (1 + e^(-x))
    pub fn sigmoid(&self) -> Tensor {
        Tensor::from_array(self.data.mapv(|x| 1.0 / (1.0 + (-x).exp())))
    }

    /// 对张量中的所有元素求和并返回一个形状为[1, 1]的标量。
    pub fn sum(&self) -> Tensor {
        Tensor::scalar(self.data.sum())
    }

    /// 对张量中的所有元素求平均并返回一个形状为[1, 1]的标量。
    pub fn mean(&self) -> Tensor {
        Tensor::scalar(self.data.sum() / self.size() as f64)
    }

    /// 沿列方向求和，把`[rows, cols]`压缩为`[rows, 1]`（即列广播加法的反向）
    pub fn sum_cols(&self) -> Tensor {
        let summed = self.data.sum_axis(Axis(1)).insert_axis(Axis(1));
        Tensor::from_array(summed)
    }

    /// 所有元素的平方和
    pub fn norm_squared(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum()
    }

    /// 把`other`的每个元素写入本张量（形状必须一致）
    pub fn fill_from(&mut self, other: &Tensor) {
        self.data.assign(&other.data);
    }

    /// 全部元素置零
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }
}
