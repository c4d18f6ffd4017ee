/*
 * @Description  : 流式统计：只保存累加和、平方和与计数，给出总体均值与总体标准差
 */

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    sum: f64,
    sum_squared: f64,
    count: usize,
}

impl Statistics {
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            sum_squared: 0.0,
            count: 0,
        }
    }

    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.sum_squared += value * value;
        self.count += 1;
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    /// 没有样本时返回None
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// 总体标准差`sqrt((Σx² - (Σx)²/n) / n)`。
    /// 样本全相同时舍入误差可能让括号内略小于0，此时截断为0而不是返回NaN
    pub fn std_dev(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        let centered = self.sum_squared - self.sum * self.sum / n;
        Some((centered / n).max(0.0).sqrt())
    }
}

impl Extend<f64> for Statistics {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}

impl FromIterator<f64> for Statistics {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut statistics = Self::new();
        statistics.extend(iter);
        statistics
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.mean(), self.std_dev()) {
            (Some(mean), Some(std_dev)) => write!(f, "{mean:.6} +- {std_dev:.6}"),
            _ => write!(f, "无样本"),
        }
    }
}
