use num_complex::Complex64;
use rand::Rng;
use rand_distr::StandardNormal;
use rustfft::FftPlanner;

/// 生成`n`个频谱权重。
///
/// 构造长度为`n`的复数序列：下标0恰为0（没有直流分量），其余下标的实部、虚部依次
/// 从`rng`独立采样标准正态分布；做一次不归一化的正向FFT后按顺序取实部。
/// 对同一`rng`状态和`n`，结果逐位可复现
pub fn spectral_weights<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let mut buffer = Vec::with_capacity(n);
    buffer.push(Complex64::new(0.0, 0.0));
    for _ in 1..n {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        buffer.push(Complex64::new(re, im));
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer.iter().map(|c| c.re).collect()
}
