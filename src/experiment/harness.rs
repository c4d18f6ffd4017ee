/*
 * @Description  : 实验编排：
 *                 1. 每个变体用固定种子详细跑一次：逐步打印“迭代号 代价”、打印训练后的输出张量、保存代价曲线图；
 *                 2. 每个变体再用连续的一批种子静默重复，把每次的迭代次数喂给各自的统计量；
 *                 3. 按汇总顺序打印“名称: 均值 +- 标准差”
 */

use std::fmt;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::error::ExperimentError;
use super::model::{Architecture, Task, Variant, build_model};
use super::plot::save_cost_plot;
use super::stats::Statistics;
use super::trainer::{NormScope, TrainOutcome, Trainer, TrainerConfig};
use crate::data::IrisDataset;
use crate::init::InitMode;
use crate::tensor::Tensor;

/// 实验配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// 详细运行所用的种子
    pub verbose_seed: u64,
    /// 每个变体的静默重复次数
    pub trials: usize,
    /// 第一次静默运行的种子，之后逐次加1
    pub first_trial_seed: u64,
    /// 参与实验的初始化方式
    pub init_modes: Vec<InitMode>,
    pub norm_scope: NormScope,
    /// 代价曲线图的输出目录
    pub output_dir: PathBuf,
    /// 代价曲线图的边长（像素）
    pub plot_size: u32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            verbose_seed: 1,
            trials: 128,
            first_trial_seed: 2,
            init_modes: vec![InitMode::Gaussian, InitMode::Spectral],
            norm_scope: NormScope::All,
            output_dir: PathBuf::from("."),
            plot_size: 768,
        }
    }
}

/// 一个变体的汇总结果
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSummary {
    pub variant: Variant,
    pub statistics: Statistics,
}

impl fmt::Display for VariantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.variant.label(), self.statistics)
    }
}

pub struct ExperimentHarness {
    config: ExperimentConfig,
    iris: Tensor,
}

impl ExperimentHarness {
    /// 使用内置的鸢尾花数据创建
    pub fn new(config: ExperimentConfig) -> Result<Self, ExperimentError> {
        let iris = IrisDataset::load()?.measurements();
        Self::with_iris(config, iris)
    }

    /// 使用给定的`[4, 样本数]`测量值矩阵创建
    pub fn with_iris(config: ExperimentConfig, iris: Tensor) -> Result<Self, ExperimentError> {
        if config.trials == 0 {
            return Err(ExperimentError::InvalidConfig(
                "静默重复次数必须大于0".to_string(),
            ));
        }
        if config.init_modes.is_empty() {
            return Err(ExperimentError::InvalidConfig(
                "至少需要一种初始化方式".to_string(),
            ));
        }
        Ok(Self { config, iris })
    }

    pub const fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// 详细运行的顺序
    pub fn verbose_order(&self) -> Vec<Variant> {
        use Architecture::{Attention, Regular};
        use InitMode::{Gaussian, Spectral};
        use Task::{Iris, Xor};
        self.enabled(&[
            Variant::new(Attention, Xor, Gaussian),
            Variant::new(Regular, Xor, Gaussian),
            Variant::new(Attention, Xor, Spectral),
            Variant::new(Regular, Xor, Spectral),
            Variant::new(Attention, Iris, Gaussian),
            Variant::new(Attention, Iris, Spectral),
            Variant::new(Regular, Iris, Gaussian),
            Variant::new(Regular, Iris, Spectral),
        ])
    }

    /// 汇总打印的顺序
    pub fn summary_order(&self) -> Vec<Variant> {
        let mut variants = Vec::new();
        for architecture in [Architecture::Attention, Architecture::Regular] {
            for task in [Task::Xor, Task::Iris] {
                for init in [InitMode::Gaussian, InitMode::Spectral] {
                    variants.push(Variant::new(architecture, task, init));
                }
            }
        }
        self.enabled(&variants)
    }

    fn enabled(&self, variants: &[Variant]) -> Vec<Variant> {
        variants
            .iter()
            .copied()
            .filter(|variant| self.config.init_modes.contains(&variant.init))
            .collect()
    }

    /// 运行完整实验，并返回按汇总顺序排列的结果
    pub fn run(&self) -> Result<Vec<VariantSummary>, ExperimentError> {
        for variant in self.verbose_order() {
            log::info!("详细运行：{variant}（种子{}）", self.config.verbose_seed);
            self.run_variant(variant, self.config.verbose_seed, true)?;
        }

        let mut summaries = Vec::new();
        for variant in self.summary_order() {
            log::info!("静默运行：{variant}（{}次）", self.config.trials);
            summaries.push(self.run_trials(variant)?);
        }

        for summary in &summaries {
            println!("{summary}");
        }
        Ok(summaries)
    }

    /// 用`seed`跑一次变体。详细模式下打印轨迹与输出，并保存代价曲线图
    pub fn run_variant(
        &self,
        variant: Variant,
        seed: u64,
        verbose: bool,
    ) -> Result<TrainOutcome, ExperimentError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut model = build_model(variant, &mut rng, Some(&self.iris))?;
        let trainer_config =
            TrainerConfig::for_task(variant.task).with_norm_scope(self.config.norm_scope);
        let outcome = Trainer::train(&mut model, &trainer_config, verbose)?;

        if verbose {
            for step in &outcome.trace {
                println!("{} {}", step.iteration, step.cost);
            }
            println!("{} {:?}", outcome.iterations, model.output_by_sample()?);

            std::fs::create_dir_all(&self.config.output_dir)?;
            let path = self.config.output_dir.join(variant.artifact_name());
            save_cost_plot(&outcome.points(), &path, self.config.plot_size)
                .map_err(|source| ExperimentError::Plot { path, source })?;
        }
        Ok(outcome)
    }

    /// 用连续种子静默重复`trials`次，统计迭代次数
    pub fn run_trials(&self, variant: Variant) -> Result<VariantSummary, ExperimentError> {
        let mut statistics = Statistics::new();
        for offset in 0..self.config.trials as u64 {
            let seed = self.config.first_trial_seed + offset;
            let outcome = self.run_variant(variant, seed, false)?;
            log::trace!("{variant} 种子{seed}：{}次", outcome.iterations);
            statistics.add(outcome.iterations as f64);
        }
        log::debug!("{variant}：{statistics}");
        Ok(VariantSummary {
            variant,
            statistics,
        })
    }
}
