/*
 * @Description  : 实验入口：详细运行、批量重复、打印汇总。任何错误都直接终止进程
 */

use attention::experiment::{ExperimentConfig, ExperimentHarness};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExperimentConfig::default();
    match serde_json::to_string(&config) {
        Ok(json) => log::info!("实验配置：{json}"),
        Err(e) => log::warn!("实验配置无法序列化：{e}"),
    }

    let start_time = std::time::Instant::now();
    let result = ExperimentHarness::new(config).and_then(|harness| harness.run());
    match result {
        Ok(summaries) => log::info!(
            "实验完成：{}个变体，耗时{:.2?}",
            summaries.len(),
            start_time.elapsed()
        ),
        Err(e) => {
            log::error!("实验中止：{e}");
            std::process::exit(1);
        }
    }
}
