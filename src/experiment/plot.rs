/*
 * @Description  : 把“迭代号-代价”散点绘制为PNG图片：标题“epochs vs cost”，
 *                 横轴epochs、纵轴cost，带数值刻度，每个点一个实心圆
 */

use std::path::Path;

use image::RgbImage;
use plotters::prelude::*;

use super::error::PlotError;

const MIN_CANVAS: u32 = 128;
const TITLE: &str = "epochs vs cost";

/// 绘制`size`×`size`的散点图并保存到`path`（格式由扩展名决定）
pub fn save_cost_plot(points: &[(f64, f64)], path: &Path, size: u32) -> Result<(), PlotError> {
    let image = render_cost_plot(points, size)?;
    image.save(path)?;
    log::debug!("代价曲线已保存至{}", path.display());
    Ok(())
}

/// 在内存中的RGB缓冲上绘制，再交给`image`编码保存
pub(crate) fn render_cost_plot(points: &[(f64, f64)], size: u32) -> Result<RgbImage, PlotError> {
    if points.is_empty() {
        return Err(PlotError::Empty);
    }
    if size < MIN_CANVAS {
        return Err(PlotError::CanvasTooSmall(size));
    }
    if let Some((index, &(x, y))) = points
        .iter()
        .enumerate()
        .find(|(_, (x, y))| !x.is_finite() || !y.is_finite())
    {
        return Err(PlotError::NonFinite { index, x, y });
    }

    let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.1));
    let label_area = size / 10;
    let font_size = f64::from((size / 32).max(10));
    let radius = (size / 256).max(2) as i32;

    let mut buffer = vec![0u8; size as usize * size as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (size, size)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(TITLE, ("sans-serif", font_size * 1.5))
            .margin(10)
            .x_label_area_size(label_area)
            .y_label_area_size(label_area)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("epochs")
            .y_desc("cost")
            .label_style(("sans-serif", font_size))
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), radius, BLUE.filled())),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    RgbImage::from_raw(size, size, buffer).ok_or(PlotError::CanvasTooSmall(size))
}

fn draw_error<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Draw(error.to_string())
}

/// 取值范围；所有值相同时向两侧各扩0.5，避免坐标轴退化
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    }
}
