/*
 * @Description  : 负责计算图（自动微分）的构建：声明参数与数据、组合算子、
 *                 前向求值以及“前向+反向”一体的梯度计算
 */

mod display;
mod graph;
mod nodes;
mod param_set;

pub(in crate::nn) use display::format_node_display;
pub use graph::{Graph, GraphError};
pub use nodes::NodeId;
pub use nodes::raw_node::Reduction;
pub use param_set::ParameterSet;

#[cfg(test)]
mod tests;
