/*
 * @Description  : 运算节点。每个节点只负责自己的前向值以及对各父节点的梯度
 */

mod add;
mod mat_mul;
mod multiply;
mod reduce;
mod sigmoid;

pub(crate) use add::Add;
pub(crate) use mat_mul::MatMul;
pub(crate) use multiply::Multiply;
pub(crate) use reduce::Reduce;
pub use reduce::Reduction;
pub(crate) use sigmoid::Sigmoid;
