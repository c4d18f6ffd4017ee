use std::fmt::{self, Display};

/// 张量的二元运算符
#[derive(Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    AddAssign,
    Sub,
    Mul,
    MatMul,
}
impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operation_name = match self {
            Operator::Add => "相加",
            Operator::AddAssign => "自相加",
            Operator::Sub => "相减",
            Operator::Mul => "逐元素相乘",
            Operator::MatMul => "矩阵相乘",
        };
        write!(f, "{}", operation_name)
    }
}
