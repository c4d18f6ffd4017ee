use crate::tensor::Tensor;
use std::fmt;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (rows, cols) = (self.rows(), self.cols());
        write!(f, "[")?;
        for i in 0..rows {
            write!(f, "[")?;
            for j in 0..cols {
                write!(f, "{:8.4}", self.array()[[i, j]])?;
                if j != cols - 1 {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
            if i != rows - 1 {
                write!(f, ",\n ")?;
            }
        }
        write!(f, "]")?;
        writeln!(f, "\n形状: {:?}", self.shape())
    }
}
