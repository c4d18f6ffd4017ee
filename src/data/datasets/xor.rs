use crate::tensor::Tensor;

/// XOR 真值表，返回`(输入[2, 4], 目标[1, 4])`。
/// 输入的4列依次为(0,0)、(0,1)、(1,0)、(1,1)，目标依次为0、1、1、0
pub fn xor_table() -> (Tensor, Tensor) {
    let input = Tensor::new(
        &[
            0., 0., 1., 1., //
            0., 1., 0., 1.,
        ],
        &[2, 4],
    );
    let target = Tensor::new(&[0., 1., 1., 0.], &[1, 4]);
    (input, target)
}
