use crate::math::matrix::Matrix;

/// One mini-batch: `inputs` and `targets` share their row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub inputs: Matrix,
    pub targets: Matrix,
}

impl Batch {
    pub fn new(inputs: Matrix, targets: Matrix) -> Batch {
        Batch { inputs, targets }
    }

    /// Number of samples in the batch.
    pub fn size(&self) -> usize {
        self.inputs.rows
    }
}
