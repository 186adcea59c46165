pub mod dense;
pub mod dropout;

pub use dense::Dense;
pub use dropout::Dropout;

use crate::math::matrix::Matrix;

/// One stage of a sequential `Network`.
#[derive(Debug, Clone)]
pub enum Layer {
    Dense(Dense),
    Dropout(Dropout),
}

impl Layer {
    pub fn forward(&mut self, input: &Matrix, training: bool) -> Matrix {
        match self {
            Layer::Dense(dense) => dense.forward(input, training),
            Layer::Dropout(dropout) => dropout.forward(input, training),
        }
    }

    pub fn backward(&mut self, grad_output: &Matrix) -> Matrix {
        match self {
            Layer::Dense(dense) => dense.backward(grad_output),
            Layer::Dropout(dropout) => dropout.backward(grad_output),
        }
    }
}
