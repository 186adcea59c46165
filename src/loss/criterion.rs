use crate::math::matrix::Matrix;

/// Loss function over a batch of predictions.
///
/// `loss` reduces the batch to its mean; `gradient` is the derivative of that
/// mean with respect to every prediction, ready for `Model::backward`.
pub trait Criterion {
    fn loss(&self, predicted: &Matrix, expected: &Matrix) -> f64;

    fn gradient(&self, predicted: &Matrix, expected: &Matrix) -> Matrix;
}
