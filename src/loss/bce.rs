use crate::loss::criterion::Criterion;
use crate::math::matrix::Matrix;

/// Binary cross-entropy on probabilities; pair with a Sigmoid output.
pub struct BceLoss;

const EPS: f64 = 1e-12;

impl Criterion for BceLoss {
    /// -mean(y·log(p+ε) + (1-y)·log(1-p+ε))
    fn loss(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.len() as f64;
        predicted.data.iter().zip(&expected.data)
            .map(|(p, y)| -(y * (p + EPS).ln() + (1.0 - y) * (1.0 - p + EPS).ln()))
            .sum::<f64>() / n
    }

    /// (p - y) / ((p + ε) · (1 - p + ε) · n)
    fn gradient(&self, predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.len() as f64;
        predicted.zip_map(expected, |p, y| (p - y) / ((p + EPS) * (1.0 - p + EPS) * n))
    }
}
