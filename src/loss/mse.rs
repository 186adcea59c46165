use crate::loss::criterion::Criterion;
use crate::math::matrix::Matrix;

pub struct MseLoss;

impl Criterion for MseLoss {
    /// mean((predicted - expected)²) over every element of the batch
    fn loss(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        let n = predicted.len() as f64;
        predicted.data.iter().zip(&expected.data)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// 2·(predicted - expected) / n
    fn gradient(&self, predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.len() as f64;
        predicted.zip_map(expected, |a, b| 2.0 * (a - b) / n)
    }
}
