use serde::{Serialize, Deserialize};

use crate::loss::{bce::BceLoss, criterion::Criterion, mse::MseLoss};
use crate::math::matrix::Matrix;

/// Selects which loss function a run uses.
///
/// - `Mse`                — mean-squared error; pair with Identity or Sigmoid output.
/// - `BinaryCrossEntropy` — binary cross-entropy; pair with Sigmoid output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    Mse,
    BinaryCrossEntropy,
}

impl Criterion for LossType {
    fn loss(&self, predicted: &Matrix, expected: &Matrix) -> f64 {
        match self {
            LossType::Mse                => MseLoss.loss(predicted, expected),
            LossType::BinaryCrossEntropy => BceLoss.loss(predicted, expected),
        }
    }

    fn gradient(&self, predicted: &Matrix, expected: &Matrix) -> Matrix {
        match self {
            LossType::Mse                => MseLoss.gradient(predicted, expected),
            LossType::BinaryCrossEntropy => BceLoss.gradient(predicted, expected),
        }
    }
}
