use rand::Rng;

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = σ(x·W + b)`.
///
/// `weights` has shape `(input_size, size)`; `biases` is a single row.
#[derive(Debug, Clone)]
pub struct Dense {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
    weights_grad: Matrix,
    biases_grad: Matrix,
    // Cached by a training-mode forward pass for `backward`.
    input: Option<Matrix>,
    pre_activation: Option<Matrix>,
}

impl Dense {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Dense {
        let weights = match activation {
            ActivationFunction::ReLU | ActivationFunction::LeakyReLU { .. } => {
                Matrix::he(input_size, size, rng)
            }
            _ => Matrix::xavier(input_size, size, rng),
        };

        Dense {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation,
            weights_grad: Matrix::zeros(input_size, size),
            biases_grad: Matrix::zeros(1, size),
            input: None,
            pre_activation: None,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Forward pass. When `cache` is set the input and pre-activation are kept
    /// for the following `backward`.
    pub fn forward(&mut self, input: &Matrix, cache: bool) -> Matrix {
        let z = input.matmul(&self.weights).add_row(&self.biases);
        let a = self.activator.apply(&z);
        if cache {
            self.input = Some(input.clone());
            self.pre_activation = Some(z);
        } else {
            self.input = None;
            self.pre_activation = None;
        }
        a
    }

    /// Accumulates gradients from `grad_output` (∂L/∂a) and returns ∂L/∂x.
    ///
    /// Panics if the last forward pass did not cache its activations.
    pub fn backward(&mut self, grad_output: &Matrix) -> Matrix {
        let (input, z) = match (&self.input, &self.pre_activation) {
            (Some(input), Some(z)) => (input, z),
            _ => panic!("Dense::backward called without a cached training-mode forward pass"),
        };

        // δ = ∂L/∂a ⊙ σ'(z)
        let delta = grad_output.hadamard(&self.activator.derivative_at(z));

        self.weights_grad.add_assign(&input.transpose().matmul(&delta));
        self.biases_grad.add_assign(&delta.sum_rows());

        delta.matmul(&self.weights.transpose())
    }

    pub fn zero_grad(&mut self) {
        self.weights_grad.fill(0.0);
        self.biases_grad.fill(0.0);
    }

    pub fn params_and_grads(&mut self, visit: &mut dyn FnMut(&mut Matrix, &Matrix)) {
        visit(&mut self.weights, &self.weights_grad);
        visit(&mut self.biases, &self.biases_grad);
    }

    pub fn weights_grad(&self) -> &Matrix {
        &self.weights_grad
    }

    pub fn biases_grad(&self) -> &Matrix {
        &self.biases_grad
    }
}
