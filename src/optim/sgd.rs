use crate::{math::matrix::Matrix, optim::optimizer::Optimizer, train::model::Model};

/// Stochastic gradient descent with optional classical momentum.
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
    velocity: Vec<Matrix>,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd::with_momentum(learning_rate, 0.0)
    }

    pub fn with_momentum(learning_rate: f64, momentum: f64) -> Sgd {
        Sgd { learning_rate, momentum, velocity: Vec::new() }
    }
}

impl Optimizer for Sgd {
    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// v ← μ·v + g;  θ ← θ − lr·v
    fn step(&mut self, model: &mut dyn Model) {
        let lr = self.learning_rate;
        let mu = self.momentum;
        let velocity = &mut self.velocity;
        let mut idx = 0;
        model.params_and_grads(&mut |param: &mut Matrix, grad: &Matrix| {
            if velocity.len() <= idx {
                velocity.push(Matrix::zeros(grad.rows, grad.cols));
            }
            let vel = &mut velocity[idx];
            for ((p, g), v) in param.data.iter_mut().zip(&grad.data).zip(vel.data.iter_mut()) {
                *v = mu * *v + g;
                *p -= lr * *v;
            }
            idx += 1;
        });
    }
}
