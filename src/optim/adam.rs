use crate::{math::matrix::Matrix, optim::optimizer::Optimizer, train::model::Model};

/// Adam (Kingma & Ba, 2015).
///
/// m = β1·m + (1-β1)·g
/// v = β2·v + (1-β2)·g²
/// θ = θ − lr_t · m / (√v + ε),  lr_t = lr·√(1-β2^t) / (1-β1^t)
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: i32,
    m: Vec<Matrix>,
    v: Vec<Matrix>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam::with_betas(learning_rate, 0.9, 0.999, 1e-8)
    }

    pub fn with_betas(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Adam {
        Adam { learning_rate, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    pub fn step_count(&self) -> i32 {
        self.t
    }
}

impl Optimizer for Adam {
    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn step(&mut self, model: &mut dyn Model) {
        self.t += 1;
        let (b1, b2, eps) = (self.beta1, self.beta2, self.epsilon);
        let lr_t = self.learning_rate * (1.0 - b2.powi(self.t)).sqrt() / (1.0 - b1.powi(self.t));

        let (ms, vs) = (&mut self.m, &mut self.v);
        let mut idx = 0;
        model.params_and_grads(&mut |param: &mut Matrix, grad: &Matrix| {
            if ms.len() <= idx {
                ms.push(Matrix::zeros(grad.rows, grad.cols));
                vs.push(Matrix::zeros(grad.rows, grad.cols));
            }
            let m = &mut ms[idx].data;
            let v = &mut vs[idx].data;
            for (k, (p, g)) in param.data.iter_mut().zip(&grad.data).enumerate() {
                m[k] = b1 * m[k] + (1.0 - b1) * g;
                v[k] = b2 * v[k] + (1.0 - b2) * g * g;
                *p -= lr_t * m[k] / (v[k].sqrt() + eps);
            }
            idx += 1;
        });
    }
}
