pub mod optimizer;
pub mod sgd;
pub mod adam;

pub use optimizer::{Optimizer, OptimizerKind};
pub use sgd::Sgd;
pub use adam::Adam;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;
    use crate::train::model::{Mode, Model};
    use approx::assert_abs_diff_eq;

    /// One scalar parameter with a gradient set by hand.
    struct Scalar {
        param: Matrix,
        grad: Matrix,
    }

    impl Scalar {
        fn new(value: f64, grad: f64) -> Scalar {
            Scalar { param: Matrix::from_vec(1, 1, vec![value]), grad: Matrix::from_vec(1, 1, vec![grad]) }
        }
    }

    impl Model for Scalar {
        fn set_mode(&mut self, _mode: Mode) {}
        fn mode(&self) -> Mode { Mode::Train }
        fn forward(&mut self, inputs: &Matrix) -> Matrix { inputs.clone() }
        fn backward(&mut self, _grad_output: &Matrix) {}
        fn zero_grad(&mut self) { self.grad.fill(0.0); }
        fn params_and_grads(&mut self, visit: &mut dyn FnMut(&mut Matrix, &Matrix)) {
            visit(&mut self.param, &self.grad);
        }
    }

    #[test]
    fn sgd_moves_against_gradient() {
        let mut model = Scalar::new(1.0, 2.0);
        let mut opt = Sgd::new(0.1);
        opt.step(&mut model);
        assert_abs_diff_eq!(model.param.get(0, 0), 0.8);
    }

    #[test]
    fn sgd_momentum_accumulates_velocity() {
        let mut model = Scalar::new(0.0, 1.0);
        let mut opt = Sgd::with_momentum(1.0, 0.5);
        opt.step(&mut model);
        opt.step(&mut model);
        // v1 = 1, v2 = 1.5
        assert_abs_diff_eq!(model.param.get(0, 0), -2.5);
    }

    #[test]
    fn adam_first_step_is_lr_sized() {
        let mut model = Scalar::new(0.0, 123.0);
        let mut opt = Adam::new(0.01);
        opt.step(&mut model);
        assert_abs_diff_eq!(model.param.get(0, 0), -0.01, epsilon = 1e-6);
        assert_eq!(opt.step_count(), 1);
    }

    #[test]
    fn zero_grad_delegates_to_model() {
        let mut model = Scalar::new(0.0, 5.0);
        let mut opt: Box<dyn Optimizer> = OptimizerKind::Sgd { momentum: 0.0 }.build(0.1);
        opt.zero_grad(&mut model);
        opt.step(&mut model);
        assert_eq!(model.param.get(0, 0), 0.0);
        assert_abs_diff_eq!(opt.learning_rate(), 0.1);
    }
}
