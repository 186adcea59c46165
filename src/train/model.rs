use crate::math::matrix::Matrix;

/// Execution mode of a `Model`.
///
/// `Train` enables training-only behaviour such as dropout and caches the
/// activations that `backward` needs. `Eval` is inference mode: no caching, no
/// stochastic layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Train,
    Eval,
}

/// A trainable model, as seen by the training driver.
///
/// The driver never looks inside a model. It switches modes, runs forward and
/// backward passes and hands the model to an `Optimizer`, which updates the
/// parameters through `params_and_grads`.
pub trait Model {
    fn set_mode(&mut self, mode: Mode);

    fn mode(&self) -> Mode;

    /// Forward pass over a `(batch, features)` matrix.
    fn forward(&mut self, inputs: &Matrix) -> Matrix;

    /// Backward pass from `d loss / d output`; accumulates into the parameter
    /// gradients. Only valid after a `forward` in `Mode::Train`.
    fn backward(&mut self, grad_output: &Matrix);

    fn zero_grad(&mut self);

    /// Visits every parameter together with its accumulated gradient, always
    /// in the same order.
    fn params_and_grads(&mut self, visit: &mut dyn FnMut(&mut Matrix, &Matrix));

    /// Reseeds the model's own random source (dropout masks).
    fn reseed(&mut self, _seed: u64) {}
}
