use serde::{Serialize, Deserialize};

use crate::optim::{adam::Adam, sgd::Sgd};
use crate::train::model::Model;

/// Stateful parameter-update rule bound to one learning rate.
///
/// The training driver builds a fresh optimizer every epoch through a factory
/// closure, so any internal state (momentum, moment estimates) lives for one
/// epoch only.
pub trait Optimizer {
    fn learning_rate(&self) -> f64;

    /// Clears the gradients accumulated in `model`.
    fn zero_grad(&mut self, model: &mut dyn Model) {
        model.zero_grad();
    }

    /// Applies one update from the gradients accumulated in `model`.
    fn step(&mut self, model: &mut dyn Model);
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    fn learning_rate(&self) -> f64 {
        (**self).learning_rate()
    }

    fn zero_grad(&mut self, model: &mut dyn Model) {
        (**self).zero_grad(model)
    }

    fn step(&mut self, model: &mut dyn Model) {
        (**self).step(model)
    }
}

/// Serializable optimizer choice, turned into a factory by `build`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum OptimizerKind {
    Sgd {
        #[serde(default)]
        momentum: f64,
    },
    Adam,
}

impl Default for OptimizerKind {
    fn default() -> Self {
        OptimizerKind::Adam
    }
}

impl OptimizerKind {
    pub fn build(&self, learning_rate: f64) -> Box<dyn Optimizer> {
        match *self {
            OptimizerKind::Sgd { momentum } => Box::new(Sgd::with_momentum(learning_rate, momentum)),
            OptimizerKind::Adam => Box::new(Adam::new(learning_rate)),
        }
    }
}
