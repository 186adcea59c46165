use serde::{Serialize, Deserialize};

use crate::error::{Result, TrainError};
use crate::schedule::cyclic::{check_decay_factor, check_initial_lr};
use crate::schedule::LrSchedule;

/// Monotone step decay: `lr = initial_lr * decay_factor ^ floor(epoch / decay_step)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDecayLr {
    pub initial_lr: f64,
    pub decay_step: usize,
    pub decay_factor: f64,
}

impl Default for StepDecayLr {
    fn default() -> Self {
        StepDecayLr {
            initial_lr: 5e-4,
            decay_step: 50,
            decay_factor: 0.2,
        }
    }
}

impl StepDecayLr {
    pub fn new(initial_lr: f64, decay_step: usize, decay_factor: f64) -> Result<Self> {
        StepDecayLr { initial_lr, decay_step, decay_factor }.validated()
    }

    pub fn validated(self) -> Result<Self> {
        if self.decay_step == 0 {
            return Err(TrainError::InvalidSchedule("decay_step must be > 0".into()));
        }
        check_initial_lr(self.initial_lr)?;
        check_decay_factor(self.decay_factor)?;
        Ok(self)
    }
}

impl LrSchedule for StepDecayLr {
    fn lr(&self, epoch: usize) -> f64 {
        // Saturate the exponent; the rate is already ~0 long before i32::MAX decays.
        let decays = (epoch / self.decay_step).min(i32::MAX as usize) as i32;
        self.initial_lr * self.decay_factor.powi(decays)
    }
}

/// Fixed learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantLr {
    pub lr: f64,
}

impl ConstantLr {
    pub fn new(lr: f64) -> Result<Self> {
        check_initial_lr(lr)?;
        Ok(ConstantLr { lr })
    }
}

impl LrSchedule for ConstantLr {
    fn lr(&self, _epoch: usize) -> f64 {
        self.lr
    }
}
